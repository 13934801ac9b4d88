use clap::Args;
use storefront_app::{
    database::{self, Db},
    domain::categories::{
        CategoriesService, PgCategoriesService, data::NewCategory, records::CategoryUuid,
    },
};
use uuid::Uuid;

#[derive(Debug, Args)]
pub(crate) struct CreateCategoryArgs {
    /// Category display name
    #[arg(long)]
    name: String,

    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,

    /// Optional category UUID; generated when omitted
    #[arg(long)]
    category_uuid: Option<Uuid>,
}

pub(crate) async fn run(args: CreateCategoryArgs) -> Result<(), String> {
    let pool = database::connect(&args.database_url)
        .await
        .map_err(|error| format!("failed to connect to database: {error}"))?;

    let service = PgCategoriesService::new(Db::new(pool));

    let category = service
        .create_category(NewCategory {
            uuid: args
                .category_uuid
                .map_or_else(CategoryUuid::new, CategoryUuid::from_uuid),
            name: args.name,
        })
        .await
        .map_err(|error| format!("failed to create category: {error}"))?;

    println!("category_uuid: {}", category.uuid);
    println!("category_name: {}", category.name);

    Ok(())
}
