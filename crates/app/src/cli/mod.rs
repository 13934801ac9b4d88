use clap::{Parser, Subcommand};

mod category;
mod db;

#[derive(Debug, Parser)]
#[command(name = "storefront-app", about = "Storefront administration", long_about = None)]
pub(crate) struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    Db(db::DbCommand),
    Category(category::CategoryCommand),
}

impl Cli {
    pub(crate) async fn run(self) -> Result<(), String> {
        match self.command {
            Commands::Db(command) => db::run(command).await,
            Commands::Category(command) => category::run(command).await,
        }
    }
}
