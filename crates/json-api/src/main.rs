//! Storefront JSON API Server

use std::{process, sync::Arc};

use salvo::{
    affix_state::inject,
    oapi::{
        OpenApi,
        security::{Http, HttpAuthScheme, SecurityScheme},
        swagger_ui::SwaggerUi,
    },
    prelude::*,
    trailing_slash::remove_slash,
};
use tracing::{error, info};

use storefront_app::{
    auth::{OpenBaoClient, OpenBaoConfig},
    context::AppContext,
};

use crate::{config::ServerConfig, observability::Observability, state::State};

#[cfg(not(target_env = "msvc"))]
use tikv_jemallocator::Jemalloc;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

mod auth;
mod carts;
mod categories;
mod config;
mod envelope;
mod extensions;
mod healthcheck;
mod observability;
mod orders;
mod products;
mod router;
mod shutdown;
mod state;
#[cfg(test)]
mod test_helpers;
mod users;

/// Storefront JSON API Server entry point
#[tokio::main]
pub async fn main() {
    let config = ServerConfig::load().unwrap_or_else(|e| {
        #[expect(
            clippy::print_stderr,
            reason = "logging not initialized yet, must use eprintln for config errors"
        )]
        {
            eprintln!("Configuration error: {e}");
        }

        process::exit(1);
    });

    let observability = Observability::init(&config).unwrap_or_else(|e| {
        #[expect(
            clippy::print_stderr,
            reason = "logging failed to initialize, must use eprintln"
        )]
        {
            eprintln!("Observability error: {e}");
        }

        process::exit(1);
    });

    let addr = config.socket_addr();

    info!("Starting server on {addr}");

    let listener = TcpListener::new(addr).bind().await;

    let openbao = OpenBaoClient::new(OpenBaoConfig {
        addr: config.auth.openbao_addr.clone(),
        token: config.auth.openbao_token.clone(),
        transit_key: config.auth.openbao_transit_key.clone(),
    });

    let app = match AppContext::from_database_url(
        &config.database.database_url,
        Arc::new(openbao),
        config.auth.token_ttl(),
    )
    .await
    {
        Ok(app) => app,
        Err(init_error) => {
            error!("failed to initialize app context: {init_error}");

            process::exit(1);
        }
    };

    let router = Router::new()
        .hoop(CatchPanic::new())
        .hoop(observability::request_logging)
        .hoop(remove_slash())
        .hoop(inject(State::from_app_context(app)))
        .push(Router::with_path("healthcheck").get(healthcheck::handler))
        .push(Router::with_path("metrics").get(observability::metrics_handler))
        .push(router::app_router());

    let doc = OpenApi::new("Storefront API", env!("CARGO_PKG_VERSION"))
        .add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
        )
        .merge_router(&router);

    let router = router
        .push(doc.into_router("/api-doc/openapi.json"))
        .push(SwaggerUi::new("/api-doc/openapi.json").into_router("docs"));

    let server = Server::new(listener);

    let handle = server.handle();

    // Listen for shutdown signal
    tokio::spawn(async move {
        if let Err(error) = shutdown::listen(handle).await {
            error!("failed to listen for shutdown signal: {error}");
        }
    });

    server.serve(router).await;

    observability.shutdown();
}
