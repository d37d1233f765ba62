//! Storefront app install server

use std::process;

use salvo::prelude::*;
use tracing::{error, info};

use storefront_app::context::AppContext;

use crate::{config::ServerConfig, state::State};

mod auth;
mod config;
mod errors;
mod extensions;
mod healthcheck;
mod install;
mod observability;
mod products;
mod router;
mod shutdown;
mod state;
#[cfg(test)]
mod test_helpers;

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

    if let Err(source) = observability::init(&config) {
        #[expect(
            clippy::print_stderr,
            reason = "observability failed to initialize, cannot use tracing"
        )]
        {
            eprintln!("Observability initialization error: {source}");
        }

        process::exit(1);
    }

    let app = match AppContext::from_database_url(
        &config.database.database_url,
        config.database.run_migrations,
        config.platform.platform_config(),
        config.platform.installations_config(),
    )
    .await
    {
        Ok(app) => app,
        Err(init_error) => {
            error!("failed to initialize app context: {init_error}");

            process::exit(1);
        }
    };

    let addr = config.socket_addr();

    info!("Starting server on {addr}");

    let listener = TcpListener::new(addr).bind().await;

    let service = router::service(State::from_app_context(
        app,
        config.http.send_details_on_internal_error,
    ));

    let server = Server::new(listener);

    let handle = server.handle();

    tokio::spawn(async move {
        if let Err(error) = shutdown::listen(handle).await {
            error!("failed to listen for shutdown signal: {error}");
        }
    });

    server.serve(service).await;
}
