//! Idols JSON API Server

use std::process;

use salvo::prelude::*;
use tracing::{error, info};

use idols_app::context::AppContext;

use crate::{config::ServerConfig, state::State};

#[cfg(not(target_env = "msvc"))]
use tikv_jemallocator::Jemalloc;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

mod auth;
mod config;
mod cors;
mod errors;
mod extensions;
mod healthcheck;
mod home;
mod idols;
mod observability;
mod router;
mod shutdown;
mod state;
mod sweep;
#[cfg(test)]
mod test_helpers;
mod users;

/// Idols JSON API Server entry point
#[tokio::main]
pub async fn main() {
    // Load configuration from .env and CLI arguments
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

    if let Err(init_error) = observability::init_logging(&config) {
        #[expect(
            clippy::print_stderr,
            reason = "logging failed to initialize, must use eprintln"
        )]
        {
            eprintln!("Logging error: {init_error}");
        }

        process::exit(1);
    }

    let auth = match config.auth.settings() {
        Ok(auth) => auth,
        Err(users_error) => {
            error!(
                path = %config.auth.users_file.display(),
                "failed to load users file: {users_error}"
            );

            process::exit(1);
        }
    };

    let app = match AppContext::from_database_url(&config.database.database_url, auth).await {
        Ok(app) => app,
        Err(init_error) => {
            error!("failed to initialize app context: {init_error}");

            process::exit(1);
        }
    };

    let _sweep = config
        .auth
        .sweep_interval()
        .map(|period| sweep::spawn_token_sweep(&app.tokens, period));

    let addr = config.socket_addr();

    info!("Starting server on {addr}");

    // Bind server
    let listener = TcpListener::new(addr).bind().await;

    let service = router::service(
        State::from_app_context(app),
        router::with_docs(router::app_router()),
    );

    let server = Server::new(listener);

    let handle = server.handle();

    // Listen for shutdown signal
    tokio::spawn(async move {
        if let Err(error) = shutdown::listen(handle).await {
            error!("failed to listen for shutdown signal: {error}");
        }
    });

    // Start serving requests
    server.serve(service).await;
}
