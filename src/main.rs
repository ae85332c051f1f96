//! A vanity import redirector for Go packages.
//!
//! Features:
//! - Serves go-import/go-source meta pages for an allow-list of repositories
//! - Redirects routed directories and everything else to the canonical host
//! - Caches rendered meta pages with a one hour TTL
//! - Detailed logging with color-coded request IDs

use std::sync::Arc;
use tracing::{Level, info};

use vanity_rs::cli::Cli;
use vanity_rs::handlers::app;
use vanity_rs::state::AppState;

/// Main entry point that configures and runs the redirector
///
/// Sets up:
/// - Structured logging
/// - Configuration from CLI flags and environment
/// - The request router with logging and security header layers
#[tokio::main]
async fn main() {
    // Initialize structured logging with INFO level as default
    tracing_subscriber::fmt().with_max_level(Level::INFO).init();

    let args: Cli = argh::from_env();

    // Bad or missing configuration keeps the listener from ever binding,
    // rather than serving malformed redirect targets.
    let state = match AppState::resolve(args.base_url, args.domain) {
        Ok(state) => Arc::new(state),
        Err(err) => {
            tracing::error!("refusing to start: {err}");
            std::process::exit(1);
        }
    };

    // Log startup information
    info!("Vanity domain: {}", state.domain);
    info!("Redirecting to: {}", state.base_url);
    info!("Server running on: http://{}", args.bind);

    // Start the server
    axum::serve(
        tokio::net::TcpListener::bind(args.bind).await.unwrap(),
        app(state),
    )
    .await
    .unwrap();
}
