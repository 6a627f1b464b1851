mod handlers;
mod routes;

use axum::Router;
use runbox_core::{CodeExecutor, ToolchainConfig};
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

pub struct AppState {
    pub executor: CodeExecutor,
}

#[tokio::main]
async fn main() {
    // Initialize tracing subscriber
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"))
        )
        .with_target(false)
        .init();

    info!("Runbox API booting...");

    let config = ToolchainConfig::load_default()
        .expect("Failed to load toolchain configuration");

    info!(
        "Configured languages: {:?}",
        config
            .configured_languages()
            .iter()
            .map(|l| l.to_string())
            .collect::<Vec<_>>()
    );
    info!("Scratch directory: {}", config.scratch_dir.display());
    info!("Execution timeout: {:?}", config.timeout);

    let executor = CodeExecutor::new(config)
        .expect("Failed to create scratch directory");

    let state = Arc::new(AppState { executor });

    // Build router
    let app = Router::new()
        .merge(routes::routes())
        .with_state(state);

    // Start server
    let addr = std::env::var("RUNBOX_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string());
    let listener = TcpListener::bind(&addr).await
        .expect("Failed to bind to address");

    info!("HTTP server listening on {}", addr);
    info!("Ready to accept execution requests");

    axum::serve(listener, app).await
        .expect("Server error");
}
