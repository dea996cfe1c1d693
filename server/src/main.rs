//! Server entry point: `users-posts-api start [flags]`.
//!
//! Every flag also reads an environment variable; a `.env` file in the
//! working directory is loaded first.

use clap::Parser;
use tokio::net::TcpListener;
use users_posts_api::{
    api_routes, common_routes_with_ready, connect, ensure_schema, init_tracing, AppState, Cli, Command, ServerConfig,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    match cli.command {
        Command::Start(config) => start(config).await,
    }
}

async fn start(config: ServerConfig) -> Result<(), Box<dyn std::error::Error>> {
    init_tracing(&config.logging)?;

    let pool = connect(&config.postgres).await?;
    tracing::info!(max_connections = config.postgres.max_connections, "connected to postgres");
    if config.apply_schema {
        ensure_schema(&pool).await?;
    }

    let state = AppState::postgres(pool.clone()).await?;
    let app = common_routes_with_ready(pool).merge(api_routes(state));

    let listener = TcpListener::bind(config.listen_addr).await?;
    tracing::info!("users-posts-api listening on {}", listener.local_addr()?);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    tracing::info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "unable to listen for ctrl-c");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "unable to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    tracing::info!("shutdown signal received");
}
