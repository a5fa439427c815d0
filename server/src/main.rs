//! Library server: loads configuration, connects the gateway, ensures the schema and
//! serves the people/books routes until Ctrl-C or SIGTERM.
//!
//! Run from repo root: `cargo run -p library-server`
//! Without a database: `DIALECT=memory SEED_DEMO=true cargo run -p library-server`

use library_api::config::load_dotenv;
use library_api::{app, connect, logging, seed_demo, AppConfig, AppState, Gateway};
use std::sync::Arc;
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // .env before the subscriber, so RUST_LOG from the file applies.
    let env_file = load_dotenv();
    logging::init_tracing();
    if let Some(path) = env_file {
        tracing::debug!(path = %path.display(), "loaded .env");
    }

    let config = AppConfig::from_env()?;
    let gateway = match connect(&config.db).await {
        Ok(gateway) => gateway,
        Err(e) => {
            tracing::error!(error = %e, dsn = %config.db.redacted_dsn(), "could not connect to database");
            return Err(e.into());
        }
    };

    // From here on the gateway is closed on every exit path.
    let result = run(&config, gateway.clone()).await;
    gateway.close().await;
    if let Err(ref e) = result {
        tracing::error!(error = %e, "server stopped with error");
    }
    result
}

async fn run(config: &AppConfig, gateway: Arc<dyn Gateway>) -> Result<(), Box<dyn std::error::Error>> {
    gateway.ensure_schema().await?;
    if config.seed_demo {
        seed_demo(gateway.as_ref()).await?;
    }

    let router = app(AppState::new(gateway));
    let listener = TcpListener::bind(&config.listen_addr).await?;
    tracing::info!("listening on http://{}", listener.local_addr()?);
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    tracing::info!("shutting down");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!(error = %e, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to listen for SIGTERM");
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
}
