use std::time::Duration;

use clap::Parser;
use metadex::config::{self, ServerArgs};
use metadex::http;
use metadex::service::Service;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::EnvFilter;

const SHUTDOWN_DEADLINE: Duration = Duration::from_secs(10);

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = ServerArgs::parse();

    let default_level = if args.debug { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
        .init();

    let analyzer = config::load_analyzer(&args.conf).unwrap_or_else(|err| {
        tracing::error!(%err, "failed to load analyzer configuration");
        std::process::exit(1);
    });

    let service = Service::new(analyzer);
    let app = http::router(service);

    let bind_addr = if args.addr.starts_with(':') {
        format!("0.0.0.0{}", args.addr)
    } else {
        args.addr.clone()
    };
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!(addr = %bind_addr, "listening");

    let cancel = CancellationToken::new();
    let shutdown_cancel = cancel.clone();
    let serve_task = tokio::spawn(async move {
        axum::serve(listener, app)
            .with_graceful_shutdown(async move { shutdown_cancel.cancelled().await })
            .await
    });

    tokio::signal::ctrl_c().await.ok();
    tracing::info!("received interrupt, draining connections");
    cancel.cancel();

    // `with_graceful_shutdown` otherwise waits for every open connection to
    // close with no bound; enforce the drain deadline ourselves.
    match tokio::time::timeout(SHUTDOWN_DEADLINE, serve_task).await {
        Ok(join_result) => join_result??,
        Err(_) => tracing::warn!("shutdown deadline exceeded, exiting anyway"),
    }

    Ok(())
}
