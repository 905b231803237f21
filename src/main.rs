use std::process::ExitCode;
use std::sync::Arc;

use alert_relay::config::{Config, ConfigError};
use alert_relay::feed::HttpFeedClient;
use alert_relay::poller::Poller;
use alert_relay::server::{AppState, build_router};
use alert_relay::store::AlertStore;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "alert_relay=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    match run(Config::from_env()).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "Alert relay failed to start");
            ExitCode::FAILURE
        }
    }
}

async fn run(config: Config) -> Result<(), ConfigError> {
    let client = HttpFeedClient::new(config.http_timeout)?;
    let store = Arc::new(AlertStore::new());
    let shutdown = CancellationToken::new();

    tracing::info!(
        feeds = config.poll.feed_urls.len(),
        interval_secs = config.poll.poll_interval.as_secs(),
        "Starting poller"
    );
    let poller = Poller::new(client, Arc::clone(&store), config.poll);
    let poller_task = tokio::spawn(poller.run(shutdown.clone()));

    let listener = tokio::net::TcpListener::bind(config.listen_addr)
        .await
        .map_err(|source| ConfigError::Bind {
            addr: config.listen_addr,
            source,
        })?;
    tracing::info!("listening on {}", config.listen_addr);

    let app = build_router(AppState::new(store, shutdown.clone()));
    let serve_result = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(shutdown.clone()))
        .await;

    shutdown.cancel();
    if let Err(e) = serve_result {
        tracing::error!(error = %e, "Server stopped with error");
    }
    if let Err(e) = poller_task.await {
        tracing::error!(error = %e, "Poller task panicked");
    }

    tracing::info!("Shut down");
    Ok(())
}

/// Resolves on ctrl-c, cancelling `shutdown` so sessions and the poller stop too.
async fn shutdown_signal(shutdown: CancellationToken) {
    tokio::select! {
        result = tokio::signal::ctrl_c() => {
            if let Err(e) = result {
                tracing::error!(error = %e, "Failed to listen for ctrl-c");
            }
            tracing::info!("Shutdown requested");
            shutdown.cancel();
        }
        _ = shutdown.cancelled() => {}
    }
}
