//! Serve command - runs the UDP relay and the HTTP front-end.

use std::sync::Arc;

use tokio::signal::unix::{SignalKind, signal};

use postbox::{
    Config, SystemClock,
    frontend::{self, FrontendState},
    relay::{Relay, RelaySender},
    store::JsonFileStore,
};

/// Run the Postbox server
///
/// The relay runs on a spawned task that is never joined; the HTTP server
/// runs here until SIGINT or SIGTERM.
pub async fn run(config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let store = JsonFileStore::open(&config.storage_dir, &config.data_file).await?;
    tracing::info!("Using message store at {}", store.path().display());

    let relay = Relay::bind(config.relay_addr(), Arc::new(store), Arc::new(SystemClock)).await?;
    let relay_addr = relay.local_addr()?;
    tokio::spawn(async move {
        match relay.run().await {
            Ok(()) => {}
            Err(e) if e.is_store_error() => {
                tracing::error!("Relay stopped, message store is not writable: {e}");
            }
            Err(e) => tracing::error!("Relay stopped, messages are no longer stored: {e}"),
        }
    });

    let sender = RelaySender::bind(relay_addr).await?;
    let state = FrontendState::new(&config.templates_dir, &config.static_dir, sender);
    let app = frontend::router(state, config.max_concurrent_requests);

    let listener = tokio::net::TcpListener::bind(config.http_addr()).await?;
    let local_addr = listener.local_addr()?;
    tracing::info!("HTTP front-end listening on http://{local_addr}");

    println!("Postbox serving on http://{local_addr}");
    println!("Relay listening on udp://{relay_addr}");
    println!();
    println!("Available endpoints:");
    println!("  GET  /              - Home page");
    println!("  GET  /message       - Message form");
    println!("  POST /message       - Submit a message");
    println!("  GET  /static/...    - Static assets");
    println!();
    println!("Press Ctrl+C to shutdown");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    println!("Server shut down");
    Ok(())
}

async fn shutdown_signal() {
    let (mut sigterm, mut sigint) =
        match (signal(SignalKind::terminate()), signal(SignalKind::interrupt())) {
            (Ok(term), Ok(int)) => (term, int),
            (Err(e), _) | (_, Err(e)) => {
                tracing::warn!("Failed to install signal handlers, running until killed: {e}");
                return std::future::pending().await;
            }
        };

    tokio::select! {
        _ = sigterm.recv() => tracing::info!("Received SIGTERM, initiating graceful shutdown..."),
        _ = sigint.recv() => tracing::info!("Received SIGINT, initiating graceful shutdown..."),
    }
}
