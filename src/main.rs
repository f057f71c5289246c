mod auth;
mod config;
mod error;
mod handlers;
mod models;
mod storage;
mod views;
mod voting;

use auth::TokenAuth;
use config::{Config, StorageBackend};
use handlers::AppState;
use log::{error, info};
use models::Poll;
use std::sync::Arc;
use storage::{FileStore, MemoryStore, TallyStore};
use tokio::{net::TcpListener, signal};
use voting::VoteService;

#[tokio::main]
async fn main() {
    // Initialize logging
    dotenvy::dotenv().ok();
    env_logger::init();

    let config = match Config::load() {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            return;
        }
    };

    let store: Arc<dyn TallyStore> = match config.storage {
        StorageBackend::File => Arc::new(FileStore::new(&config.votes_path)),
        StorageBackend::Memory => Arc::new(MemoryStore::new()),
    };
    info!("Using {} storage", store.describe());

    let poll = match Poll::first_coffee() {
        Ok(poll) => poll,
        Err(e) => {
            error!("Invalid poll definition: {}", e);
            return;
        }
    };

    let service = Arc::new(VoteService::new(
        Arc::new(poll),
        store,
        Arc::new(TokenAuth::new(config.reset_token.clone())),
    ));

    if let Err(e) = service.seed_if_empty().await {
        error!("Failed to initialize vote storage: {}", e);
        return;
    }

    let app = handlers::router(AppState::new(service));

    let address = format!("0.0.0.0:{}", config.port);
    let listener = match TcpListener::bind(&address).await {
        Ok(listener) => listener,
        Err(e) => {
            error!("Failed to bind {}: {}", address, e);
            return;
        }
    };
    info!("Poll running on {}", address);

    if let Err(e) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        error!("Server error: {:?}", e);
    }

    info!("Server shut down");
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
        info!("Received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                info!("Received terminate signal, shutting down");
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
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
