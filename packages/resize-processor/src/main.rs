use std::net::SocketAddr;
use std::sync::Arc;

use axum::{Router, routing::get};
use resize_core::{Resolver, ResolverConfig, StorageProxyClient};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

mod handler;

#[derive(Clone)]
pub struct AppState {
    pub resolver: Arc<Resolver<StorageProxyClient>>,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let storage = match StorageProxyClient::from_env() {
        Ok(client) => client,
        Err(message) => {
            error!(%message, "storage proxy configuration is incomplete");
            std::process::exit(1);
        }
    };

    let config = ResolverConfig::from_env();
    if config.bucket.is_none() {
        // BUCKET 未設定は起動エラーにしない（各リクエストが 404 になる）
        warn!("BUCKET is not set; all requests will fail with 404");
    }

    let state = AppState {
        resolver: Arc::new(Resolver::new(storage, config)),
    };

    let app = Router::new()
        .route("/healthz", get(handler::health))
        .route("/{*key}", get(handler::resolve_image))
        .with_state(state);

    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(3000);
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    info!(%addr, "resize-processor listening");

    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(listener) => listener,
        Err(err) => {
            error!(%err, "failed to bind listener");
            std::process::exit(1);
        }
    };
    if let Err(err) = axum::serve(listener, app).await {
        error!(%err, "server error");
        std::process::exit(1);
    }
}
