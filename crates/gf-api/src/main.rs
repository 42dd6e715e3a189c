//! GuardFlow API binary

use gf_api::{build_router, AppState};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let state = AppState::new().await.expect("seeding the store failed");
    let app = build_router(state);

    let addr = std::env::var("GF_LISTEN").unwrap_or_else(|_| "0.0.0.0:8080".into());
    tracing::info!("GuardFlow API listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}
