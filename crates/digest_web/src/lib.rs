use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;

pub mod handlers;
pub mod page;
pub mod state;

pub use state::AppState;

/// Stub backend: serves the page shell and answers the timeframe endpoint
/// from fixtures.
pub fn create_app(state: AppState) -> Router {
    let cors = CorsLayer::permissive();

    Router::new()
        .route("/", get(handlers::index))
        .route("/update_timeframe", post(handlers::update_timeframe))
        .layer(cors)
        .with_state(Arc::new(state))
}

/// Binds `addr` and serves until the process exits. Returns the bound
/// address through `on_bound` so callers can use port 0.
pub async fn serve(addr: SocketAddr, state: AppState, on_bound: impl FnOnce(SocketAddr)) -> anyhow::Result<()> {
    let listener = TcpListener::bind(addr).await?;
    let local = listener.local_addr()?;
    tracing::info!("🌐 Stub backend listening on http://{}", local);
    on_bound(local);
    axum::serve(listener, create_app(state)).await?;
    Ok(())
}

pub mod prelude {
    pub use crate::{create_app, serve, AppState};
    pub use digest_core::{FixtureSet, Timeframe, TimeframeResponse};
}
