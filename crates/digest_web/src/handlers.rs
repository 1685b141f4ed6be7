use std::sync::Arc;

use axum::{
    extract::State,
    response::{Html, IntoResponse},
    Form, Json,
};
use digest_core::TimeframeResponse;

use crate::page::render_page;
use crate::AppState;

pub async fn index(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Html(render_page(&state))
}

pub async fn update_timeframe(
    State(state): State<Arc<AppState>>,
    Form(fields): Form<Vec<(String, String)>>,
) -> Json<TimeframeResponse> {
    let timeframe = fields
        .iter()
        .find(|(name, _)| name == "timeframe")
        .map(|(_, value)| value.as_str())
        .unwrap_or("<missing>");
    tracing::info!("Updating timeframe to {}", timeframe);
    Json(state.fixtures.respond(&fields))
}
