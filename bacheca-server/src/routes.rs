use axum::{routing::{get, post}, Router, Extension};
use std::sync::Arc;

use crate::{AppState, health_with_pool};
use crate::controllers;

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(|Extension(state): Extension<Arc<AppState>>| async move {
            health_with_pool(&state.pool).await
        }))
        .route(
            "/api/groups/:group_id/message",
            get(controllers::get_message).put(controllers::update_message),
        )
        .route("/api/groups/:group_id/editor", get(controllers::find_editor))
        .route("/api/groups/:group_id/board", get(controllers::get_board))
        .route("/api/message/fetch", post(controllers::fetch_message))
        .layer(Extension(state))
}
