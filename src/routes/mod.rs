pub mod health;
pub mod recognize;
pub mod verbs;

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};

use crate::AppState;

pub fn create_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/health", get(health::health_check))
        .nest("/api", api_routes())
}

fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/verbs", get(verbs::list_verbs))
        .route(
            "/recognize-handwriting",
            post(recognize::recognize_handwriting),
        )
}
