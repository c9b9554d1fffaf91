use crate::{models::Verb, AppState};
use axum::{extract::State, Json};
use std::sync::Arc;

/// The catalog new games draw from
pub async fn list_verbs(State(state): State<Arc<AppState>>) -> Json<Vec<Verb>> {
    Json(state.verbs.verbs().to_vec())
}
