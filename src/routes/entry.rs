use std::sync::Arc;

use axum::Router;

use crate::state::AppState;

use super::{health, todos};

pub const API_PREFIX: &str = "/api";

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .merge(health::router())
        .nest(API_PREFIX, todos::router(state))
}
