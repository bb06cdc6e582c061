//! API routes module

pub mod catalog;
pub mod chat;
pub mod plan;

use std::sync::{Arc, RwLock};

use crate::api::state::AppState;
use axum::Router;

type SharedState = Arc<RwLock<AppState>>;

/// Create the combined API router
pub fn router() -> Router<SharedState> {
    Router::new()
        // Chat routes
        .nest("/chat", chat::router())
        // Garden plan routes
        .nest("/plan", plan::router())
        // Catalog routes
        .nest("/catalog", catalog::router())
}
