//! Router for the catalog API

use std::sync::{Arc, RwLock};

use axum::{Router, response::Json, routing::get};

use super::public;
use crate::api::state::AppState;
use crate::catalog;

type SharedState = Arc<RwLock<AppState>>;

/// List the featured products
async fn products() -> Json<public::ProductsResponse> {
    Json(public::ProductsResponse {
        products: catalog::featured_products(),
    })
}

/// List the available experts
async fn experts() -> Json<public::ExpertsResponse> {
    Json(public::ExpertsResponse {
        experts: catalog::experts(),
    })
}

/// Create the catalog router
pub fn router() -> Router<SharedState> {
    Router::new()
        .route("/products", get(products))
        .route("/experts", get(experts))
}
