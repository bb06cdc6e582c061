//! Public types for the catalog API
use serde::Serialize;

pub use crate::catalog::{Expert, Product};

#[derive(Serialize)]
pub struct ProductsResponse {
    pub products: Vec<Product>,
}

#[derive(Serialize)]
pub struct ExpertsResponse {
    pub experts: Vec<Expert>,
}
