//! Test utilities for integration tests
use std::sync::{Arc, RwLock};

use axum::Router;
use axum::body::Body;

use sprout::api::AppState;
use sprout::api::app;
use sprout::core::AppConfig;

/// Creates a test application router whose LLM backend points at
/// `api_hostname` (a mockito server URL in most tests).
pub fn test_app(api_hostname: &str) -> Router {
    let config = AppConfig {
        api_hostname: api_hostname.to_string(),
        api_key: String::from("test-api-key"),
        chat_model: String::from("gpt-4.1-mini"),
        planner_model: String::from("gpt-4.1-mini"),
    };
    let app_state = AppState::new(config);
    app(Arc::new(RwLock::new(app_state)))
}

pub async fn body_to_string(body: Body) -> String {
    let bytes = axum::body::to_bytes(body, usize::MAX)
        .await
        .expect("Failed to read response body");
    String::from_utf8(bytes.to_vec()).expect("Response body was not valid UTF-8")
}
