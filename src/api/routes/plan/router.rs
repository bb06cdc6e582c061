//! Router for the garden plan API

use std::sync::{Arc, RwLock};

use axum::{
    Router,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::post,
};

use super::public;
use crate::api::state::AppState;
use crate::planner::{GardenPlanRequest, PLAN_ERROR_MESSAGE, generate_garden_plan};

type SharedState = Arc<RwLock<AppState>>;

/// Generate a garden plan from the submitted specifications
async fn plan_handler(
    State(state): State<SharedState>,
    axum::Json(payload): axum::Json<GardenPlanRequest>,
) -> Result<impl IntoResponse, crate::api::public::ApiError> {
    let (client, model) = {
        let shared_state = state.read().expect("Unable to read shared state");
        (
            shared_state.client.clone(),
            shared_state.config.planner_model.clone(),
        )
    };

    match generate_garden_plan(&client, &model, &payload).await {
        Ok(plan) => Ok(axum::Json(plan).into_response()),
        Err(e) => {
            // The user only sees the fixed message; keep the cause in
            // the logs
            tracing::error!("Failed to generate plan: {}", e);
            Ok((
                StatusCode::BAD_GATEWAY,
                axum::Json(public::PlanErrorResponse {
                    error: PLAN_ERROR_MESSAGE.to_string(),
                }),
            )
                .into_response())
        }
    }
}

/// Create the plan router
pub fn router() -> Router<SharedState> {
    Router::new().route("/", post(plan_handler))
}
