//! Public types for the garden plan API
use serde::Serialize;

pub use crate::planner::{GardenPlan, GardenPlanRequest, Plant};

#[derive(Serialize)]
pub struct PlanErrorResponse {
    pub error: String,
}
