//! Typed request and plan models for the garden planner.
use serde::{Deserialize, Serialize};

/// The four free-text inputs describing the user's space.
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
pub struct GardenPlanRequest {
    pub size: String,
    pub sunlight_exposure: String,
    pub location: String,
    pub preference: String,
}

impl Default for GardenPlanRequest {
    fn default() -> Self {
        Self {
            size: "10x12 ft".to_string(),
            sunlight_exposure: "6-8 hours (Full Sun)".to_string(),
            location: "New York, USA".to_string(),
            preference: "low-maintenance and edible plants".to_string(),
        }
    }
}

#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
pub struct Plant {
    pub name: String,
    pub reason: String,
}

/// A generated garden plan. Every field is required; a reply missing
/// any of them fails to parse.
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
pub struct GardenPlan {
    pub theme: String,
    pub plants: Vec<Plant>,
    pub layout_description: String,
}
