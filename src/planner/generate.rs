//! One-shot, schema-constrained garden plan generation.

use serde_json::{Value, json};
use thiserror::Error;

use super::models::{GardenPlan, GardenPlanRequest};
use crate::openai::{BackendError, Client, Message, ResponseFormat, Role};

#[derive(Debug, Error)]
pub enum PlanError {
    #[error(transparent)]
    Backend(#[from] BackendError),
    /// The backend answered but the reply was not valid JSON matching
    /// the plan schema.
    #[error("plan response did not match the expected schema: {0}")]
    Parse(#[from] serde_json::Error),
}

/// The JSON schema the backend's reply is constrained to. All three
/// top-level fields and both per-plant fields are required.
pub fn garden_plan_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "theme": {
                "type": "string",
                "description": "A creative and descriptive name for the garden theme, e.g., 'Mediterranean Sunset' or 'Zen Minimalist'.",
            },
            "plants": {
                "type": "array",
                "description": "A list of recommended plants, including flowers, herbs, and vegetables suitable for the user's conditions.",
                "items": {
                    "type": "object",
                    "properties": {
                        "name": {
                            "type": "string",
                            "description": "The common name of the plant.",
                        },
                        "reason": {
                            "type": "string",
                            "description": "A brief explanation of why this plant is a good choice (e.g., 'Thrives in full sun and attracts pollinators').",
                        },
                    },
                    "required": ["name", "reason"],
                    "additionalProperties": false,
                },
            },
            "layout_description": {
                "type": "string",
                "description": "A paragraph describing a potential layout for the garden, suggesting where to place different types of plants or features.",
            },
        },
        "required": ["theme", "plants", "layout_description"],
        "additionalProperties": false,
    })
}

/// Natural-language prompt embedding the four request fields.
pub fn build_plan_prompt(request: &GardenPlanRequest) -> String {
    format!(
        "Design a rooftop garden plan with the following specifications:\n\
         - Terrace Size: {}\n\
         - Sunlight Exposure: {}\n\
         - Geographic Location: {} (consider climate implications)\n\
         - User Preference: I want a garden that is primarily {}.\n\n\
         Generate a creative theme, a list of suitable plants, and a layout description.",
        request.size, request.sunlight_exposure, request.location, request.preference
    )
}

/// Request a garden plan from the backend and parse the structured
/// reply. The plan is produced atomically from one request; there is
/// no streamed variant.
pub async fn generate_garden_plan(
    client: &Client,
    model: &str,
    request: &GardenPlanRequest,
) -> Result<GardenPlan, PlanError> {
    let prompt = build_plan_prompt(request);
    let messages = vec![Message::new(Role::User, &prompt)];
    let format = ResponseFormat::json_schema("garden_plan", garden_plan_schema());

    let reply = client.completion(&messages, model, Some(format)).await?;
    let plan = serde_json::from_str::<GardenPlan>(reply.trim())?;

    Ok(plan)
}
