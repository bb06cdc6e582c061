//! State container for the garden plan form.

use super::generate::PlanError;
use super::models::{GardenPlan, GardenPlanRequest};

/// Fixed user-facing message for any failed plan request. The cause
/// is only logged.
pub const PLAN_ERROR_MESSAGE: &str =
    "Sorry, we couldn't generate a plan. The creative bots might be resting. Please try again.";

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum FormState {
    Editing,
    Submitting,
    Success,
    Failure,
}

/// The editable fields, at most one retained plan, and at most one
/// user-facing error. Re-submission is allowed from any terminal
/// state and clears the prior result.
pub struct PlannerForm {
    pub fields: GardenPlanRequest,
    state: FormState,
    plan: Option<GardenPlan>,
    error: Option<&'static str>,
}

impl Default for PlannerForm {
    fn default() -> Self {
        Self::new()
    }
}

impl PlannerForm {
    pub fn new() -> Self {
        Self {
            fields: GardenPlanRequest::default(),
            state: FormState::Editing,
            plan: None,
            error: None,
        }
    }

    pub fn state(&self) -> FormState {
        self.state
    }

    pub fn plan(&self) -> Option<&GardenPlan> {
        self.plan.as_ref()
    }

    pub fn error(&self) -> Option<&'static str> {
        self.error
    }

    /// Capture the current fields for a request and clear any
    /// previous plan or error.
    pub fn submit(&mut self) -> GardenPlanRequest {
        self.plan = None;
        self.error = None;
        self.state = FormState::Submitting;
        self.fields.clone()
    }

    /// Record the outcome of the submitted request.
    pub fn resolve(&mut self, result: Result<GardenPlan, PlanError>) {
        match result {
            Ok(plan) => {
                self.plan = Some(plan);
                self.state = FormState::Success;
            }
            Err(e) => {
                tracing::error!("Failed to generate plan: {}", e);
                self.error = Some(PLAN_ERROR_MESSAGE);
                self.state = FormState::Failure;
            }
        }
    }
}
