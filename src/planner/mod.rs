pub mod form;
pub mod generate;
pub mod models;

pub use form::{FormState, PLAN_ERROR_MESSAGE, PlannerForm};
pub use generate::{PlanError, build_plan_prompt, garden_plan_schema, generate_garden_plan};
pub use models::{GardenPlan, GardenPlanRequest, Plant};
