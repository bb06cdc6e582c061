use anyhow::Result;

use crate::core::AppConfig;
use crate::openai::Client;
use crate::planner::{FormState, GardenPlanRequest, PlannerForm, generate_garden_plan};

pub async fn run(
    size: String,
    sunlight: String,
    location: String,
    preference: String,
) -> Result<()> {
    let config = AppConfig::from_env()?;
    let client = Client::new(&config.api_hostname, &config.api_key);

    let mut form = PlannerForm::new();
    form.fields = GardenPlanRequest {
        size,
        sunlight_exposure: sunlight,
        location,
        preference,
    };

    let request = form.submit();
    let result = generate_garden_plan(&client, &config.planner_model, &request).await;
    form.resolve(result);

    match form.state() {
        FormState::Success => {
            let plan = form.plan().expect("Success state retains a plan");
            println!("Theme: {}\n", plan.theme);
            println!("Layout: {}\n", plan.layout_description);
            println!("Plants:");
            for plant in &plan.plants {
                println!("  - {}: {}", plant.name, plant.reason);
            }
        }
        _ => {
            if let Some(error) = form.error() {
                println!("{}", error);
            }
        }
    }

    Ok(())
}
