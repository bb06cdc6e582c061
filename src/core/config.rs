use std::env;

use anyhow::{Context, Result};

/// Application configuration sourced from the environment.
///
/// Missing credentials are a constructor-time error so startup fails
/// before any request is made, instead of partway through one.
#[derive(Clone, Debug)]
pub struct AppConfig {
    pub api_hostname: String,
    pub api_key: String,
    pub chat_model: String,
    pub planner_model: String,
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        let api_hostname =
            env::var("SPROUT_LLM_HOST").unwrap_or_else(|_| "https://api.openai.com".to_string());
        let api_key = env::var("OPENAI_API_KEY").context("Missing env var OPENAI_API_KEY")?;
        let chat_model =
            env::var("SPROUT_CHAT_MODEL").unwrap_or_else(|_| "gpt-4.1-mini".to_string());
        let planner_model =
            env::var("SPROUT_PLANNER_MODEL").unwrap_or_else(|_| "gpt-4.1-mini".to_string());

        Ok(Self {
            api_hostname,
            api_key,
            chat_model,
            planner_model,
        })
    }
}
