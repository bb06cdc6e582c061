use std::collections::HashMap;

use crate::assistant::SharedSession;
use crate::core::AppConfig;
use crate::openai::Client;

pub struct AppState {
    pub config: AppConfig,
    pub client: Client,
    // Active chat sessions by id. Sessions live for the lifetime of
    // the process; there is no persistence.
    pub sessions: HashMap<String, SharedSession>,
}

impl AppState {
    pub fn new(config: AppConfig) -> Self {
        let client = Client::new(&config.api_hostname, &config.api_key);
        Self {
            config,
            client,
            sessions: HashMap::new(),
        }
    }
}
