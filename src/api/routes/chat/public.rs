//! Public types for the chat API
use serde::{Deserialize, Serialize};

use crate::assistant::ChatMessage;

#[derive(Deserialize)]
pub struct ChatRequest {
    pub session_id: String,
    pub message: String,
}

#[derive(Serialize)]
pub struct ChatSessionResponse {
    pub id: String,
    pub transcript: Vec<ChatMessage>,
}

#[derive(Serialize)]
pub struct ChatSessionsResponse {
    pub sessions: Vec<String>,
}
