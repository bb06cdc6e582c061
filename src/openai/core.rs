use std::time::Duration;

use futures_util::StreamExt;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use thiserror::Error;
use tokio::sync::mpsc;

/// Failures surfaced by the completions client.
#[derive(Debug, Error)]
pub enum BackendError {
    /// The request never produced a usable response: connection
    /// failure, auth rejection, or a non-success status.
    #[error("backend unavailable: {0}")]
    Unavailable(#[from] reqwest::Error),
    /// The service answered but the body did not have the expected
    /// shape.
    #[error("unexpected backend response: {0}")]
    Malformed(String),
    /// A streaming response failed after it started.
    #[error("stream interrupted: {0}")]
    StreamInterrupted(String),
}

#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
pub enum Role {
    #[serde(rename = "system")]
    System,
    #[serde(rename = "assistant")]
    Assistant,
    #[serde(rename = "user")]
    User,
}

#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

impl Message {
    pub fn new(role: Role, content: &str) -> Self {
        Message {
            role,
            content: content.to_string(),
        }
    }
}

/// A `json_schema` response format. The backend's reply is
/// constrained to valid JSON matching the declared schema.
#[derive(Clone, Serialize, Debug)]
pub struct ResponseFormat {
    r#type: String,
    json_schema: JsonSchemaFormat,
}

#[derive(Clone, Serialize, Debug)]
struct JsonSchemaFormat {
    name: String,
    strict: bool,
    schema: Value,
}

impl ResponseFormat {
    pub fn json_schema(name: &str, schema: Value) -> Self {
        Self {
            r#type: String::from("json_schema"),
            json_schema: JsonSchemaFormat {
                name: name.to_string(),
                strict: true,
                schema,
            },
        }
    }
}

// Streaming deltas. Only content deltas carry text; role announcements
// and the final chunk deserialize as `Stop`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Delta {
    Content { content: String },

    Stop {},
}

#[derive(Debug, Deserialize)]
struct CompletionChunkChoice {
    delta: Delta,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CompletionChunk {
    choices: Vec<CompletionChunkChoice>,
}

/// Client for an OpenAI compatible chat completions API.
///
/// Constructed explicitly and injected wherever a completion is
/// needed, so a missing credential fails at startup instead of
/// mid-request.
#[derive(Clone, Debug)]
pub struct Client {
    http: reqwest::Client,
    api_hostname: String,
    api_key: String,
}

impl Client {
    pub fn new(api_hostname: &str, api_key: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_hostname: api_hostname.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        }
    }

    fn completions_url(&self) -> String {
        format!("{}/v1/chat/completions", self.api_hostname)
    }

    /// Request a single completion and return the assistant's reply
    /// as one text blob. When `response_format` is set the backend is
    /// constrained to the declared JSON schema.
    pub async fn completion(
        &self,
        messages: &[Message],
        model: &str,
        response_format: Option<ResponseFormat>,
    ) -> Result<String, BackendError> {
        let mut payload = json!({
            "model": model,
            "messages": messages,
        });
        if let Some(format) = response_format {
            payload["response_format"] = json!(format);
        }

        let response: Value = self
            .http
            .post(self.completions_url())
            .bearer_auth(&self.api_key)
            .header("Content-Type", "application/json")
            .timeout(Duration::from_secs(60 * 10))
            .json(&payload)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        let content = response["choices"][0]["message"]["content"]
            .as_str()
            .ok_or_else(|| {
                BackendError::Malformed(format!("no message content in: {}", response))
            })?;

        Ok(content.to_string())
    }

    /// Request a streamed completion. Each content fragment is
    /// forwarded through `tx` in arrival order and the assembled
    /// reply is returned once the backend signals completion. A
    /// failure after the stream has started is reported as a single
    /// terminal `StreamInterrupted`; the stream is not restartable.
    pub async fn completion_stream(
        &self,
        tx: mpsc::UnboundedSender<String>,
        messages: &[Message],
        model: &str,
    ) -> Result<String, BackendError> {
        let payload = json!({
            "model": model,
            "messages": messages,
            "stream": true,
        });

        let response = self
            .http
            .post(self.completions_url())
            .bearer_auth(&self.api_key)
            .header("Content-Type", "application/json")
            .timeout(Duration::from_secs(60 * 5))
            .json(&payload)
            .send()
            .await?
            .error_for_status()?;

        let mut stream = response.bytes_stream();

        let mut content_buf = String::new();
        let mut buffer = String::new();

        'outer: while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(|e| BackendError::StreamInterrupted(e.to_string()))?;
            let chunk_str = std::str::from_utf8(&chunk)
                .map_err(|e| BackendError::StreamInterrupted(e.to_string()))?;

            // Append new data to the buffer. This is necessary to
            // handle SSE fragmentation over HTTP/2 frames.
            buffer.push_str(chunk_str);

            // Process all complete SSE events from the buffer
            while let Some(event_end) = buffer.find("\n\n") {
                let event_data = buffer[..event_end].to_string();
                buffer = buffer[event_end + 2..].to_string();

                // Skip empty events
                let event_data = event_data.trim();
                if event_data.is_empty() {
                    continue;
                }

                // Parse SSE events
                if !event_data.starts_with("data: ") {
                    continue;
                }

                // Extract the JSON payload (after "data: ")
                let data = event_data[6..].trim();
                if data.is_empty() {
                    continue;
                }

                // Handle the end of the stream
                if data == "[DONE]" {
                    break 'outer;
                }

                let chunk = serde_json::from_str::<CompletionChunk>(data).map_err(|e| {
                    tracing::error!("Parsing completion chunk failed for {}\nError: {}", data, e);
                    BackendError::StreamInterrupted(e.to_string())
                })?;
                let Some(choice) = chunk.choices.first() else {
                    continue;
                };

                match &choice.delta {
                    Delta::Content { content } => {
                        content_buf.push_str(content);
                        // A receiver that hung up is not an error;
                        // the assembled reply is still returned.
                        let _ = tx.send(content.clone());
                        if choice.finish_reason.is_some() {
                            break 'outer;
                        }
                    }
                    Delta::Stop {} => {
                        if choice.finish_reason.is_some() {
                            break 'outer;
                        }
                    }
                }
            }
        }

        Ok(content_buf)
    }
}
