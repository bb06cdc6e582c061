//! The stateful chat session with the Sprout assistant.
//!
//! `ChatSession` is a synchronous state machine over the ordered
//! message list; `run_turn` drives one full turn of it against the
//! completions client, folding streamed fragments into the last
//! message as they arrive.

use std::sync::{Arc, Mutex};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::sync::mpsc;

use super::prompt;
use crate::openai::{Client, Message, Role};

#[derive(Clone, Copy, Serialize, Deserialize, Debug, PartialEq)]
pub enum Author {
    #[serde(rename = "user")]
    User,
    #[serde(rename = "assistant")]
    Assistant,
}

/// One display message in the conversation. The last message's text
/// grows in place while a reply is streaming; nothing is ever
/// removed.
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
pub struct ChatMessage {
    pub author: Author,
    pub text: String,
}

impl ChatMessage {
    pub fn new(author: Author, text: &str) -> Self {
        Self {
            author,
            text: text.to_string(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SessionState {
    Idle,
    AwaitingFirstChunk,
    Streaming,
}

/// Rejections from the submission guard. Backend failures never show
/// up here; those are folded into the transcript as the apology.
#[derive(Debug, Error, PartialEq)]
pub enum TurnError {
    #[error("message is empty")]
    EmptyInput,
    #[error("a reply is already streaming")]
    ReplyInFlight,
}

/// A session shared between the turn driver and readers of the
/// transcript. The lock is only ever held between awaits.
pub type SharedSession = Arc<Mutex<ChatSession>>;

pub struct ChatSession {
    // Wire history sent to the backend, seeded with the system
    // instruction
    transcript: Vec<Message>,
    // Display history, seeded with the greeting
    messages: Vec<ChatMessage>,
    state: SessionState,
}

impl Default for ChatSession {
    fn default() -> Self {
        Self::new()
    }
}

impl ChatSession {
    pub fn new() -> Self {
        Self {
            transcript: vec![Message::new(Role::System, prompt::SYSTEM_PROMPT)],
            messages: vec![ChatMessage::new(Author::Assistant, prompt::GREETING)],
            state: SessionState::Idle,
        }
    }

    pub fn shared() -> SharedSession {
        Arc::new(Mutex::new(Self::new()))
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    /// Wire history for the next completion request.
    pub fn request_messages(&self) -> Vec<Message> {
        self.transcript.clone()
    }

    /// Start a turn: guard the input, record the user message, and
    /// put an empty assistant placeholder in place for the reply.
    pub fn begin_turn(&mut self, input: &str) -> Result<(), TurnError> {
        if input.trim().is_empty() {
            return Err(TurnError::EmptyInput);
        }
        if self.state != SessionState::Idle {
            return Err(TurnError::ReplyInFlight);
        }

        self.transcript.push(Message::new(Role::User, input));
        self.messages.push(ChatMessage::new(Author::User, input));
        self.messages.push(ChatMessage::new(Author::Assistant, ""));
        self.state = SessionState::AwaitingFirstChunk;

        Ok(())
    }

    /// Fold one streamed fragment into the placeholder, in arrival
    /// order.
    pub fn apply_chunk(&mut self, fragment: &str) {
        if let Some(last) = self.messages.last_mut() {
            last.text.push_str(fragment);
        }
        self.state = SessionState::Streaming;
    }

    /// Commit the assembled reply to the wire transcript and return
    /// to `Idle`.
    pub fn complete_turn(&mut self) {
        if let Some(last) = self.messages.last() {
            self.transcript
                .push(Message::new(Role::Assistant, &last.text));
        }
        self.state = SessionState::Idle;
    }

    /// Replace the in-progress reply with the fixed apology. Partial
    /// fragments are discarded; nothing is committed to the wire
    /// transcript for this reply.
    pub fn fail_turn(&mut self) {
        match self.messages.last_mut() {
            Some(last) if last.author == Author::Assistant => {
                last.text = prompt::APOLOGY.to_string();
            }
            _ => self
                .messages
                .push(ChatMessage::new(Author::Assistant, prompt::APOLOGY)),
        }
        self.state = SessionState::Idle;
    }
}

/// Run one full chat turn: submit the user's message, fold streamed
/// fragments into the session as they arrive, and forward each
/// fragment to `observer` when one is given.
///
/// Backend failures are logged and swallowed into the apology
/// message; only the submission guard produces an error, and a
/// rejected submission leaves the message list untouched.
pub async fn run_turn(
    session: &SharedSession,
    client: &Client,
    model: &str,
    input: &str,
    observer: Option<mpsc::UnboundedSender<String>>,
) -> Result<(), TurnError> {
    let history = {
        let mut session = session.lock().expect("Chat session lock poisoned");
        session.begin_turn(input)?;
        session.request_messages()
    };

    let (tx, mut rx) = mpsc::unbounded_channel::<String>();
    let request = {
        let client = client.clone();
        let model = model.to_string();
        tokio::spawn(async move { client.completion_stream(tx, &history, &model).await })
    };

    while let Some(fragment) = rx.recv().await {
        session
            .lock()
            .expect("Chat session lock poisoned")
            .apply_chunk(&fragment);
        if let Some(observer) = &observer {
            let _ = observer.send(fragment);
        }
    }

    let outcome = match request.await {
        Ok(outcome) => outcome,
        Err(e) => Err(crate::openai::BackendError::StreamInterrupted(format!(
            "request task failed: {}",
            e
        ))),
    };

    match outcome {
        Ok(_reply) => {
            session
                .lock()
                .expect("Chat session lock poisoned")
                .complete_turn();
        }
        Err(e) => {
            tracing::error!("Chat turn failed: {}", e);
            session
                .lock()
                .expect("Chat session lock poisoned")
                .fail_turn();
            if let Some(observer) = &observer {
                let _ = observer.send(prompt::APOLOGY.to_string());
            }
        }
    }

    Ok(())
}
