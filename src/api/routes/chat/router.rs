//! Router for the chat API

use std::convert::Infallible;
use std::sync::{Arc, RwLock};
use std::time::Duration;

use axum::{
    Router,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, sse::Event, sse::KeepAlive, sse::Sse},
    routing::{get, post},
};
use tokio::sync::mpsc;
use tokio_stream::StreamExt as _;
use tokio_stream::wrappers::UnboundedReceiverStream;
use uuid::Uuid;

use super::public;
use crate::api::state::AppState;
use crate::assistant::{ChatSession, SessionState, run_turn};

type SharedState = Arc<RwLock<AppState>>;

/// Create a new chat session seeded with the assistant's greeting
async fn create_session(
    State(state): State<SharedState>,
) -> Result<impl IntoResponse, crate::api::public::ApiError> {
    let id = Uuid::new_v4().to_string();
    let session = ChatSession::new();
    let transcript = session.messages().to_vec();

    let mut shared_state = state.write().expect("Unable to write shared state");
    shared_state
        .sessions
        .insert(id.clone(), Arc::new(std::sync::Mutex::new(session)));

    Ok(axum::Json(public::ChatSessionResponse { id, transcript }))
}

/// List the ids of all active chat sessions
async fn session_list(
    State(state): State<SharedState>,
) -> Result<axum::Json<public::ChatSessionsResponse>, crate::api::public::ApiError> {
    let shared_state = state.read().expect("Unable to read shared state");
    let mut sessions: Vec<String> = shared_state.sessions.keys().cloned().collect();
    sessions.sort();

    Ok(axum::Json(public::ChatSessionsResponse { sessions }))
}

/// Get a single session's transcript by ID
async fn session_transcript(
    State(state): State<SharedState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, crate::api::public::ApiError> {
    let session = {
        let shared_state = state.read().expect("Unable to read shared state");
        shared_state.sessions.get(&id).cloned()
    };

    let Some(session) = session else {
        return Ok((
            StatusCode::NOT_FOUND,
            format!("Chat session {} not found", id),
        )
            .into_response());
    };

    let transcript = session
        .lock()
        .expect("Chat session lock poisoned")
        .messages()
        .to_vec();

    Ok(axum::Json(public::ChatSessionResponse { id, transcript }).into_response())
}

/// Add to a chat session and stream the reply as SSE text fragments
async fn chat_handler(
    State(state): State<SharedState>,
    axum::Json(payload): axum::Json<public::ChatRequest>,
) -> Result<impl IntoResponse, crate::api::public::ApiError> {
    let (session, client, model) = {
        let shared_state = state.read().expect("Unable to read shared state");
        let Some(session) = shared_state.sessions.get(&payload.session_id).cloned() else {
            return Ok((
                StatusCode::NOT_FOUND,
                format!("Chat session {} not found", payload.session_id),
            )
                .into_response());
        };
        (
            session,
            shared_state.client.clone(),
            shared_state.config.chat_model.clone(),
        )
    };

    if payload.message.trim().is_empty() {
        return Ok((StatusCode::BAD_REQUEST, "Message is empty".to_string()).into_response());
    }

    // No queueing: while a reply is streaming, further submissions
    // for the session are rejected
    {
        let session = session.lock().expect("Chat session lock poisoned");
        if session.state() != SessionState::Idle {
            return Ok((
                StatusCode::CONFLICT,
                "A reply is already streaming for this session".to_string(),
            )
                .into_response());
        }
    }

    let (tx, rx) = mpsc::unbounded_channel::<String>();
    let sse_stream = UnboundedReceiverStream::new(rx)
        .map(|fragment| Ok::<Event, Infallible>(Event::default().data(fragment)));

    // Get the next reply. Failures are folded into the transcript as
    // the apology by the turn driver; the stream ends when the turn
    // does.
    tokio::spawn(async move {
        if let Err(e) = run_turn(&session, &client, &model, &payload.message, Some(tx)).await {
            // Lost a race with another submission; the guard rejected
            // it without touching the transcript
            tracing::debug!("Chat turn rejected: {}", e);
        }
    });

    let resp = Sse::new(sse_stream)
        .keep_alive(
            KeepAlive::default()
                .text("keep-alive")
                .interval(Duration::from_millis(100)),
        )
        .into_response();

    Ok(resp)
}

/// Create the chat router
pub fn router() -> Router<SharedState> {
    Router::new()
        .route("/", post(chat_handler))
        .route("/sessions", post(create_session).get(session_list))
        .route("/{id}", get(session_transcript))
}
