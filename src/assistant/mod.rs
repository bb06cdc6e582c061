pub mod prompt;
pub mod session;

pub use session::{
    Author, ChatMessage, ChatSession, SessionState, SharedSession, TurnError, run_turn,
};
