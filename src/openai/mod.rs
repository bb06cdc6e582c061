pub mod core;
pub use core::{BackendError, Client, Message, ResponseFormat, Role};
