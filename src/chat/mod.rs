//! Conversational session against the system support agent

pub mod session;

pub use session::{ChatSession, SubmitOutcome, FALLBACK_TEXT, WELCOME_TEXT};
