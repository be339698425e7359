//! Turn-based chat session with one outstanding request at a time

use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::warn;

use crate::api::client::AgentGateway;
use crate::types::{ChatMessage, Sender};

/// Transcript opener seeded into every new session
pub const WELCOME_TEXT: &str = "Welcome to Antigravity Finance. I am your trusted system agent. \
How can I assist you with your portfolio today?";

/// Shown in place of any transport failure. The raw error goes to the log,
/// never to the transcript.
pub const FALLBACK_TEXT: &str = "I am having trouble connecting to the core system right now. \
Your capital remains secure. Please try again later.";

/// What happened to one submit call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Agent reply appended
    Replied,
    /// Transport failed; fallback appended
    FellBack,
    /// Blank input, nothing sent
    RejectedEmpty,
    /// A send is already outstanding; the message was not queued
    RejectedPending,
    /// Session closed before or during the send; nothing was applied
    Closed,
}

struct SessionState {
    messages: Vec<ChatMessage>,
    pending: bool,
    next_id: u64,
    generation: u64,
    closed: bool,
}

impl SessionState {
    fn append(&mut self, sender: Sender, text: String) {
        let id = self.next_id;
        self.next_id += 1;
        self.messages.push(ChatMessage { id, sender, text });
    }
}

/// Exactly one logical conversation.
///
/// The session owns its transcript; callers read clones and may only
/// `submit` or `close`. At most one request is outstanding at any time:
/// submitting while a send is pending is rejected, not queued.
pub struct ChatSession {
    gateway: Arc<dyn AgentGateway>,
    state: Mutex<SessionState>,
}

impl ChatSession {
    pub fn new(gateway: Arc<dyn AgentGateway>) -> Self {
        let mut state = SessionState {
            messages: Vec::new(),
            pending: false,
            next_id: 1,
            generation: 0,
            closed: false,
        };
        state.append(Sender::Agent, WELCOME_TEXT.to_string());

        Self {
            gateway,
            state: Mutex::new(state),
        }
    }

    /// Send one user message and append the reply, or the fallback on any
    /// transport failure.
    pub async fn submit(&self, text: &str) -> SubmitOutcome {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return SubmitOutcome::RejectedEmpty;
        }

        let generation = {
            let mut state = self.state.lock().await;
            if state.closed {
                return SubmitOutcome::Closed;
            }
            if state.pending {
                return SubmitOutcome::RejectedPending;
            }
            state.pending = true;
            state.append(Sender::User, trimmed.to_string());
            state.generation
        };

        let result = self.gateway.send_message(trimmed).await;

        let mut state = self.state.lock().await;
        if state.closed || state.generation != generation {
            // Session went away while the request was in flight.
            return SubmitOutcome::Closed;
        }
        state.pending = false;

        match result {
            Ok(reply) => {
                state.append(Sender::Agent, reply);
                SubmitOutcome::Replied
            }
            Err(err) => {
                warn!(error = %err, "agent request failed, appending fallback");
                state.append(Sender::Agent, FALLBACK_TEXT.to_string());
                SubmitOutcome::FellBack
            }
        }
    }

    /// Copy of the transcript in insertion order
    pub async fn transcript(&self) -> Vec<ChatMessage> {
        self.state.lock().await.messages.clone()
    }

    /// True while a send is outstanding
    pub async fn is_pending(&self) -> bool {
        self.state.lock().await.pending
    }

    /// End the session. Idempotent; an in-flight reply arriving after close
    /// is discarded.
    pub async fn close(&self) {
        let mut state = self.state.lock().await;
        state.closed = true;
        state.generation += 1;
    }
}
