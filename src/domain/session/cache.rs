use crate::domain::speech::SpeechResult;
use std::sync::Arc;

/// Where a session stands relative to the current input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    /// No text entered
    Empty,
    /// Text entered but no matching audio yet
    Pending,
    /// Cached audio was produced from exactly this text
    Ready,
}

/// Last generated audio for one session, keyed by the raw input text
#[derive(Debug, Clone, Default)]
pub struct SessionCache {
    last_input_text: Option<String>,
    last_result: Option<Arc<SpeechResult>>,
}

impl SessionCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last_input_text(&self) -> Option<&str> {
        self.last_input_text.as_deref()
    }

    pub fn last_result(&self) -> Option<&Arc<SpeechResult>> {
        self.last_result.as_ref()
    }

    pub fn is_empty(&self) -> bool {
        self.last_result.is_none()
    }

    /// True when nothing is cached or the cached audio came from other text
    pub fn should_regenerate(&self, current_text: &str) -> bool {
        match (&self.last_result, &self.last_input_text) {
            (Some(_), Some(last)) => last != current_text,
            _ => true,
        }
    }

    /// Replace both the text and the result
    pub fn store(&mut self, text: impl Into<String>, result: Arc<SpeechResult>) {
        self.last_input_text = Some(text.into());
        self.last_result = Some(result);
    }

    pub fn clear(&mut self) {
        self.last_input_text = None;
        self.last_result = None;
    }

    pub fn phase(&self, current_text: &str) -> SessionPhase {
        if current_text.trim().is_empty() {
            SessionPhase::Empty
        } else if self.should_regenerate(current_text) {
            SessionPhase::Pending
        } else {
            SessionPhase::Ready
        }
    }
}
