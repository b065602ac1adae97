use crate::domain::speech::{AudioFormat, SpeechRequest};
use async_trait::async_trait;

/// Failures of a single provider call
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SpeechClientError {
    #[error("authentication failed: {0}")]
    Authentication(String),
    #[error("rate limited: {0}")]
    RateLimited(String),
    #[error("provider returned {status}: {detail}")]
    Api { status: u16, detail: String },
    #[error("transport error: {0}")]
    Transport(String),
    #[error("provider returned no audio")]
    EmptyAudio,
    #[error("audio response exceeds {limit} bytes")]
    AudioTooLarge { limit: usize },
}

/// Repository for speech synthesis.
/// Abstracts the provider behind the page so the render cycle can be tested
/// without network access.
#[async_trait]
pub trait SpeechRepository: Send + Sync {
    /// Synthesize `request` and return the complete audio payload
    ///
    /// # Errors
    /// Returns error if the provider rejects the call or the response cannot be read
    async fn synthesize(
        &self,
        request: &SpeechRequest,
        format: AudioFormat,
    ) -> Result<Vec<u8>, SpeechClientError>;
}
