use super::error::SpeechServiceError;
use super::format::AudioFormat;
use super::request::SpeechRequest;
use crate::infrastructure::repositories::SpeechRepository;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Arc;

/// Audio produced by one successful synthesis call
#[derive(Debug, Clone, PartialEq)]
pub struct SpeechResult {
    pub audio: Vec<u8>,
    pub format: AudioFormat,
    pub file_name: String,
    pub generated_at: DateTime<Utc>,
}

impl SpeechResult {
    pub fn new(audio: Vec<u8>, format: AudioFormat, generated_at: DateTime<Utc>) -> Self {
        Self {
            file_name: file_name_for(generated_at, format),
            audio,
            format,
            generated_at,
        }
    }
}

/// `speech_<unix-timestamp>.<ext>`
pub fn file_name_for(generated_at: DateTime<Utc>, format: AudioFormat) -> String {
    format!("speech_{}.{}", generated_at.timestamp(), format.extension())
}

pub struct SpeechService {
    speech_repo: Arc<dyn SpeechRepository>,
    audio_format: AudioFormat,
}

impl SpeechService {
    pub fn new(speech_repo: Arc<dyn SpeechRepository>, audio_format: AudioFormat) -> Self {
        Self {
            speech_repo,
            audio_format,
        }
    }
}

#[async_trait]
pub trait SpeechServiceApi: Send + Sync {
    /// Turn a validated request into audio.
    ///
    /// The call is made once; provider, transport and authentication failures
    /// all come back as `SpeechServiceError::SynthesisFailed`.
    async fn synthesize(&self, request: &SpeechRequest) -> Result<SpeechResult, SpeechServiceError>;
}

#[async_trait]
impl SpeechServiceApi for SpeechService {
    async fn synthesize(&self, request: &SpeechRequest) -> Result<SpeechResult, SpeechServiceError> {
        tracing::info!(
            voice = %request.voice,
            text_length = request.char_count(),
            has_instructions = request.instructions.is_some(),
            format = self.audio_format.extension(),
            "Speech synthesis request"
        );

        let audio = self
            .speech_repo
            .synthesize(request, self.audio_format)
            .await
            .map_err(|e| {
                tracing::warn!(error = %e, voice = %request.voice, "Speech synthesis failed");
                SpeechServiceError::from(e)
            })?;

        let result = SpeechResult::new(audio, self.audio_format, Utc::now());

        tracing::info!(
            file_name = %result.file_name,
            audio_size = result.audio.len(),
            "Speech synthesized"
        );

        Ok(result)
    }
}
