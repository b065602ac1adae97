use super::speech_repository::{SpeechClientError, SpeechRepository};
use crate::domain::speech::{AudioFormat, SpeechRequest, Voice};
use crate::infrastructure::config::ApiKey;
use async_trait::async_trait;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

/// Longest provider error body quoted back to the user
const MAX_ERROR_DETAIL: usize = 300;

/// Largest audio body accepted from the provider
pub const MAX_AUDIO_BYTES: usize = 64 * 1024 * 1024;

/// Body of `POST /audio/speech`
#[derive(Debug, Serialize)]
pub struct SpeechPayload<'a> {
    pub model: &'a str,
    pub voice: Voice,
    pub input: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instructions: Option<&'a str>,
    pub response_format: AudioFormat,
}

impl<'a> SpeechPayload<'a> {
    pub fn new(model: &'a str, request: &'a SpeechRequest, format: AudioFormat) -> Self {
        Self {
            model,
            voice: request.voice,
            input: &request.text,
            instructions: request.instructions.as_deref(),
            response_format: format,
        }
    }
}

#[derive(Debug, Deserialize)]
struct OpenAiErrorBody {
    error: OpenAiErrorDetail,
}

#[derive(Debug, Deserialize)]
struct OpenAiErrorDetail {
    message: String,
}

/// OpenAI implementation of the speech repository
pub struct OpenAiSpeechRepository {
    http_client: reqwest::Client,
    api_key: ApiKey,
    base_url: String,
    model: String,
    timeout: Duration,
    max_audio_bytes: usize,
}

impl OpenAiSpeechRepository {
    pub fn new(api_key: ApiKey, base_url: String, model: String, timeout: Duration) -> Self {
        Self {
            http_client: reqwest::Client::new(),
            api_key,
            base_url,
            model,
            timeout,
            max_audio_bytes: MAX_AUDIO_BYTES,
        }
    }

    pub fn with_max_audio_bytes(mut self, max_audio_bytes: usize) -> Self {
        self.max_audio_bytes = max_audio_bytes;
        self
    }

    fn endpoint(&self) -> String {
        format!("{}/audio/speech", self.base_url)
    }

    /// Read the body chunk by chunk into memory, refusing anything over `limit`
    async fn read_audio(
        mut response: reqwest::Response,
        limit: usize,
    ) -> Result<Vec<u8>, SpeechClientError> {
        let advertised = response.content_length().unwrap_or(0);
        if advertised > limit as u64 {
            return Err(SpeechClientError::AudioTooLarge { limit });
        }

        let mut audio = Vec::with_capacity(advertised as usize);

        while let Some(chunk) = response
            .chunk()
            .await
            .map_err(|e| SpeechClientError::Transport(e.to_string()))?
        {
            if audio.len() + chunk.len() > limit {
                return Err(SpeechClientError::AudioTooLarge { limit });
            }
            audio.extend_from_slice(&chunk);
        }

        if audio.is_empty() {
            return Err(SpeechClientError::EmptyAudio);
        }

        Ok(audio)
    }
}

/// Map a non-success response to the matching error
fn classify_failure(status: StatusCode, body: &str) -> SpeechClientError {
    let detail = error_detail(body);

    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => SpeechClientError::Authentication(detail),
        StatusCode::TOO_MANY_REQUESTS => SpeechClientError::RateLimited(detail),
        _ => SpeechClientError::Api {
            status: status.as_u16(),
            detail,
        },
    }
}

fn error_detail(body: &str) -> String {
    if let Ok(parsed) = serde_json::from_str::<OpenAiErrorBody>(body) {
        return parsed.error.message;
    }

    let trimmed = body.trim();
    if trimmed.is_empty() {
        return "no details provided".to_string();
    }

    trimmed.chars().take(MAX_ERROR_DETAIL).collect()
}

#[async_trait]
impl SpeechRepository for OpenAiSpeechRepository {
    async fn synthesize(
        &self,
        request: &SpeechRequest,
        format: AudioFormat,
    ) -> Result<Vec<u8>, SpeechClientError> {
        let start_time = Instant::now();
        let payload = SpeechPayload::new(&self.model, request, format);

        tracing::info!(
            model = %self.model,
            voice = %request.voice,
            text_length = request.char_count(),
            "Calling OpenAI speech API"
        );

        let response = self
            .http_client
            .post(self.endpoint())
            .bearer_auth(self.api_key.expose())
            .timeout(self.timeout)
            .json(&payload)
            .send()
            .await
            .map_err(|e| {
                tracing::error!(error = %e, model = %self.model, "OpenAI speech request failed");
                SpeechClientError::Transport(e.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let err = classify_failure(status, &body);
            tracing::error!(
                status = status.as_u16(),
                error = %err,
                model = %self.model,
                "OpenAI speech API returned an error"
            );
            return Err(err);
        }

        let audio = Self::read_audio(response, self.max_audio_bytes)
            .await
            .map_err(|e| {
                tracing::error!(error = %e, model = %self.model, "OpenAI speech response rejected");
                e
            })?;

        tracing::info!(
            provider = "openai",
            model = %self.model,
            voice = %request.voice,
            latency_ms = start_time.elapsed().as_millis(),
            audio_size_bytes = audio.len(),
            "OpenAI speech synthesis completed"
        );

        Ok(audio)
    }
}
