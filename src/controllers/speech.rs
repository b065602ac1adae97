use axum::{
    extract::State,
    http::{HeaderMap, HeaderValue, StatusCode},
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::{
    controllers::page::audio_headers,
    domain::speech::{SpeechRequest, SpeechServiceApi, Voice},
    error::{AppError, AppResult},
    infrastructure::config::CredentialError,
};

/// Request for POST /api/speech
#[derive(Debug, Serialize, Deserialize)]
pub struct SpeechApiRequest {
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub voice: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instructions: Option<String>,
}

pub struct SpeechController {
    speech_service: Result<Arc<dyn SpeechServiceApi>, CredentialError>,
}

impl SpeechController {
    pub fn new(speech_service: Result<Arc<dyn SpeechServiceApi>, CredentialError>) -> Self {
        Self { speech_service }
    }

    /// POST /api/speech - Convert text to speech without touching session state
    pub async fn synthesize(
        State(controller): State<Arc<SpeechController>>,
        Json(request): Json<SpeechApiRequest>,
    ) -> AppResult<(StatusCode, HeaderMap, Vec<u8>)> {
        let speech = controller
            .speech_service
            .as_ref()
            .map_err(|e| AppError::ServiceUnavailable(e.to_string()))?;

        let voice = request
            .voice
            .unwrap_or_else(|| Voice::default().id().to_string());
        let speech_request =
            SpeechRequest::build(&request.text, &voice, request.instructions.as_deref())
                .map_err(|e| AppError::BadRequest(e.to_string()))?;

        let result = speech.synthesize(&speech_request).await?;

        let mut headers = audio_headers(&result, "attachment")?;
        headers.insert(
            "x-character-count",
            HeaderValue::from(speech_request.char_count()),
        );
        headers.insert(
            "x-voice-used",
            HeaderValue::from_static(speech_request.voice.id()),
        );

        Ok((StatusCode::OK, headers, result.audio))
    }
}
