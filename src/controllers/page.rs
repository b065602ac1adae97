use axum::{
    extract::State,
    http::{header, HeaderMap, HeaderValue, StatusCode},
    response::Html,
    Extension, Form,
};
use std::sync::Arc;

use crate::{
    controllers::views::{render_halted, render_page, PageView},
    domain::{
        session::{reconcile, RenderOutcome, SpeechForm},
        speech::{AudioFormat, SpeechResult, SpeechServiceApi},
    },
    error::{AppError, AppResult},
    infrastructure::{config::CredentialError, http::RequestId, session::Session},
};

pub struct PageController {
    speech_service: Result<Arc<dyn SpeechServiceApi>, CredentialError>,
    audio_format: AudioFormat,
    long_text_warning_chars: usize,
}

impl PageController {
    pub fn new(
        speech_service: Result<Arc<dyn SpeechServiceApi>, CredentialError>,
        audio_format: AudioFormat,
        long_text_warning_chars: usize,
    ) -> Self {
        Self {
            speech_service,
            audio_format,
            long_text_warning_chars,
        }
    }

    fn render(&self, form: &SpeechForm, outcome: &RenderOutcome) -> Html<String> {
        Html(render_page(&PageView {
            form,
            outcome,
            audio_format: self.audio_format,
            long_text_warning_chars: self.long_text_warning_chars,
        }))
    }

    fn halted(err: &CredentialError) -> (StatusCode, Html<String>) {
        tracing::error!(error = %err, "Page requested without a configured credential");
        (StatusCode::SERVICE_UNAVAILABLE, Html(render_halted(&err.to_string())))
    }

    /// GET / - Redraw the last render cycle without generating
    pub async fn show(
        State(controller): State<Arc<PageController>>,
        Extension(session): Extension<Session>,
    ) -> (StatusCode, Html<String>) {
        if let Err(err) = &controller.speech_service {
            return Self::halted(err);
        }

        let state = session.state.lock().await;
        (StatusCode::OK, controller.render(&state.form, &state.outcome))
    }

    /// POST / - Run one render cycle for the submitted form
    pub async fn submit(
        State(controller): State<Arc<PageController>>,
        Extension(session): Extension<Session>,
        Extension(request_id): Extension<RequestId>,
        Form(form): Form<SpeechForm>,
    ) -> (StatusCode, Html<String>) {
        let speech = match &controller.speech_service {
            Ok(speech) => speech,
            Err(err) => return Self::halted(err),
        };

        let mut state = session.state.lock().await;
        let phase = state.cache.phase(&form.text);

        tracing::info!(
            request_id = %request_id.0,
            session_id = %session.id,
            phase = ?phase,
            text_length = form.text.chars().count(),
            voice = %form.voice,
            "Render cycle"
        );

        let cache = std::mem::take(&mut state.cache);
        let reconciled = reconcile(cache, &form, &**speech).await;
        state.cache = reconciled.cache;
        state.form = form;
        state.outcome = reconciled.outcome;

        if let RenderOutcome::Failed(detail) = &state.outcome {
            tracing::warn!(session_id = %session.id, error = %detail, "Render cycle failed");
        }

        (StatusCode::OK, controller.render(&state.form, &state.outcome))
    }

    /// GET /audio - Cached audio for the player
    pub async fn audio(
        Extension(session): Extension<Session>,
    ) -> AppResult<(StatusCode, HeaderMap, Vec<u8>)> {
        let result = cached_result(&session).await?;
        Ok((StatusCode::OK, audio_headers(&result, "inline")?, result.audio.clone()))
    }

    /// GET /download - Cached audio as an attachment
    pub async fn download(
        Extension(session): Extension<Session>,
    ) -> AppResult<(StatusCode, HeaderMap, Vec<u8>)> {
        let result = cached_result(&session).await?;
        tracing::info!(session_id = %session.id, file_name = %result.file_name, "Audio downloaded");
        Ok((StatusCode::OK, audio_headers(&result, "attachment")?, result.audio.clone()))
    }
}

async fn cached_result(session: &Session) -> AppResult<Arc<SpeechResult>> {
    session
        .state
        .lock()
        .await
        .cache
        .last_result()
        .cloned()
        .ok_or_else(|| AppError::NotFound("No audio has been generated in this session".to_string()))
}

/// Content headers for serving a result, `disposition` being `inline` or `attachment`
pub fn audio_headers(result: &SpeechResult, disposition: &str) -> AppResult<HeaderMap> {
    let mut headers = HeaderMap::new();
    headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static(result.format.mime_type()),
    );
    headers.insert(
        header::CONTENT_DISPOSITION,
        HeaderValue::from_str(&format!(
            "{}; filename=\"{}\"",
            disposition, result.file_name
        ))
        .map_err(|e| AppError::Internal(e.to_string()))?,
    );
    headers.insert(header::CACHE_CONTROL, HeaderValue::from_static("no-store"));
    Ok(headers)
}
