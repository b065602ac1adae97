use super::request::RequestError;
use crate::error::AppError;
use crate::infrastructure::repositories::SpeechClientError;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SpeechServiceError {
    #[error("invalid input: {0}")]
    Invalid(#[from] RequestError),
    /// Any failure of the provider call, flattened to a displayable detail
    #[error("{0}")]
    SynthesisFailed(String),
}

impl From<SpeechClientError> for SpeechServiceError {
    fn from(err: SpeechClientError) -> Self {
        SpeechServiceError::SynthesisFailed(err.to_string())
    }
}

impl From<SpeechServiceError> for AppError {
    fn from(err: SpeechServiceError) -> Self {
        match err {
            SpeechServiceError::Invalid(e) => AppError::BadRequest(e.to_string()),
            SpeechServiceError::SynthesisFailed(detail) => AppError::ExternalService(detail),
        }
    }
}
