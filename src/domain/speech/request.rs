use super::voice::{UnknownVoice, Voice};

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RequestError {
    #[error("text cannot be empty")]
    BlankText,
    #[error(transparent)]
    UnknownVoice(#[from] UnknownVoice),
}

/// A validated synthesis request
#[derive(Debug, Clone, PartialEq)]
pub struct SpeechRequest {
    pub text: String,
    pub voice: Voice,
    pub instructions: Option<String>,
}

impl SpeechRequest {
    /// Validate raw form values into a request.
    ///
    /// `text` is trimmed and must not be blank. `voice` must name one of the
    /// known presets. Blank instructions are dropped so the provider never
    /// sees an empty `instructions` field.
    pub fn build(
        text: &str,
        voice: &str,
        instructions: Option<&str>,
    ) -> Result<SpeechRequest, RequestError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(RequestError::BlankText);
        }

        let voice = voice.parse::<Voice>()?;

        let instructions = instructions
            .filter(|value| !value.trim().is_empty())
            .map(str::to_string);

        Ok(SpeechRequest {
            text: text.to_string(),
            voice,
            instructions,
        })
    }

    pub fn char_count(&self) -> usize {
        self.text.chars().count()
    }
}
