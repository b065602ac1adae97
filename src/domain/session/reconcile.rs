use super::cache::SessionCache;
use crate::domain::speech::{SpeechRequest, SpeechResult, SpeechServiceApi, Voice};
use serde::Deserialize;
use std::sync::Arc;

/// Values submitted by the page form
#[derive(Debug, Clone, Deserialize)]
pub struct SpeechForm {
    #[serde(default)]
    pub text: String,
    #[serde(default = "default_voice")]
    pub voice: String,
    #[serde(default)]
    pub instructions: String,
}

fn default_voice() -> String {
    Voice::default().id().to_string()
}

impl Default for SpeechForm {
    fn default() -> Self {
        Self {
            text: String::new(),
            voice: default_voice(),
            instructions: String::new(),
        }
    }
}

/// What a render cycle should show
#[derive(Debug, Clone, Default, PartialEq)]
pub enum RenderOutcome {
    /// No text: prompt for input
    #[default]
    Empty,
    /// Audio matching the current text
    Ready(Arc<SpeechResult>),
    /// Generation was attempted and failed
    Failed(String),
}

#[derive(Debug)]
pub struct Reconciled {
    pub cache: SessionCache,
    pub outcome: RenderOutcome,
    pub regenerated: bool,
}

/// Run one render cycle against the session cache.
///
/// Blank text clears the cache. Text matching the cached input reuses the
/// cached audio without calling `speech`. Anything else builds a request and
/// synthesizes it; the cache only changes when that succeeds.
pub async fn reconcile(
    mut cache: SessionCache,
    form: &SpeechForm,
    speech: &dyn SpeechServiceApi,
) -> Reconciled {
    if form.text.trim().is_empty() {
        if !cache.is_empty() {
            tracing::debug!("Input cleared, discarding cached audio");
        }
        cache.clear();
        return Reconciled {
            cache,
            outcome: RenderOutcome::Empty,
            regenerated: false,
        };
    }

    if !cache.should_regenerate(&form.text) {
        if let Some(result) = cache.last_result().cloned() {
            tracing::debug!(file_name = %result.file_name, "Reusing cached audio");
            return Reconciled {
                cache,
                outcome: RenderOutcome::Ready(result),
                regenerated: false,
            };
        }
    }

    let attempt = match SpeechRequest::build(&form.text, &form.voice, Some(form.instructions.as_str())) {
        Ok(request) => speech.synthesize(&request).await.map_err(|e| e.to_string()),
        Err(e) => Err(e.to_string()),
    };

    match attempt {
        Ok(result) => {
            let result = Arc::new(result);
            cache.store(form.text.clone(), result.clone());
            Reconciled {
                cache,
                outcome: RenderOutcome::Ready(result),
                regenerated: true,
            }
        }
        Err(detail) => Reconciled {
            cache,
            outcome: RenderOutcome::Failed(detail),
            regenerated: false,
        },
    }
}
