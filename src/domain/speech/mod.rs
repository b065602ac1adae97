pub mod error;
pub mod format;
pub mod request;
pub mod service;
pub mod voice;

pub use error::SpeechServiceError;
pub use format::AudioFormat;
pub use request::{RequestError, SpeechRequest};
pub use service::{SpeechResult, SpeechService, SpeechServiceApi};
pub use voice::{UnknownVoice, Voice};
