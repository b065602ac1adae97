pub mod credentials;

use std::env;
use std::str::FromStr;

use crate::domain::speech::AudioFormat;

pub use credentials::{ApiKey, CredentialError};

pub const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_TTS_MODEL: &str = "gpt-4o-mini-tts";

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub environment: Environment,
    pub log_format: LogFormat,
    // OpenAI speech endpoint
    pub openai_api_key: Result<ApiKey, CredentialError>,
    pub openai_base_url: String,
    pub tts_model: String,
    pub audio_format: AudioFormat,
    pub request_timeout_secs: u64,
    // Page
    pub long_text_warning_chars: usize,
    // Sessions
    pub session_idle_minutes: u64,
    pub session_max_sessions: u64,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Environment {
    Development,
    Production,
}

#[derive(Debug, Clone, PartialEq)]
pub enum LogFormat {
    Pretty,
    Json,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid value for {name}: {value}")]
    Invalid { name: &'static str, value: String },
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build the configuration from an arbitrary variable source
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str, default: &str| lookup(name).unwrap_or_else(|| default.to_string());

        let environment = match var("ENVIRONMENT", "development").as_str() {
            "production" => Environment::Production,
            _ => Environment::Development,
        };
        // Production logs default to JSON
        let log_format = match lookup("LOG_FORMAT").as_deref() {
            Some("json") => LogFormat::Json,
            Some(_) => LogFormat::Pretty,
            None if environment == Environment::Production => LogFormat::Json,
            None => LogFormat::Pretty,
        };

        let config = Config {
            host: var("HOST", "0.0.0.0"),
            port: parse_var("PORT", var("PORT", "8080"))?,
            environment,
            log_format,
            openai_api_key: credentials::resolve(&lookup),
            openai_base_url: var("OPENAI_BASE_URL", DEFAULT_OPENAI_BASE_URL)
                .trim_end_matches('/')
                .to_string(),
            tts_model: var("OPENAI_TTS_MODEL", DEFAULT_TTS_MODEL),
            audio_format: parse_var("TTS_AUDIO_FORMAT", var("TTS_AUDIO_FORMAT", "mp3"))?,
            request_timeout_secs: parse_var(
                "TTS_REQUEST_TIMEOUT_SECS",
                var("TTS_REQUEST_TIMEOUT_SECS", "60"),
            )?,
            long_text_warning_chars: parse_var(
                "TTS_LONG_TEXT_WARNING_CHARS",
                var("TTS_LONG_TEXT_WARNING_CHARS", "4000"),
            )?,
            session_idle_minutes: parse_var(
                "SESSION_IDLE_MINUTES",
                var("SESSION_IDLE_MINUTES", "30"),
            )?,
            session_max_sessions: parse_var(
                "SESSION_MAX_SESSIONS",
                var("SESSION_MAX_SESSIONS", "1000"),
            )?,
        };

        Ok(config)
    }

    pub fn is_development(&self) -> bool {
        self.environment == Environment::Development
    }

    /// Default `EnvFilter` directives when `RUST_LOG` is unset
    pub fn default_log_filter(&self) -> &'static str {
        if self.is_development() {
            "tts_studio=debug,tower_http=debug"
        } else {
            "tts_studio=info,tower_http=info"
        }
    }

    pub fn has_credential(&self) -> bool {
        self.openai_api_key.is_ok()
    }
}

fn parse_var<T: FromStr>(name: &'static str, value: String) -> Result<T, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::Invalid { name, value })
}
