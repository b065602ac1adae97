use std::fmt;

/// Environment variable holding the OpenAI credential
pub const OPENAI_API_KEY_VAR: &str = "OPENAI_API_KEY";

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CredentialError {
    #[error("OpenAI API key not found. Set {0} in the environment or in a .env file.")]
    MissingCredential(&'static str),
}

/// API key for the speech endpoint. The value never shows up in `Debug` output.
#[derive(Clone, PartialEq)]
pub struct ApiKey(String);

impl ApiKey {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey(***)")
    }
}

/// Resolve the API key through `lookup`.
///
/// Unset and whitespace-only values are both treated as missing, since a
/// request made with either would only fail at the provider.
pub fn resolve<F>(lookup: F) -> Result<ApiKey, CredentialError>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(OPENAI_API_KEY_VAR)
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
        .map(ApiKey)
        .ok_or(CredentialError::MissingCredential(OPENAI_API_KEY_VAR))
}

/// Resolve the API key from the process environment
pub fn resolve_from_env() -> Result<ApiKey, CredentialError> {
    resolve(|name| std::env::var(name).ok())
}
