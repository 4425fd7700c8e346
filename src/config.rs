use std::fmt;

/// Environment variable holding the provider API key.
pub const ENV_API_KEY: &str = "OPENAI_API_KEY";
/// Environment variable holding the model identifier.
pub const ENV_MODEL: &str = "OPENAI_MODEL";
/// Environment variable holding the provider base URL (without `/v1`).
pub const ENV_BASE_URL: &str = "OPENAI_BASE_URL";

/// Model provider settings, read once at process start and shared read-only afterwards.
///
/// Construction never fails: absent variables become empty strings and every request
/// is then answered with the missing-configuration error (see `crate::generate`).
#[derive(Clone, Default, PartialEq, Eq)]
pub struct ProviderConfig {
    pub api_key: String,
    pub model: String,
    pub base_url: String,
}

impl ProviderConfig {
    pub fn new(
        api_key: impl Into<String>,
        model: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Self {
        Self {
            api_key: api_key.into(),
            model: model.into(),
            base_url: base_url.into(),
        }
    }

    /// Read `OPENAI_API_KEY`, `OPENAI_MODEL` and `OPENAI_BASE_URL` from the process environment.
    pub fn from_env() -> Self {
        let read = |key: &str| std::env::var(key).unwrap_or_default();
        Self::new(read(ENV_API_KEY), read(ENV_MODEL), read(ENV_BASE_URL))
    }

    /// Names of the required variables that are empty (after trimming), in declaration order.
    pub fn missing(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.api_key.trim().is_empty() {
            missing.push(ENV_API_KEY);
        }
        if self.model.trim().is_empty() {
            missing.push(ENV_MODEL);
        }
        if self.base_url.trim().is_empty() {
            missing.push(ENV_BASE_URL);
        }
        missing
    }

    pub fn is_complete(&self) -> bool {
        self.missing().is_empty()
    }

    /// Full Chat Completions endpoint: `{base_url}/v1/chat/completions`.
    pub fn completions_url(&self) -> String {
        format!(
            "{}/v1/chat/completions",
            self.base_url.trim().trim_end_matches('/')
        )
    }
}

impl fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderConfig")
            .field("api_key", &mask_key(&self.api_key))
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .finish()
    }
}

/// Mask a secret for logs: first and last four characters for long keys, `***` otherwise.
fn mask_key(key: &str) -> String {
    if key.is_empty() {
        return "<empty>".to_string();
    }
    let len = key.chars().count();
    if len <= 8 {
        return "***".to_string();
    }
    let start: String = key.chars().take(4).collect();
    let end: String = key.chars().skip(len - 4).collect();
    format!("{start}…{end}")
}
