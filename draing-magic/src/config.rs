//! Configuration for the vision completion service.

use url::Url;

use crate::error::{MagicError, MagicResult};

/// Environment variable holding the API key.
pub const API_KEY_ENV: &str = "OPENAI_API_KEY";

/// Chat completion endpoint.
pub const DEFAULT_ENDPOINT: &str = "https://api.openai.com/v1/chat/completions";

/// Vision-capable model used for descriptions.
pub const DEFAULT_MODEL: &str = "gpt-4o";

/// Cap on generated tokens per description.
pub const MAX_TOKENS: u32 = 150;

/// Instruction sent alongside every drawing.
pub const PROMPT: &str = "You are a friendly AI assistant for kids. Please describe what you see \
in this drawing in a fun, encouraging way that a child would enjoy. Keep it brief and positive. \
Start with 'I see...' or 'Wow!' or similar enthusiastic opener.";

/// Shown instead of a description whenever the service call fails.
pub const FALLBACK_MESSAGE: &str =
    "Oops! The magic wand needs a little rest. Try again in a moment!";

/// Settings for [`OpenAiDescriber`](crate::OpenAiDescriber).
#[derive(Clone)]
pub struct MagicConfig {
    api_key: String,
    endpoint: String,
    model: String,
    max_tokens: u32,
    prompt: String,
}

impl MagicConfig {
    /// Create a configuration with the given API key and default settings.
    ///
    /// The key is not validated; an empty or wrong key only shows up as a
    /// failed request.
    #[must_use]
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
            model: DEFAULT_MODEL.to_string(),
            max_tokens: MAX_TOKENS,
            prompt: PROMPT.to_string(),
        }
    }

    /// Read the API key from [`API_KEY_ENV`]. A missing variable yields an empty key.
    #[must_use]
    pub fn from_env() -> Self {
        let api_key = std::env::var(API_KEY_ENV).unwrap_or_default();
        if api_key.is_empty() {
            tracing::debug!("{API_KEY_ENV} is not set; requests will be unauthenticated");
        }
        Self::new(api_key)
    }

    /// Point the client at a different completion endpoint.
    ///
    /// # Errors
    ///
    /// Returns [`MagicError::InvalidUrl`] if `endpoint` is not an absolute URL.
    pub fn with_endpoint(mut self, endpoint: &str) -> MagicResult<Self> {
        let url = Url::parse(endpoint).map_err(|e| MagicError::InvalidUrl(e.to_string()))?;
        self.endpoint = url.to_string();
        Ok(self)
    }

    /// Use a different model identifier.
    #[must_use]
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// The API key.
    #[must_use]
    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    /// The completion endpoint.
    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// The model identifier.
    #[must_use]
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Generated token cap.
    #[must_use]
    pub fn max_tokens(&self) -> u32 {
        self.max_tokens
    }

    /// Instruction text.
    #[must_use]
    pub fn prompt(&self) -> &str {
        &self.prompt
    }
}

impl Default for MagicConfig {
    fn default() -> Self {
        Self::from_env()
    }
}

impl std::fmt::Debug for MagicConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MagicConfig")
            .field("api_key", &if self.api_key.is_empty() { "<unset>" } else { "<redacted>" })
            .field("endpoint", &self.endpoint)
            .field("model", &self.model)
            .field("max_tokens", &self.max_tokens)
            .finish_non_exhaustive()
    }
}
