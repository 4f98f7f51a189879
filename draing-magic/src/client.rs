//! Vision completion client.

use async_trait::async_trait;
use draing_core::Snapshot;
use reqwest::header::AUTHORIZATION;
use reqwest::Client;

use crate::config::MagicConfig;
use crate::error::{MagicError, MagicResult};
use crate::request::{api_error_message, ChatCompletionRequest, ChatCompletionResponse};

/// Something that can describe a drawing.
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
pub trait DrawingDescriber: Send + Sync {
    /// Describe the drawing captured in `snapshot`.
    ///
    /// # Errors
    ///
    /// Returns an error if the service cannot be reached or gives no text.
    async fn describe(&self, snapshot: &Snapshot) -> MagicResult<String>;
}

/// Describes drawings with an OpenAI-compatible chat completion endpoint.
#[derive(Debug, Clone)]
pub struct OpenAiDescriber {
    http: Client,
    config: MagicConfig,
}

impl OpenAiDescriber {
    /// Create a client for the configured endpoint.
    ///
    /// No timeout is set; transport defaults apply.
    ///
    /// # Errors
    ///
    /// Returns [`MagicError::Http`] if the HTTP client fails to build.
    pub fn new(config: MagicConfig) -> MagicResult<Self> {
        let http = Client::builder().build()?;
        Ok(Self { http, config })
    }

    /// The active configuration.
    #[must_use]
    pub fn config(&self) -> &MagicConfig {
        &self.config
    }
}

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl DrawingDescriber for OpenAiDescriber {
    async fn describe(&self, snapshot: &Snapshot) -> MagicResult<String> {
        let request = ChatCompletionRequest::for_snapshot(&self.config, snapshot);
        tracing::debug!(
            "Requesting description of {}x{} drawing from {}",
            snapshot.width(),
            snapshot.height(),
            self.config.model()
        );

        let response = self
            .http
            .post(self.config.endpoint())
            .header(AUTHORIZATION, format!("Bearer {}", self.config.api_key()))
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(MagicError::Api {
                status: status.as_u16(),
                message: api_error_message(&body),
            });
        }

        let completion: ChatCompletionResponse = response.json().await?;
        completion.into_description()
    }
}
