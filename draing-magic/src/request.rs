//! Chat completion wire types.
//!
//! Only the subset needed to send one drawing and read one description back.

use draing_core::Snapshot;
use serde::{Deserialize, Serialize};

use crate::config::MagicConfig;
use crate::error::{MagicError, MagicResult};

/// Request body for a single-turn vision completion.
#[derive(Debug, Clone, Serialize)]
pub struct ChatCompletionRequest {
    /// Model identifier.
    pub model: String,
    /// The conversation: always one user message.
    pub messages: Vec<ChatMessage>,
    /// Cap on generated tokens.
    pub max_tokens: u32,
    /// Number of choices to generate.
    pub n: u32,
}

impl ChatCompletionRequest {
    /// Build the request describing `snapshot`.
    #[must_use]
    pub fn for_snapshot(config: &MagicConfig, snapshot: &Snapshot) -> Self {
        Self {
            model: config.model().to_string(),
            messages: vec![ChatMessage {
                role: Role::User,
                content: vec![
                    ContentPart::Text {
                        text: config.prompt().to_string(),
                    },
                    ContentPart::ImageUrl {
                        image_url: ImageUrl {
                            url: snapshot.data_uri(),
                        },
                    },
                ],
            }],
            max_tokens: config.max_tokens(),
            n: 1,
        }
    }
}

/// Message author role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// The person asking.
    User,
}

/// One message with multimodal content.
#[derive(Debug, Clone, Serialize)]
pub struct ChatMessage {
    /// Author role.
    pub role: Role,
    /// Content parts, in order.
    pub content: Vec<ContentPart>,
}

/// A single content part of a message.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentPart {
    /// Instruction text.
    Text {
        /// The text.
        text: String,
    },
    /// Inline image.
    ImageUrl {
        /// Image location (a data URI here).
        image_url: ImageUrl,
    },
}

/// Image reference inside a content part.
#[derive(Debug, Clone, Serialize)]
pub struct ImageUrl {
    /// `data:image/png;base64,...`
    pub url: String,
}

/// Response body of a completion.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatCompletionResponse {
    /// Generated choices.
    #[serde(default)]
    pub choices: Vec<Choice>,
}

/// One generated choice.
#[derive(Debug, Clone, Deserialize)]
pub struct Choice {
    /// The generated message.
    #[serde(default)]
    pub message: Option<ResponseMessage>,
}

/// Message returned in a choice.
#[derive(Debug, Clone, Deserialize)]
pub struct ResponseMessage {
    /// Text content; absent for refusals or tool calls.
    #[serde(default)]
    pub content: Option<String>,
}

impl ChatCompletionResponse {
    /// Take the first choice's text.
    ///
    /// # Errors
    ///
    /// Returns [`MagicError::EmptyResponse`] when there is no choice, no
    /// content, or only whitespace.
    pub fn into_description(self) -> MagicResult<String> {
        self.choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message)
            .and_then(|message| message.content)
            .filter(|content| !content.trim().is_empty())
            .ok_or(MagicError::EmptyResponse)
    }
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    error: ApiErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ApiErrorDetail {
    message: String,
}

/// Extract a readable message from an error response body.
///
/// Falls back to the raw body when it is not the usual `{"error": {...}}` shape.
#[must_use]
pub fn api_error_message(body: &str) -> String {
    serde_json::from_str::<ApiErrorBody>(body)
        .map(|parsed| parsed.error.message)
        .unwrap_or_else(|_| body.trim().to_string())
}
