//! # drAing Magic
//!
//! The magic wand: sends the current drawing to a vision-capable chat
//! completion service and turns the answer into a short, child-friendly
//! description to display.
//!
//! ## Flow
//!
//! ```text
//! DrawingController ──snapshot──▶ Studio::start_analysis ──▶ PendingAnalysis::run
//!                                      │ (Pending)                │
//!                                      ▼                          ▼
//!                                AnalysisState ◀──settle── DrawingDescriber
//!                                                           (OpenAiDescriber)
//! ```
//!
//! Failures never escape: any error settles the state with a fixed fallback
//! message and is logged once.

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod analysis;
pub mod client;
pub mod config;
pub mod error;
pub mod request;
pub mod studio;

pub use analysis::{AnalysisState, AnalysisStatus, RequestTicket, LOADING_LABEL, READY_LABEL};
pub use client::{DrawingDescriber, OpenAiDescriber};
pub use config::{
    MagicConfig, API_KEY_ENV, DEFAULT_ENDPOINT, DEFAULT_MODEL, FALLBACK_MESSAGE, MAX_TOKENS, PROMPT,
};
pub use error::{MagicError, MagicResult};
pub use request::{ChatCompletionRequest, ChatCompletionResponse};
pub use studio::{PendingAnalysis, Studio};
