//! Analysis state machine.
//!
//! ```text
//!            begin()               Ok(text)
//!   Idle ─────────────▶ Pending ─────────────▶ Succeeded(text)
//!    ▲                    │  Err(_)
//!    │ reset()            └────────────────▶ Failed(fallback)
//!    └──────── any state
//! ```
//!
//! Every `begin()` hands out a [`RequestTicket`]. Only the ticket of the most
//! recent request can settle the state; older ones are dropped. `reset()`
//! retires the outstanding ticket as well.

use crate::config::FALLBACK_MESSAGE;
use crate::error::MagicResult;

/// Button label while a request is in flight.
pub const LOADING_LABEL: &str = "Magic happening...";

/// Button label when a request can be made.
pub const READY_LABEL: &str = "Make it Magic!";

/// Where the analysis currently stands.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum AnalysisStatus {
    /// Nothing requested, or cleared.
    #[default]
    Idle,
    /// Waiting for the service.
    Pending,
    /// The service described the drawing.
    Succeeded(String),
    /// The request failed; holds the fallback message.
    Failed(String),
}

/// Identifies one analysis request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestTicket(u64);

/// Displayed analysis state: loading flag and latest result.
#[derive(Debug, Clone, Default)]
pub struct AnalysisState {
    status: AnalysisStatus,
    latest: u64,
}

impl AnalysisState {
    /// Start in [`AnalysisStatus::Idle`].
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Enter `Pending`, dropping any previous result.
    pub fn begin(&mut self) -> RequestTicket {
        self.latest += 1;
        self.status = AnalysisStatus::Pending;
        tracing::debug!("Analysis #{} pending", self.latest);
        RequestTicket(self.latest)
    }

    /// Settle the request identified by `ticket`.
    ///
    /// Returns `false` (and changes nothing) when the ticket is no longer the
    /// latest one.
    pub fn settle(&mut self, ticket: RequestTicket, outcome: MagicResult<String>) -> bool {
        if ticket.0 != self.latest || self.status != AnalysisStatus::Pending {
            match outcome {
                Ok(_) => tracing::debug!("Discarding stale analysis #{}", ticket.0),
                Err(e) => tracing::debug!("Discarding stale analysis #{} ({e})", ticket.0),
            }
            return false;
        }

        self.status = match outcome {
            Ok(text) => {
                tracing::debug!("Analysis #{} succeeded", ticket.0);
                AnalysisStatus::Succeeded(text)
            }
            Err(e) => {
                tracing::error!("Error analyzing drawing: {e}");
                AnalysisStatus::Failed(FALLBACK_MESSAGE.to_string())
            }
        };
        true
    }

    /// Return to `Idle`, abandoning any request in flight.
    pub fn reset(&mut self) {
        if self.status == AnalysisStatus::Pending {
            tracing::debug!("Abandoning analysis #{}", self.latest);
        }
        self.latest += 1;
        self.status = AnalysisStatus::Idle;
    }

    /// Current status.
    #[must_use]
    pub fn status(&self) -> &AnalysisStatus {
        &self.status
    }

    /// The text to display, if any.
    #[must_use]
    pub fn result(&self) -> Option<&str> {
        match &self.status {
            AnalysisStatus::Succeeded(text) | AnalysisStatus::Failed(text) => Some(text),
            AnalysisStatus::Idle | AnalysisStatus::Pending => None,
        }
    }

    /// Whether a request is in flight.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.status == AnalysisStatus::Pending
    }

    /// Whether the analyze action should be enabled.
    #[must_use]
    pub fn can_analyze(&self) -> bool {
        !self.is_loading()
    }

    /// Label for the analyze button.
    #[must_use]
    pub fn button_label(&self) -> &'static str {
        if self.is_loading() {
            LOADING_LABEL
        } else {
            READY_LABEL
        }
    }
}
