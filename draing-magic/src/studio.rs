//! The studio: one drawing controller plus its magic wand.
//!
//! Clearing the canvas also clears the description, and analysis reads a
//! snapshot of the canvas. Both cross-component effects live here.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use draing_core::{CanvasResult, DrawingController, RasterSurface, Snapshot, Surface};

use crate::analysis::{AnalysisState, AnalysisStatus, RequestTicket};
use crate::client::DrawingDescriber;
use crate::error::MagicError;

type SharedAnalysis = Arc<Mutex<AnalysisState>>;

fn lock(state: &Mutex<AnalysisState>) -> MutexGuard<'_, AnalysisState> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}

/// A drawing controller wired to a describer.
pub struct Studio<S = RasterSurface> {
    canvas: DrawingController<S>,
    analysis: SharedAnalysis,
    describer: Arc<dyn DrawingDescriber>,
}

impl<S: Surface> Studio<S> {
    /// Combine a controller with a describer.
    #[must_use]
    pub fn new(canvas: DrawingController<S>, describer: Arc<dyn DrawingDescriber>) -> Self {
        Self {
            canvas,
            analysis: Arc::new(Mutex::new(AnalysisState::new())),
            describer,
        }
    }

    /// The drawing controller.
    #[must_use]
    pub fn canvas(&self) -> &DrawingController<S> {
        &self.canvas
    }

    /// Mutable access for drawing and tool changes.
    pub fn canvas_mut(&mut self) -> &mut DrawingController<S> {
        &mut self.canvas
    }

    /// Clear the canvas and the displayed description.
    pub fn clear(&mut self) {
        self.canvas.clear();
        lock(&self.analysis).reset();
    }

    /// Copy of the current analysis state.
    #[must_use]
    pub fn analysis(&self) -> AnalysisState {
        lock(&self.analysis).clone()
    }

    /// Snapshot the canvas and move to `Pending`.
    ///
    /// Returns `None` (and leaves the state alone) when no surface is
    /// mounted. The returned request owns everything it needs, so drawing
    /// can continue while it runs.
    #[must_use]
    pub fn start_analysis(&self) -> Option<PendingAnalysis> {
        let payload = self.canvas.snapshot()?;
        let ticket = lock(&self.analysis).begin();

        Some(PendingAnalysis {
            ticket,
            payload,
            state: Arc::clone(&self.analysis),
            describer: Arc::clone(&self.describer),
        })
    }

    /// Run a full analysis and return the settled status.
    ///
    /// `None` when nothing is mounted.
    pub async fn analyze(&self) -> Option<AnalysisStatus> {
        let pending = self.start_analysis()?;
        Some(pending.run().await)
    }
}

/// An analysis request that has been started but not settled.
pub struct PendingAnalysis {
    ticket: RequestTicket,
    payload: CanvasResult<Snapshot>,
    state: SharedAnalysis,
    describer: Arc<dyn DrawingDescriber>,
}

impl PendingAnalysis {
    /// Call the describer and settle the shared state.
    ///
    /// Returns the status after settling, which belongs to a newer request
    /// if this one went stale meanwhile.
    pub async fn run(self) -> AnalysisStatus {
        let outcome = match self.payload {
            Ok(snapshot) => self.describer.describe(&snapshot).await,
            Err(e) => Err(MagicError::from(e)),
        };

        let mut state = lock(&self.state);
        state.settle(self.ticket, outcome);
        state.status().clone()
    }
}

impl std::fmt::Debug for PendingAnalysis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PendingAnalysis")
            .field("ticket", &self.ticket)
            .finish_non_exhaustive()
    }
}
