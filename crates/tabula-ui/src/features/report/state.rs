//! Report fetch lifecycle with stale-settle protection.
//!
//! # Design
//! - Each fetch bumps an epoch; a settle presenting an older epoch is
//!   discarded, so a later-initiated fetch wins even when responses land
//!   out of order.
//! - A settle after teardown is a no-op by the same mechanism.
//! - `Empty` is distinct from `Error` so the presentation layer can offer
//!   "start over" instead of "try again".

use tabula_api_models::Report;

/// Lifecycle of a report fetch.
#[derive(Clone, Debug, PartialEq)]
pub enum ReportPhase {
    /// Fetch in flight.
    Loading,
    /// Report loaded.
    Ready(Report),
    /// Fetch failed with a display message.
    Error(String),
    /// Fetch succeeded but the server returned no report body.
    Empty,
}

/// Fetch state for one report view instance.
#[derive(Clone, Debug, PartialEq)]
pub struct ReportState {
    /// Current fetch lifecycle.
    pub phase: ReportPhase,
    epoch: u64,
}

impl Default for ReportState {
    fn default() -> Self {
        Self {
            phase: ReportPhase::Loading,
            epoch: 0,
        }
    }
}

impl ReportState {
    /// Start a new fetch, invalidating any still-pending one.
    ///
    /// Returns the epoch the settling task must present to [`Self::settle`].
    pub fn begin_fetch(&mut self) -> u64 {
        self.epoch += 1;
        self.phase = ReportPhase::Loading;
        self.epoch
    }

    /// Apply a settled fetch. Stale epochs are discarded; `None` means the
    /// settle carried no transition (session expiry already navigated away).
    pub fn settle(&mut self, epoch: u64, phase: Option<ReportPhase>) {
        if epoch != self.epoch {
            return;
        }
        if let Some(phase) = phase {
            self.phase = phase;
        }
    }
}
