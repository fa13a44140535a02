//! Report history fetch state and pure transitions.

use crate::core::error::ApiError;
use tabula_api_models::{ReportListEnvelope, ReportSummary};

/// Lifecycle of the history fetch.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum HistoryPhase {
    /// Fetch in flight.
    Loading,
    /// History loaded, most recent first.
    Ready(Vec<ReportSummary>),
    /// Fetch failed with a display message.
    Error(String),
}

const LOAD_FAILED: &str = "Failed to load report history";

/// Map a settled history response to the next phase.
#[must_use]
pub fn history_from_envelope(envelope: ReportListEnvelope) -> HistoryPhase {
    if !envelope.is_success() {
        return HistoryPhase::Error(envelope.message.unwrap_or_else(|| LOAD_FAILED.to_string()));
    }
    match envelope.data {
        Some(list) => HistoryPhase::Ready(list.reports),
        None => HistoryPhase::Error(LOAD_FAILED.to_string()),
    }
}

/// Map a gateway failure to the next phase; `None` on session expiry.
#[must_use]
pub fn history_from_error(err: &ApiError) -> Option<HistoryPhase> {
    match err {
        ApiError::SessionExpired => None,
        ApiError::Server { detail: None, .. } => Some(HistoryPhase::Error(LOAD_FAILED.to_string())),
        other => Some(HistoryPhase::Error(other.user_message())),
    }
}
