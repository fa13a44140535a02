//! Upload screen state machine.
//!
//! # Design
//! - Exactly one outcome per successful submission; the caller decides the
//!   next screen.
//! - The picked file is kept as plain name/size data so transitions are
//!   testable without DOM `File` handles.

/// Tagged result of a successful upload.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UploadOutcome {
    /// The server completed analysis synchronously.
    ReportReady {
        /// Identifier of the generated report.
        report_id: i64,
    },
    /// The server accepted the file but produced no report yet.
    FileStored {
        /// Identifier of the stored upload.
        file_id: i64,
    },
}

/// Metadata of the locally picked file.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PickedFile {
    /// Filename as reported by the browser.
    pub name: String,
    /// Size in bytes.
    pub size_bytes: u64,
}

/// Lifecycle of one submission attempt.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub enum UploadPhase {
    /// Nothing in flight.
    #[default]
    Idle,
    /// Submission in flight.
    Busy,
    /// Submission settled successfully.
    Done(UploadOutcome),
    /// Submission or a precondition failed with a display message.
    Failed(String),
}

/// Upload screen state: picked file plus the submission lifecycle.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct UploadState {
    /// Current submission lifecycle.
    pub phase: UploadPhase,
    /// The picked file, once one passed validation.
    pub file: Option<PickedFile>,
}

impl UploadState {
    /// Record a file that passed validation and reset any prior failure.
    pub fn accept_file(&mut self, file: PickedFile) {
        self.file = Some(file);
        self.phase = UploadPhase::Idle;
    }

    /// Record a rejected pick or submission with its display message.
    pub fn fail(&mut self, message: String) {
        self.phase = UploadPhase::Failed(message);
    }

    /// Enter the in-flight state.
    pub fn begin(&mut self) {
        self.phase = UploadPhase::Busy;
    }

    /// Record the tagged outcome of a successful submission.
    pub fn finish(&mut self, outcome: UploadOutcome) {
        self.phase = UploadPhase::Done(outcome);
    }

    /// Whether a submission is currently in flight.
    #[must_use]
    pub const fn is_busy(&self) -> bool {
        matches!(self.phase, UploadPhase::Busy)
    }
}

#[cfg(test)]
mod tests {
    use super::{PickedFile, UploadOutcome, UploadPhase, UploadState};

    #[test]
    fn accepting_a_file_clears_previous_failure() {
        let mut state = UploadState::default();
        state.fail("Invalid file type. Only Excel and CSV files are allowed.".to_string());
        assert!(matches!(state.phase, UploadPhase::Failed(_)));

        state.accept_file(PickedFile {
            name: "q3.csv".to_string(),
            size_bytes: 10 * 1024 * 1024,
        });
        assert_eq!(state.phase, UploadPhase::Idle);
        assert_eq!(state.file.as_ref().map(|f| f.name.as_str()), Some("q3.csv"));
    }

    #[test]
    fn submission_lifecycle_reaches_exactly_one_outcome() {
        let mut state = UploadState::default();
        state.accept_file(PickedFile {
            name: "q3.csv".to_string(),
            size_bytes: 1024,
        });
        state.begin();
        assert!(state.is_busy());

        state.finish(UploadOutcome::ReportReady { report_id: 42 });
        assert_eq!(
            state.phase,
            UploadPhase::Done(UploadOutcome::ReportReady { report_id: 42 })
        );
        assert!(!state.is_busy());
    }
}
