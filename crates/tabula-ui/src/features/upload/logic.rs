//! Upload preconditions and response interpretation.
//!
//! # Design
//! - Every precondition is a distinct rejection that short-circuits before
//!   any network call.
//! - Response interpretation is pure: transport success does not imply the
//!   upload succeeded.

use crate::core::error::ApiError;
use crate::features::upload::state::UploadOutcome;
use tabula_api_models::UploadResponse;
use thiserror::Error;

/// Accepted tabular file extensions, matched case-insensitively.
pub const ALLOWED_EXTENSIONS: [&str; 3] = [".xlsx", ".xls", ".csv"];

/// Upload size ceiling in bytes (50 MiB).
pub const MAX_UPLOAD_BYTES: u64 = 50 * 1024 * 1024;

/// Distinct failure modes of the upload workflow.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum UploadError {
    /// Extension outside the tabular allow-list.
    #[error("Invalid file type. Only Excel and CSV files are allowed.")]
    InvalidType,
    /// File larger than [`MAX_UPLOAD_BYTES`].
    #[error("File size exceeds 50MB limit.")]
    TooLarge,
    /// No file has been picked yet.
    #[error("Please select a file first")]
    NoFile,
    /// No template has been chosen yet.
    #[error("Please select a report template first")]
    NoTemplate,
    /// Transport succeeded but the server marked the upload failed.
    #[error("upload rejected by server")]
    Rejected {
        /// Server-supplied detail, when present.
        detail: Option<String>,
    },
    /// The request itself failed; classified by the gateway.
    #[error(transparent)]
    Api(#[from] ApiError),
}

impl UploadError {
    /// Human-readable message for the presentation layer.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Rejected { detail } => detail
                .clone()
                .unwrap_or_else(|| "Upload failed".to_string()),
            Self::Api(err) => err.user_message(),
            other => other.to_string(),
        }
    }
}

/// Validate a picked file against the extension allow-list and size ceiling.
///
/// # Errors
/// Returns [`UploadError::InvalidType`] or [`UploadError::TooLarge`].
pub fn validate_file(name: &str, size_bytes: u64) -> Result<(), UploadError> {
    let extension = name
        .rfind('.')
        .map(|at| name[at..].to_ascii_lowercase())
        .ok_or(UploadError::InvalidType)?;
    if !ALLOWED_EXTENSIONS.contains(&extension.as_str()) {
        return Err(UploadError::InvalidType);
    }
    if size_bytes > MAX_UPLOAD_BYTES {
        return Err(UploadError::TooLarge);
    }
    Ok(())
}

/// Check every submission precondition before any network call.
///
/// # Errors
/// Returns the first violated precondition: missing file, invalid file,
/// or missing template.
pub fn validate_submission(
    file: Option<(&str, u64)>,
    template: Option<i64>,
) -> Result<(), UploadError> {
    let (name, size_bytes) = file.ok_or(UploadError::NoFile)?;
    validate_file(name, size_bytes)?;
    if template.is_none() {
        return Err(UploadError::NoTemplate);
    }
    Ok(())
}

/// Interpret a settled upload response.
///
/// The `status` marker decides success; a successful response must carry a
/// report id (synchronous analysis) or a file id (stored for later).
///
/// # Errors
/// Returns [`UploadError::Rejected`] when the server marked the call
/// failed, or [`ApiError::UnexpectedResponse`] when a success carries
/// neither identifier.
pub fn interpret_upload(response: UploadResponse) -> Result<UploadOutcome, UploadError> {
    if !response.is_success() {
        return Err(UploadError::Rejected {
            detail: response.message,
        });
    }
    if let Some(report_id) = response.report_id {
        return Ok(UploadOutcome::ReportReady { report_id });
    }
    if let Some(file_id) = response.file_id {
        return Ok(UploadOutcome::FileStored { file_id });
    }
    Err(ApiError::UnexpectedResponse.into())
}

#[cfg(test)]
mod tests {
    use super::{
        MAX_UPLOAD_BYTES, UploadError, interpret_upload, validate_file, validate_submission,
    };
    use crate::core::error::ApiError;
    use crate::features::upload::state::UploadOutcome;
    use tabula_api_models::UploadResponse;

    fn response(status: &str, report_id: Option<i64>, file_id: Option<i64>) -> UploadResponse {
        UploadResponse {
            status: status.to_string(),
            report_id,
            file_id,
            message: None,
        }
    }

    #[test]
    fn extensions_outside_allow_list_are_rejected() {
        for name in ["report.pdf", "data.txt", "noextension", "archive.csv.zip"] {
            assert_eq!(validate_file(name, 1024), Err(UploadError::InvalidType), "{name}");
        }
    }

    #[test]
    fn extension_match_is_case_insensitive() {
        assert_eq!(validate_file("Q3.XLSX", 1024), Ok(()));
        assert_eq!(validate_file("data.Csv", 1024), Ok(()));
    }

    #[test]
    fn oversized_files_are_rejected() {
        assert_eq!(
            validate_file("big.csv", MAX_UPLOAD_BYTES + 1),
            Err(UploadError::TooLarge)
        );
        assert_eq!(validate_file("fits.csv", MAX_UPLOAD_BYTES), Ok(()));
    }

    #[test]
    fn submission_preconditions_are_distinct() {
        assert_eq!(validate_submission(None, Some(3)), Err(UploadError::NoFile));
        assert_eq!(
            validate_submission(Some(("a.csv", 10)), None),
            Err(UploadError::NoTemplate)
        );
        assert_eq!(validate_submission(Some(("a.csv", 10)), Some(3)), Ok(()));
    }

    #[test]
    fn synchronous_report_wins_over_file_id() {
        let outcome = interpret_upload(response("success", Some(42), Some(9)))
            .expect("interpretable response");
        assert_eq!(outcome, UploadOutcome::ReportReady { report_id: 42 });
    }

    #[test]
    fn stored_file_without_report_is_reported_as_such() {
        let outcome =
            interpret_upload(response("success", None, Some(9))).expect("interpretable response");
        assert_eq!(outcome, UploadOutcome::FileStored { file_id: 9 });
    }

    #[test]
    fn failed_status_carries_server_message() {
        let mut failed = response("error", None, None);
        failed.message = Some("unsupported sheet".to_string());
        let err = interpret_upload(failed).expect_err("status marks failure");
        assert_eq!(err.user_message(), "unsupported sheet");

        let bare = interpret_upload(response("error", None, None)).expect_err("failure");
        assert_eq!(bare.user_message(), "Upload failed");
    }

    #[test]
    fn success_without_identifiers_is_a_contract_violation() {
        let err = interpret_upload(response("success", None, None)).expect_err("no identifiers");
        assert_eq!(err, UploadError::Api(ApiError::UnexpectedResponse));
    }
}
