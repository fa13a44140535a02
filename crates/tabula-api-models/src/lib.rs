#![forbid(unsafe_code)]
#![deny(
    warnings,
    dead_code,
    unused,
    unused_imports,
    unused_must_use,
    unreachable_pub,
    clippy::all,
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    rustdoc::broken_intra_doc_links,
    rustdoc::bare_urls,
    missing_docs
)]
//! Shared HTTP DTOs for the Tabula report service API.
//!
//! These types are the single encoding of the wire contract consumed by the
//! web client: auth bodies, the `{status, data, message}` envelopes, and the
//! claims embedded in the session token. Token decoding here is purely
//! local: it extracts claims without verifying the signature; validity is
//! only ever established server-side.
use base64::{Engine as _, engine::general_purpose};
use chrono::{DateTime, NaiveDateTime};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Status marker the server places on every envelope it emits.
pub const STATUS_SUCCESS: &str = "success";

/// Credentials submitted to `POST /api/auth/login`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LoginRequest {
    /// Account email address.
    pub email: String,
    /// Account password, sent in clear over TLS.
    pub password: String,
}

/// Body submitted to `POST /api/auth/register`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RegisterRequest {
    /// Account email address.
    pub email: String,
    /// Account password.
    pub password: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    /// Optional display name.
    pub name: Option<String>,
}

/// Successful response from either auth endpoint.
///
/// The server sends additional bookkeeping fields alongside the token; the
/// client only consumes the credential itself.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AuthResponse {
    /// Signed session token to persist and attach as a bearer credential.
    pub token: String,
}

/// Selectable report template reference data.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Template {
    /// Stable template identifier.
    pub id: i64,
    /// Display name.
    pub name: String,
    /// Short description of the report the template produces.
    pub description: String,
    #[serde(default)]
    /// Optional icon glyph; the client falls back to a default when absent.
    pub icon: Option<String>,
}

/// `data` payload of the template catalog envelope.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TemplateList {
    /// All templates selectable by the current user.
    pub templates: Vec<Template>,
}

/// Envelope returned by `GET /api/templates`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TemplatesEnvelope {
    /// Envelope status marker.
    pub status: String,
    #[serde(default)]
    /// Catalog payload, present on success.
    pub data: Option<TemplateList>,
    #[serde(default)]
    /// Optional human-readable detail, populated on failure.
    pub message: Option<String>,
}

impl TemplatesEnvelope {
    /// Whether the envelope carries the success marker.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.status == STATUS_SUCCESS
    }
}

/// Response from `POST /api/reports/upload`.
///
/// On success the server supplies `report_id` when analysis completed
/// synchronously, or only `file_id` when the upload was stored without a
/// report. A success with neither identifier is a contract violation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UploadResponse {
    /// Envelope status marker.
    pub status: String,
    #[serde(default)]
    /// Identifier of the generated report, when produced synchronously.
    pub report_id: Option<i64>,
    #[serde(default)]
    /// Identifier of the stored upload.
    pub file_id: Option<i64>,
    #[serde(default)]
    /// Optional human-readable detail.
    pub message: Option<String>,
}

impl UploadResponse {
    /// Whether the envelope carries the success marker.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.status == STATUS_SUCCESS
    }
}

/// Full report payload fetched by id.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Report {
    /// Stable report identifier.
    pub id: i64,
    /// Original filename of the uploaded dataset.
    pub filename: String,
    #[serde(default)]
    /// Upload timestamp in ISO-8601, as emitted by the server.
    pub upload_date: Option<String>,
    #[serde(default)]
    /// Analytical payload (summary statistics, visualization specs, AI
    /// analysis). Opaque to the client core; only presence is checked.
    pub report_data: serde_json::Value,
}

impl Report {
    /// Upload timestamp formatted for display, falling back to the raw
    /// server string when it does not parse.
    #[must_use]
    pub fn upload_date_label(&self) -> String {
        let Some(raw) = self.upload_date.as_deref() else {
            return "-".to_string();
        };
        DateTime::parse_from_rfc3339(raw)
            .map(|ts| ts.format("%Y-%m-%d %H:%M").to_string())
            .or_else(|_| {
                NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
                    .map(|ts| ts.format("%Y-%m-%d %H:%M").to_string())
            })
            .unwrap_or_else(|_| raw.to_string())
    }
}

/// `data` payload of the single-report envelope.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct ReportBody {
    #[serde(default)]
    /// The report itself; absent when the fetch succeeded without a body.
    pub report: Option<Report>,
}

/// Envelope returned by `GET /api/reports/{id}`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ReportEnvelope {
    /// Envelope status marker.
    pub status: String,
    #[serde(default)]
    /// Report payload, present on success.
    pub data: Option<ReportBody>,
    #[serde(default)]
    /// Optional human-readable detail, populated on failure.
    pub message: Option<String>,
}

impl ReportEnvelope {
    /// Whether the envelope carries the success marker.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.status == STATUS_SUCCESS
    }
}

/// One row of the report history listing.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ReportSummary {
    /// Identifier of the generated report.
    pub report_id: i64,
    /// Identifier of the uploaded source file.
    pub file_id: i64,
    /// Original filename of the uploaded dataset.
    pub filename: String,
    #[serde(default)]
    /// Upload timestamp in ISO-8601.
    pub upload_date: Option<String>,
    #[serde(default)]
    /// Processing status of the upload.
    pub status: Option<String>,
    #[serde(default)]
    /// Report generation timestamp in ISO-8601.
    pub report_date: Option<String>,
}

/// `data` payload of the report history envelope.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct ReportList {
    /// Reports belonging to the current user, most recent first.
    pub reports: Vec<ReportSummary>,
}

/// Envelope returned by `GET /api/reports`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ReportListEnvelope {
    /// Envelope status marker.
    pub status: String,
    #[serde(default)]
    /// History payload, present on success.
    pub data: Option<ReportList>,
    #[serde(default)]
    /// Optional human-readable detail, populated on failure.
    pub message: Option<String>,
}

impl ReportListEnvelope {
    /// Whether the envelope carries the success marker.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.status == STATUS_SUCCESS
    }
}

/// Failure body attached to non-2xx responses.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct ErrorBody {
    #[serde(default)]
    /// Diagnostic detail for unexpected server failures.
    pub error: Option<String>,
    #[serde(default)]
    /// Human-readable failure description.
    pub message: Option<String>,
}

impl ErrorBody {
    /// Best server-supplied detail: `error` wins over `message`.
    #[must_use]
    pub fn detail(&self) -> Option<&str> {
        self.error.as_deref().or_else(|| self.message.as_deref())
    }
}

/// Claims embedded in the session token payload.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TokenClaims {
    /// Account identifier.
    pub user_id: i64,
    /// Account email address.
    pub email: String,
    #[serde(default)]
    /// Optional display name.
    pub name: Option<String>,
    #[serde(default)]
    /// Expiry as a Unix timestamp. Carried for completeness; expiry is
    /// discovered via a 401, never checked ahead of a request.
    pub exp: Option<i64>,
}

/// Reasons a token could not be decoded locally.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TokenDecodeError {
    /// The token did not have the expected three dot-separated segments.
    #[error("malformed token")]
    MalformedToken,
    /// The payload segment was not valid URL-safe base64.
    #[error("invalid token encoding")]
    InvalidEncoding,
    /// The payload decoded but its claims did not match the expected shape.
    #[error("invalid token claims")]
    InvalidClaims,
}

/// Decode the claims segment of a session token without verifying it.
///
/// # Errors
/// Returns a [`TokenDecodeError`] when the token is not three segments, the
/// payload is not URL-safe base64, or the claims JSON lacks required fields.
pub fn decode_claims(token: &str) -> Result<TokenClaims, TokenDecodeError> {
    let mut segments = token.split('.');
    let payload = match (segments.next(), segments.next(), segments.next()) {
        (Some(_), Some(payload), Some(_)) if segments.next().is_none() => payload,
        _ => return Err(TokenDecodeError::MalformedToken),
    };
    let bytes = general_purpose::URL_SAFE_NO_PAD
        .decode(payload)
        .map_err(|_| TokenDecodeError::InvalidEncoding)?;
    serde_json::from_slice(&bytes).map_err(|_| TokenDecodeError::InvalidClaims)
}

#[cfg(test)]
mod tests {
    use super::{
        ErrorBody, Report, ReportEnvelope, TokenClaims, TokenDecodeError, UploadResponse,
        decode_claims,
    };
    use base64::{Engine as _, engine::general_purpose};

    fn token_with_payload(payload: &str) -> String {
        let encode = |part: &str| general_purpose::URL_SAFE_NO_PAD.encode(part);
        format!(
            "{}.{}.{}",
            encode(r#"{"alg":"HS256","typ":"JWT"}"#),
            encode(payload),
            encode("signature")
        )
    }

    #[test]
    fn decode_extracts_expected_claims() {
        let token = token_with_payload(
            r#"{"user_id":7,"email":"a@b.com","name":"Ada","exp":1900000000}"#,
        );
        let claims = decode_claims(&token).expect("claims should decode");
        assert_eq!(
            claims,
            TokenClaims {
                user_id: 7,
                email: "a@b.com".to_string(),
                name: Some("Ada".to_string()),
                exp: Some(1_900_000_000),
            }
        );
    }

    #[test]
    fn decode_tolerates_missing_optional_claims() {
        let token = token_with_payload(r#"{"user_id":3,"email":"x@y.z"}"#);
        let claims = decode_claims(&token).expect("claims should decode");
        assert_eq!(claims.name, None);
        assert_eq!(claims.exp, None);
    }

    #[test]
    fn decode_rejects_wrong_segment_count() {
        assert_eq!(
            decode_claims("only-one-segment"),
            Err(TokenDecodeError::MalformedToken)
        );
        assert_eq!(decode_claims("a.b"), Err(TokenDecodeError::MalformedToken));
        assert_eq!(
            decode_claims("a.b.c.d"),
            Err(TokenDecodeError::MalformedToken)
        );
    }

    #[test]
    fn decode_rejects_bad_encoding_and_bad_claims() {
        assert_eq!(
            decode_claims("head.!!not-base64!!.sig"),
            Err(TokenDecodeError::InvalidEncoding)
        );
        let missing_email = token_with_payload(r#"{"user_id":1}"#);
        assert_eq!(
            decode_claims(&missing_email),
            Err(TokenDecodeError::InvalidClaims)
        );
        let not_json = token_with_payload("plain text");
        assert_eq!(decode_claims(&not_json), Err(TokenDecodeError::InvalidClaims));
    }

    #[test]
    fn upload_response_variants_deserialize() {
        let ready: UploadResponse =
            serde_json::from_str(r#"{"status":"success","report_id":42,"file_id":9}"#)
                .expect("upload response");
        assert!(ready.is_success());
        assert_eq!(ready.report_id, Some(42));

        let stored: UploadResponse =
            serde_json::from_str(r#"{"status":"success","file_id":9}"#).expect("upload response");
        assert_eq!(stored.report_id, None);
        assert_eq!(stored.file_id, Some(9));

        let failed: UploadResponse =
            serde_json::from_str(r#"{"status":"error","message":"bad sheet"}"#)
                .expect("upload response");
        assert!(!failed.is_success());
        assert_eq!(failed.message.as_deref(), Some("bad sheet"));
    }

    #[test]
    fn report_envelope_without_report_is_distinguishable() {
        let empty: ReportEnvelope =
            serde_json::from_str(r#"{"status":"success","data":{}}"#).expect("report envelope");
        assert!(empty.is_success());
        assert!(empty.data.expect("data").report.is_none());
    }

    #[test]
    fn error_body_prefers_error_over_message() {
        let both = ErrorBody {
            error: Some("trace detail".to_string()),
            message: Some("friendly".to_string()),
        };
        assert_eq!(both.detail(), Some("trace detail"));
        let message_only = ErrorBody {
            error: None,
            message: Some("friendly".to_string()),
        };
        assert_eq!(message_only.detail(), Some("friendly"));
        assert_eq!(ErrorBody::default().detail(), None);
    }

    #[test]
    fn upload_date_label_handles_naive_and_missing_timestamps() {
        let report = Report {
            id: 1,
            filename: "q3.xlsx".to_string(),
            upload_date: Some("2025-04-01T09:30:00.123456".to_string()),
            report_data: serde_json::Value::Null,
        };
        assert_eq!(report.upload_date_label(), "2025-04-01 09:30");

        let missing = Report {
            upload_date: None,
            ..report
        };
        assert_eq!(missing.upload_date_label(), "-");
    }
}
