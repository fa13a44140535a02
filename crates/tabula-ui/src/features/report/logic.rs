//! Report envelope mapping and opaque-payload projection.
//!
//! # Design
//! - The core only checks the payload for presence; shape validation is
//!   deferred to these projection helpers, which degrade to empty output
//!   on anything unexpected.
//! - Error messages follow a fixed priority: server detail, transport
//!   classification, generic fallback.

use crate::core::error::ApiError;
use crate::features::report::state::ReportPhase;
use serde_json::Value;
use tabula_api_models::ReportEnvelope;

const LOAD_FAILED: &str = "Failed to load report";

/// Map a settled report response to the next phase.
///
/// A success without a report body is `Empty`, not an error: the upload
/// exists but nothing can be rendered, so the user should start over
/// rather than retry.
#[must_use]
pub fn phase_from_envelope(envelope: ReportEnvelope) -> ReportPhase {
    if !envelope.is_success() {
        return ReportPhase::Error(envelope.message.unwrap_or_else(|| LOAD_FAILED.to_string()));
    }
    match envelope.data.and_then(|body| body.report) {
        Some(report) => ReportPhase::Ready(report),
        None => ReportPhase::Empty,
    }
}

/// Map a gateway failure to the next phase.
///
/// Returns `None` for session expiry: the gateway already invalidated the
/// session and navigated to login, so no transition is needed here.
#[must_use]
pub fn phase_from_error(err: &ApiError) -> Option<ReportPhase> {
    match err {
        ApiError::SessionExpired => None,
        ApiError::Server { detail: None, .. } => Some(ReportPhase::Error(LOAD_FAILED.to_string())),
        other => Some(ReportPhase::Error(other.user_message())),
    }
}

/// One row of the overview statistics table.
#[derive(Clone, Debug, PartialEq)]
pub struct StatRow {
    /// Column name.
    pub column: String,
    /// Observation count.
    pub count: Option<f64>,
    /// Arithmetic mean.
    pub mean: Option<f64>,
    /// Minimum value.
    pub min: Option<f64>,
    /// Maximum value.
    pub max: Option<f64>,
}

/// Row count advertised by the summary statistics, when present.
#[must_use]
pub fn row_count(report_data: &Value) -> Option<u64> {
    report_data
        .get("summary_stats")?
        .get("row_count")?
        .as_u64()
}

/// Column names advertised by the summary statistics.
#[must_use]
pub fn column_names(report_data: &Value) -> Vec<String> {
    report_data
        .get("summary_stats")
        .and_then(|stats| stats.get("columns"))
        .and_then(Value::as_array)
        .map(|columns| {
            columns
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

/// Per-column numeric statistics projected into table rows.
#[must_use]
pub fn summary_rows(report_data: &Value) -> Vec<StatRow> {
    let Some(stats) = report_data
        .get("summary_stats")
        .and_then(|stats| stats.get("numeric_stats"))
        .and_then(Value::as_object)
    else {
        return Vec::new();
    };
    stats
        .iter()
        .map(|(column, cells)| StatRow {
            column: column.clone(),
            count: cells.get("count").and_then(Value::as_f64),
            mean: cells.get("mean").and_then(Value::as_f64),
            min: cells.get("min").and_then(Value::as_f64),
            max: cells.get("max").and_then(Value::as_f64),
        })
        .collect()
}

/// Natural-language insight lines. Entries may be plain strings or objects
/// carrying a `summary` field; anything else is skipped.
#[must_use]
pub fn insight_lines(report_data: &Value) -> Vec<String> {
    report_data
        .get("summary_stats")
        .and_then(|stats| stats.get("insights"))
        .and_then(Value::as_array)
        .map(|insights| {
            insights
                .iter()
                .filter_map(|entry| {
                    entry
                        .as_str()
                        .or_else(|| entry.get("summary").and_then(Value::as_str))
                        .map(str::to_string)
                })
                .collect()
        })
        .unwrap_or_default()
}

/// Whether the payload carries a non-empty section under `key`.
#[must_use]
pub fn has_section(report_data: &Value, key: &str) -> bool {
    report_data
        .get(key)
        .and_then(Value::as_object)
        .is_some_and(|section| !section.is_empty())
}

#[cfg(test)]
mod tests {
    use super::{
        StatRow, column_names, has_section, insight_lines, phase_from_envelope, phase_from_error,
        row_count, summary_rows,
    };
    use crate::core::error::ApiError;
    use crate::features::report::state::ReportPhase;
    use serde_json::json;
    use tabula_api_models::{Report, ReportBody, ReportEnvelope};

    fn envelope(status: &str, report: Option<Report>, message: Option<&str>) -> ReportEnvelope {
        ReportEnvelope {
            status: status.to_string(),
            data: Some(ReportBody { report }),
            message: message.map(str::to_string),
        }
    }

    #[test]
    fn success_with_report_is_ready() {
        let report = Report {
            id: 42,
            filename: "q3.csv".to_string(),
            upload_date: None,
            report_data: json!({}),
        };
        let phase = phase_from_envelope(envelope("success", Some(report), None));
        let ReportPhase::Ready(loaded) = phase else {
            panic!("expected ready phase");
        };
        assert_eq!(loaded.id, 42);
    }

    #[test]
    fn success_without_report_is_empty_not_error() {
        assert_eq!(
            phase_from_envelope(envelope("success", None, None)),
            ReportPhase::Empty
        );
    }

    #[test]
    fn failure_surfaces_message_with_fallback() {
        assert_eq!(
            phase_from_envelope(envelope("error", None, Some("report purged"))),
            ReportPhase::Error("report purged".to_string())
        );
        assert_eq!(
            phase_from_envelope(envelope("error", None, None)),
            ReportPhase::Error("Failed to load report".to_string())
        );
    }

    #[test]
    fn gateway_errors_map_by_priority() {
        assert_eq!(phase_from_error(&ApiError::SessionExpired), None);
        assert_eq!(
            phase_from_error(&ApiError::Server {
                status: 500,
                detail: Some("worker crashed".to_string()),
            }),
            Some(ReportPhase::Error("worker crashed".to_string()))
        );
        assert_eq!(
            phase_from_error(&ApiError::Unreachable),
            Some(ReportPhase::Error(
                "Server is not responding. Please try again later.".to_string()
            ))
        );
        assert_eq!(
            phase_from_error(&ApiError::MissingToken),
            Some(ReportPhase::Error("No authentication token found".to_string()))
        );
    }

    #[test]
    fn summary_projection_reads_describe_shape() {
        let data = json!({
            "summary_stats": {
                "row_count": 120,
                "columns": ["date", "revenue"],
                "numeric_stats": {
                    "revenue": {"count": 120.0, "mean": 41.5, "min": 1.0, "max": 99.0}
                },
                "insights": [
                    "Revenue grew steadily",
                    {"summary": "March is an outlier", "stats": {}},
                    7
                ]
            },
            "visualizations": {"revenue_trend": {}},
            "ai_analysis": {}
        });
        assert_eq!(row_count(&data), Some(120));
        assert_eq!(column_names(&data), vec!["date", "revenue"]);
        assert_eq!(
            summary_rows(&data),
            vec![StatRow {
                column: "revenue".to_string(),
                count: Some(120.0),
                mean: Some(41.5),
                min: Some(1.0),
                max: Some(99.0),
            }]
        );
        assert_eq!(
            insight_lines(&data),
            vec![
                "Revenue grew steadily".to_string(),
                "March is an outlier".to_string()
            ]
        );
        assert!(has_section(&data, "visualizations"));
        assert!(!has_section(&data, "ai_analysis"));
    }

    #[test]
    fn projection_degrades_on_unexpected_shapes() {
        let data = json!({"summary_stats": "not an object"});
        assert_eq!(row_count(&data), None);
        assert!(column_names(&data).is_empty());
        assert!(summary_rows(&data).is_empty());
        assert!(insight_lines(&data).is_empty());
        assert!(!has_section(&data, "visualizations"));
    }
}
