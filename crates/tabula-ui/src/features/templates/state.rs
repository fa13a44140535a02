//! Template catalog state and pure transitions.
//!
//! # Design
//! - One fetch per mount of the owning screen; no cache invalidation.
//! - Selection is plain local state; the server is the authority on
//!   whether a template id is valid.

use crate::core::error::ApiError;
use tabula_api_models::{Template, TemplatesEnvelope};

/// Lifecycle of the catalog fetch.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CatalogPhase {
    /// Fetch in flight.
    Loading,
    /// Catalog loaded.
    Ready(Vec<Template>),
    /// Fetch failed with a display message.
    Error(String),
}

const LOAD_FAILED: &str = "Failed to load templates";

/// Map a settled catalog response to the next phase.
#[must_use]
pub fn catalog_from_envelope(envelope: TemplatesEnvelope) -> CatalogPhase {
    if !envelope.is_success() {
        return CatalogPhase::Error(envelope.message.unwrap_or_else(|| LOAD_FAILED.to_string()));
    }
    match envelope.data {
        Some(list) => CatalogPhase::Ready(list.templates),
        None => CatalogPhase::Error(LOAD_FAILED.to_string()),
    }
}

/// Map a gateway failure to the next phase.
///
/// Returns `None` for session expiry: the gateway already invalidated the
/// session and navigation to login has occurred.
#[must_use]
pub fn catalog_from_error(err: &ApiError) -> Option<CatalogPhase> {
    match err {
        ApiError::SessionExpired => None,
        ApiError::Server { detail: None, .. } => Some(CatalogPhase::Error(LOAD_FAILED.to_string())),
        other => Some(CatalogPhase::Error(other.user_message())),
    }
}

#[cfg(test)]
mod tests {
    use super::{CatalogPhase, catalog_from_envelope, catalog_from_error};
    use crate::core::error::ApiError;
    use tabula_api_models::{Template, TemplateList, TemplatesEnvelope};

    #[test]
    fn success_envelope_yields_ready_list() {
        let envelope = TemplatesEnvelope {
            status: "success".to_string(),
            data: Some(TemplateList {
                templates: vec![Template {
                    id: 3,
                    name: "Sales".to_string(),
                    description: "Revenue breakdown".to_string(),
                    icon: None,
                }],
            }),
            message: None,
        };
        let CatalogPhase::Ready(list) = catalog_from_envelope(envelope) else {
            panic!("expected ready phase");
        };
        assert_eq!(list.len(), 1);
        assert_eq!(list[0].id, 3);
    }

    #[test]
    fn failure_envelope_surfaces_server_message() {
        let envelope = TemplatesEnvelope {
            status: "error".to_string(),
            data: None,
            message: Some("catalog offline".to_string()),
        };
        assert_eq!(
            catalog_from_envelope(envelope),
            CatalogPhase::Error("catalog offline".to_string())
        );
    }

    #[test]
    fn success_without_data_is_an_error() {
        let envelope = TemplatesEnvelope {
            status: "success".to_string(),
            data: None,
            message: None,
        };
        assert_eq!(
            catalog_from_envelope(envelope),
            CatalogPhase::Error("Failed to load templates".to_string())
        );
    }

    #[test]
    fn session_expiry_produces_no_phase() {
        assert_eq!(catalog_from_error(&ApiError::SessionExpired), None);
        assert_eq!(
            catalog_from_error(&ApiError::Unreachable),
            Some(CatalogPhase::Error(
                "Server is not responding. Please try again later.".to_string()
            ))
        );
    }
}
