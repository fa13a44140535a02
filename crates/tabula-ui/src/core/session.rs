//! Session state machine and token restoration.
//!
//! # Design
//! - Token decode is local; holding a token means authenticated until the
//!   server says otherwise with a 401.
//! - Restoration never touches the network and reports corrupt tokens so
//!   the caller can clear storage.
//! - Keep transitions as plain data transforms, testable off-wasm.

use tabula_api_models::{TokenClaims, decode_claims};

/// Lifecycle of the client session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum SessionPhase {
    /// Startup state before the stored token has been inspected.
    #[default]
    Initializing,
    /// No usable token is held.
    Unauthenticated,
    /// A login or registration request is in flight.
    Authenticating,
    /// A token is held and its identity has been decoded.
    Authenticated,
}

/// Read-only projection of the decoded token claims.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Identity {
    /// Account identifier.
    pub id: i64,
    /// Account email address.
    pub email: String,
    /// Optional display name.
    pub name: Option<String>,
}

impl From<TokenClaims> for Identity {
    fn from(claims: TokenClaims) -> Self {
        Self {
            id: claims.user_id,
            email: claims.email,
            name: claims.name,
        }
    }
}

/// Outcome of inspecting the stored token at startup.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Restored {
    /// No token was stored.
    Missing,
    /// A token was stored but failed to decode; the caller must clear it.
    Corrupt,
    /// The stored token decoded; the session resumes authenticated.
    Active {
        /// The token to keep mirrored in memory.
        token: String,
        /// Identity projected from the decoded claims.
        identity: Identity,
    },
}

/// Inspect the stored token without touching the network.
#[must_use]
pub fn restore_session(stored: Option<&str>) -> Restored {
    let Some(token) = stored else {
        return Restored::Missing;
    };
    match decode_claims(token) {
        Ok(claims) => Restored::Active {
            token: token.to_string(),
            identity: claims.into(),
        },
        Err(_) => Restored::Corrupt,
    }
}

#[cfg(test)]
mod tests {
    use super::{Identity, Restored, restore_session};
    use base64::{Engine as _, engine::general_purpose};

    fn token_for(payload: &str) -> String {
        let encode = |part: &str| general_purpose::URL_SAFE_NO_PAD.encode(part);
        format!("h.{}.s", encode(payload))
    }

    #[test]
    fn missing_token_restores_unauthenticated() {
        assert_eq!(restore_session(None), Restored::Missing);
    }

    #[test]
    fn undecodable_tokens_are_reported_corrupt() {
        assert_eq!(restore_session(Some("garbage")), Restored::Corrupt);
        assert_eq!(restore_session(Some("a.b.c")), Restored::Corrupt);
        let missing_claims = token_for(r#"{"exp":123}"#);
        assert_eq!(restore_session(Some(&missing_claims)), Restored::Corrupt);
    }

    #[test]
    fn valid_token_restores_identity() {
        let token = token_for(r#"{"user_id":7,"email":"a@b.com"}"#);
        assert_eq!(
            restore_session(Some(&token)),
            Restored::Active {
                token: token.clone(),
                identity: Identity {
                    id: 7,
                    email: "a@b.com".to_string(),
                    name: None,
                },
            }
        );
    }
}
