//! Persistence and environment helpers for the app shell.
//!
//! # Design
//! - The token lives under one well-known key; the store is the only
//!   durable session state the client keeps.
//! - Storage write failures are logged and otherwise ignored; reads fall
//!   back to "no token".

use gloo::console;
use gloo::storage::{LocalStorage, Storage};
use gloo::utils::window;
use web_sys::Url;

pub(crate) const TOKEN_KEY: &str = "tabula.token";

/// Read the stored session token, treating blank values as absent.
pub(crate) fn load_token() -> Option<String> {
    let value = LocalStorage::get::<String>(TOKEN_KEY).ok()?;
    if value.trim().is_empty() {
        return None;
    }
    Some(value)
}

/// Persist the session token.
pub(crate) fn persist_token(token: &str) {
    if let Err(err) = LocalStorage::set(TOKEN_KEY, token) {
        console::error!("storage operation failed", "set", TOKEN_KEY, err.to_string());
    }
}

/// Remove the stored session token.
pub(crate) fn clear_token() {
    LocalStorage::delete(TOKEN_KEY);
}

/// API origin derived from the page location.
///
/// The Trunk dev server sits on 8080 while the API listens on 5000; any
/// other origin is assumed to serve the API itself.
pub(crate) fn api_base_url() -> String {
    let href = window()
        .location()
        .href()
        .unwrap_or_else(|_| "http://localhost:8080".to_string());

    if let Ok(url) = Url::new(&href) {
        let protocol = url.protocol();
        let host = url.hostname();
        let port = url.port();
        let mapped_port = match port.as_str() {
            "" => None,
            "8080" => Some("5000"),
            other => Some(other),
        };

        let mut base = format!("{protocol}//{host}");
        if let Some(port) = mapped_port {
            base.push(':');
            base.push_str(port);
        }
        return base;
    }

    "http://localhost:5000".to_string()
}
