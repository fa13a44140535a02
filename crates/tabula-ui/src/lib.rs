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
    clippy::nursery,
    rustdoc::broken_intra_doc_links,
    rustdoc::bare_urls,
    missing_docs
)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::multiple_crate_versions)]
//! Tabula web client.
//!
//! Yew front-end for the Tabula report service: authenticate, upload a
//! tabular data file against a report template, and browse the generated
//! analytical report. Session handling, failure classification, and the
//! fetch lifecycles live in DOM-free modules so they are testable off-wasm;
//! everything that touches the browser is gated behind `wasm32`.

pub mod core;
pub mod features;
pub mod models;

#[cfg(target_arch = "wasm32")]
pub mod services;

#[cfg(target_arch = "wasm32")]
mod app;
#[cfg(target_arch = "wasm32")]
mod components;

#[cfg(target_arch = "wasm32")]
pub use app::run_app;
