//! Feature slices: one directory per authenticated screen concern.
pub mod history;
pub mod report;
pub mod templates;
pub mod upload;
