//! Upload feature: validation, submission, and outcome interpretation.

pub mod logic;
pub mod state;
#[cfg(target_arch = "wasm32")]
pub mod view;
