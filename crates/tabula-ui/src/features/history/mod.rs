//! Report history feature: the user's previously generated reports.

pub mod state;
#[cfg(target_arch = "wasm32")]
pub mod view;
