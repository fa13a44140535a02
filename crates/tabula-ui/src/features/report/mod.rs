//! Report feature: authenticated fetch lifecycle and payload projection.

pub mod logic;
pub mod state;
#[cfg(target_arch = "wasm32")]
pub mod view;
