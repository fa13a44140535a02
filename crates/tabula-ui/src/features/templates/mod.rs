//! Template catalog feature: one-shot fetch plus local selection.

pub mod state;
#[cfg(target_arch = "wasm32")]
pub mod view;
