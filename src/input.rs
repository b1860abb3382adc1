//! Input subsystem: terminal polling and key mapping for the confirmation screen.

pub mod raw;
pub mod service;

// Modules outside this crate should prefer importing from `crate::input`
// rather than reaching into submodules.
pub use service::{map_key, spawn_input_thread, InputAction, InputService};
