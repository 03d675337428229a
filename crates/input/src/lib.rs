//! Terminal input module (engine-facing).
//!
//! Maps `crossterm` key events into [`crate::types::GameAction`]. Holds no state:
//! the host applies each mapped action to the game directly.

pub mod map;

pub use polydrop_types as types;

pub use map::{handle_key_event, should_quit};
