//! Terminal "game renderer" module.
//!
//! A small, game-oriented rendering layer for terminal gameplay. It renders a
//! `GameSnapshot` into a plain framebuffer that is flushed to the terminal with
//! diff encoding.
//!
//! Goals:
//! - Keep `core` deterministic and testable
//! - Keep the per-frame path free of allocation
//! - Allow precise control over aspect ratio (e.g. 2 chars wide per cell)

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use polydrop_core as core;
pub use polydrop_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{AnchorY, GameView, Viewport};
pub use renderer::{encode_frame, TerminalRenderer};
