//! Core game logic module - pure, deterministic, and testable
//!
//! This crate contains the rules of the falling-polyomino game on a 16x8
//! occupancy grid. It has **zero dependencies** on UI, networking, or I/O:
//!
//! - **Deterministic**: Same seed produces identical games
//! - **Testable**: Every transition is a plain `&mut self` call
//! - **Fast**: Fixed-capacity cell lists, no allocation on tick, input or snapshot
//!
//! # Module Structure
//!
//! - [`grid`]: 16x8 occupancy grid with wrapping reads, bounded writes and the column sweep
//! - [`shapes`]: the four-shape offset catalogue
//! - [`orientation`]: rotation and reflection as integer linear transforms
//! - [`placement`]: the fit predicate every motion goes through
//! - [`piece`]: the live piece and its validated transitions
//! - [`rng`]: seeded spawn draws
//! - [`game_state`]: the tick state machine (advance, lock, sweep, spawn)
//! - [`snapshot`]: `Copy` views for renderers and observers
//!
//! # Rules
//!
//! - Pieces fall along the primary axis, one step per tick
//! - A piece that cannot advance locks, full columns are swept, and a new piece
//!   spawns at (0, 4) with a random shape, rotation and reflection
//! - Motions and rotations are all-or-nothing; there are no wall kicks
//! - If no spawn fits after a bounded number of draws the game is blocked until reset
//!
//! # Example
//!
//! ```
//! use polydrop_core::{GameState, Phase, TickOutcome};
//! use polydrop_types::{Direction, GameAction};
//!
//! let mut game = GameState::new(12345);
//! game.start();
//! assert_eq!(game.phase(), Phase::Falling);
//!
//! game.apply_action(GameAction::Move(Direction::Right));
//! game.apply_action(GameAction::RotateInPlane);
//!
//! // The first tick on an empty grid always advances.
//! assert_eq!(game.tick(), TickOutcome::Advanced);
//! assert_eq!(game.active_piece_cells().len(), 4);
//! ```
//!
//! # Timing
//!
//! The core never schedules itself. The host calls
//! [`GameState::tick`](game_state::GameState::tick) on a fixed period
//! (500 ms by default) and applies input between ticks.

pub mod game_state;
pub mod grid;
pub mod orientation;
pub mod piece;
pub mod placement;
pub mod rng;
pub mod shapes;
pub mod snapshot;

pub use polydrop_types as types;

// Re-export commonly used types for convenience
pub use game_state::{GameConfig, GameState, LockEvent, Phase, TickOutcome};
pub use grid::{ClearedColumns, Grid};
pub use orientation::{transformed_offsets, Linear2};
pub use piece::{ActivePiece, PieceDescriptor};
pub use placement::{check_place, fits, try_place, Footprint, PlaceError, PrimaryBounds};
pub use rng::{SimpleRng, SpawnDraw};
pub use shapes::{shape_table, ShapeTable};
pub use snapshot::{ActiveSnapshot, GameSnapshot};
