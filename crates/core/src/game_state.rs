//! Game state module - the tick-driven state machine
//!
//! Ties together the grid, the live piece and the spawn RNG. Each call to
//! [`GameState::tick`] performs exactly one transition: advance the live piece
//! one step along the primary axis, or lock it, sweep full columns and spawn the
//! next piece. Input handlers apply validated motions between ticks.

use crate::grid::{ClearedColumns, Grid};
use crate::piece::{ActivePiece, PieceDescriptor};
use crate::placement::{Footprint, PrimaryBounds};
use crate::rng::{SimpleRng, SpawnDraw};
use crate::snapshot::{ActiveSnapshot, GameSnapshot};
use crate::types::*;

/// Rules that can vary between games
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GameConfig {
    pub bounds: PrimaryBounds,
    /// Draws tried per spawn before the game is blocked (0 is treated as 1)
    pub spawn_attempts: u8,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            bounds: PrimaryBounds::Floor,
            spawn_attempts: SPAWN_ATTEMPTS,
        }
    }
}

/// Lifecycle phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Phase {
    /// Created but not started; no live piece yet
    #[default]
    Ready,
    /// A piece is live
    Falling,
    /// Every spawn attempt was rejected; only `reset` leaves this phase
    Blocked,
}

impl Phase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Ready => "ready",
            Phase::Falling => "falling",
            Phase::Blocked => "blocked",
        }
    }
}

/// What a single tick did
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TickOutcome {
    /// Nothing to do (not started, or blocked)
    Idle,
    /// The live piece moved one step along the primary axis
    Advanced,
    /// The live piece locked; a sweep and spawn followed
    Locked,
}

/// Record of one lock, sweep and spawn
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LockEvent {
    /// Id of the piece that locked
    pub piece_id: u32,
    pub shape: Shape,
    pub orientation: Orientation,
    /// Cells the piece covered when it locked
    pub cells: Footprint,
    /// How many of those cells were inside the grid
    pub written: u8,
    /// Columns removed by the sweep, in removal order
    pub cleared_columns: ClearedColumns,
    /// Phase after the follow-up spawn
    pub phase: Phase,
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    grid: Grid,
    active: Option<ActivePiece>,
    rng: SimpleRng,
    seed: u32,
    config: GameConfig,
    phase: Phase,
    /// Monotonic episode id (increments on reset).
    episode_id: u32,
    /// Monotonic id for spawned pieces (increments only on successful spawn).
    piece_id: u32,
    /// Ticks the current piece has advanced.
    steps_in_piece: u32,
    /// Columns removed since the episode started.
    columns_cleared: u32,
    /// Last lock event (consumed by observers).
    last_event: Option<LockEvent>,
}

impl GameState {
    /// Create a new game with the given RNG seed and default rules
    pub fn new(seed: u32) -> Self {
        Self::with_config(seed, GameConfig::default())
    }

    pub fn with_config(seed: u32, config: GameConfig) -> Self {
        Self::with_grid(seed, config, Grid::new())
    }

    /// Create a game over a pre-filled grid
    pub fn with_grid(seed: u32, config: GameConfig, grid: Grid) -> Self {
        Self {
            grid,
            active: None,
            rng: SimpleRng::new(seed),
            seed,
            config,
            phase: Phase::Ready,
            episode_id: 0,
            piece_id: 0,
            steps_in_piece: 0,
            columns_cleared: 0,
            last_event: None,
        }
    }

    /// Start the game and spawn the first piece
    pub fn start(&mut self) {
        if self.phase != Phase::Ready {
            return;
        }
        self.spawn_piece();
    }

    pub fn started(&self) -> bool {
        self.phase != Phase::Ready
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn config(&self) -> GameConfig {
        self.config
    }

    pub fn seed(&self) -> u32 {
        self.seed
    }

    pub fn episode_id(&self) -> u32 {
        self.episode_id
    }

    pub fn piece_id(&self) -> u32 {
        self.piece_id
    }

    pub fn steps_in_piece(&self) -> u32 {
        self.steps_in_piece
    }

    pub fn columns_cleared(&self) -> u32 {
        self.columns_cleared
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn active(&self) -> Option<&ActivePiece> {
        self.active.as_ref()
    }

    /// Copy of the occupancy matrix, indexed `[primary][secondary]`
    pub fn grid_snapshot(&self) -> [[bool; ROWS as usize]; COLLS as usize] {
        let mut out = [[false; ROWS as usize]; COLLS as usize];
        self.grid.write_bool_grid(&mut out);
        out
    }

    /// Absolute cells of the live piece (empty when there is none)
    pub fn active_piece_cells(&self) -> &[CellPos] {
        match &self.active {
            Some(piece) => piece.cells(),
            None => &[],
        }
    }

    pub fn active_piece_descriptor(&self) -> Option<PieceDescriptor> {
        self.active.as_ref().map(ActivePiece::descriptor)
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        self.grid.write_bool_grid(&mut out.grid);
        out.active = self.active.as_ref().map(ActiveSnapshot::from);
        out.phase = self.phase;
        out.episode_id = self.episode_id;
        out.seed = self.seed;
        out.piece_id = self.piece_id;
        out.steps_in_piece = self.steps_in_piece;
        out.columns_cleared = self.columns_cleared;
        out.bounds = self.config.bounds;
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }

    /// Take and clear the last lock event.
    pub fn take_last_event(&mut self) -> Option<LockEvent> {
        self.last_event.take()
    }

    /// Draw and validate a spawn, retrying up to `spawn_attempts` times.
    /// Enters `Blocked` when every attempt is rejected.
    fn spawn_piece(&mut self) -> bool {
        let attempts = self.config.spawn_attempts.max(1);
        for _ in 0..attempts {
            let draw = SpawnDraw::draw(&mut self.rng);
            if let Some(piece) =
                ActivePiece::spawn(&self.grid, draw.shape, draw.orientation, self.config.bounds)
            {
                self.active = Some(piece);
                self.piece_id = self.piece_id.wrapping_add(1);
                self.steps_in_piece = 0;
                self.phase = Phase::Falling;
                return true;
            }
        }

        self.active = None;
        self.phase = Phase::Blocked;
        false
    }

    /// Lock the live piece, sweep full columns, then spawn the next piece
    fn lock_piece(&mut self) {
        let Some(piece) = self.active.take() else {
            return;
        };

        let locked_id = self.piece_id;
        let written = piece.lock_into(&mut self.grid);
        let cleared_columns = self.grid.sweep();
        self.columns_cleared = self
            .columns_cleared
            .wrapping_add(cleared_columns.len() as u32);

        self.spawn_piece();

        self.last_event = Some(LockEvent {
            piece_id: locked_id,
            shape: piece.shape(),
            orientation: piece.orientation(),
            cells: piece.cells().iter().copied().collect(),
            written: written as u8,
            cleared_columns,
            phase: self.phase,
        });
    }

    /// One step of the state machine
    pub fn tick(&mut self) -> TickOutcome {
        if self.phase != Phase::Falling {
            return TickOutcome::Idle;
        }
        let bounds = self.config.bounds;
        let Some(piece) = self.active.as_mut() else {
            return TickOutcome::Idle;
        };

        match piece.advanced_origin() {
            Some(origin) if piece.can_advance(&self.grid, bounds) => {
                let moved = piece.move_to(&self.grid, origin, bounds);
                debug_assert!(moved, "can_advance agreed with move_to");
                self.steps_in_piece = self.steps_in_piece.wrapping_add(1);
                TickOutcome::Advanced
            }
            _ => {
                self.lock_piece();
                TickOutcome::Locked
            }
        }
    }

    /// Move the live piece one cell; false if rejected or no piece is live
    pub fn handle_move(&mut self, direction: Direction) -> bool {
        let bounds = self.config.bounds;
        match self.active.as_mut() {
            Some(piece) => piece.move_by(&self.grid, direction.delta(), bounds),
            None => false,
        }
    }

    /// Advance the in-plane rotation by one quarter turn
    pub fn handle_rotate_in_plane(&mut self) -> bool {
        let bounds = self.config.bounds;
        let Some(piece) = self.active.as_mut() else {
            return false;
        };
        let rot = piece.orientation().rot.next();
        piece.rotate_in_plane(&self.grid, rot, bounds)
    }

    /// Toggle the reflection
    pub fn handle_rotate_flip(&mut self) -> bool {
        let bounds = self.config.bounds;
        let Some(piece) = self.active.as_mut() else {
            return false;
        };
        let flip = piece.orientation().flip.toggled();
        piece.rotate_flip(&self.grid, flip, bounds)
    }

    /// Swap the live piece's shape, keeping origin and orientation
    pub fn handle_select_shape(&mut self, shape: Shape) -> bool {
        let bounds = self.config.bounds;
        match self.active.as_mut() {
            Some(piece) => piece.reshape(&self.grid, shape, bounds),
            None => false,
        }
    }

    /// Replace the live piece with an explicit placement.
    ///
    /// Returns false (leaving the current piece) if the placement is rejected
    /// or the game is not falling.
    pub fn place_active(&mut self, shape: Shape, origin: CellPos, orientation: Orientation) -> bool {
        if self.phase != Phase::Falling {
            return false;
        }
        match ActivePiece::place(&self.grid, shape, origin, orientation, self.config.bounds) {
            Some(piece) => {
                self.active = Some(piece);
                self.steps_in_piece = 0;
                true
            }
            None => false,
        }
    }

    /// Start a new episode on an empty grid. The RNG stream continues.
    pub fn reset(&mut self) {
        self.grid.clear();
        self.active = None;
        self.episode_id = self.episode_id.wrapping_add(1);
        self.piece_id = 0;
        self.steps_in_piece = 0;
        self.columns_cleared = 0;
        self.last_event = None;
        self.spawn_piece();
    }

    /// Apply a game action
    pub fn apply_action(&mut self, action: GameAction) -> bool {
        match action {
            GameAction::Move(direction) => self.handle_move(direction),
            GameAction::RotateInPlane => self.handle_rotate_in_plane(),
            GameAction::RotateFlip => self.handle_rotate_flip(),
            GameAction::SelectShape(shape) => self.handle_select_shape(shape),
            GameAction::Restart => {
                self.reset();
                true
            }
        }
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(1)
    }
}
