use crate::game_state::Phase;
use crate::piece::ActivePiece;
use crate::placement::PrimaryBounds;
use crate::types::{CellPos, Orientation, Shape, COLLS, MAX_CELLS, ROWS};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActiveSnapshot {
    pub shape: Shape,
    pub orientation: Orientation,
    pub origin: CellPos,
    cells: [CellPos; MAX_CELLS],
    cell_count: u8,
}

impl ActiveSnapshot {
    pub fn cells(&self) -> &[CellPos] {
        &self.cells[..self.cell_count as usize]
    }
}

impl From<&ActivePiece> for ActiveSnapshot {
    fn from(value: &ActivePiece) -> Self {
        let mut cells = [(0, 0); MAX_CELLS];
        let src = value.cells();
        cells[..src.len()].copy_from_slice(src);
        Self {
            shape: value.shape(),
            orientation: value.orientation(),
            origin: value.origin(),
            cells,
            cell_count: src.len() as u8,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GameSnapshot {
    /// Occupancy, indexed `[primary][secondary]`
    pub grid: [[bool; ROWS as usize]; COLLS as usize],
    pub active: Option<ActiveSnapshot>,
    pub phase: Phase,
    pub bounds: PrimaryBounds,
    pub episode_id: u32,
    pub seed: u32,
    pub piece_id: u32,
    pub steps_in_piece: u32,
    pub columns_cleared: u32,
}

impl GameSnapshot {
    pub fn playable(&self) -> bool {
        self.phase == Phase::Falling
    }

    /// Whether the live piece covers `(primary, secondary)`
    pub fn is_active_cell(&self, primary: i8, secondary: i8) -> bool {
        self.active
            .as_ref()
            .is_some_and(|a| a.cells().contains(&(primary, secondary)))
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        Self {
            grid: [[false; ROWS as usize]; COLLS as usize],
            active: None,
            phase: Phase::Ready,
            bounds: PrimaryBounds::Floor,
            episode_id: 0,
            seed: 0,
            piece_id: 0,
            steps_in_piece: 0,
            columns_cleared: 0,
        }
    }
}
