//! GameView: maps a `core::GameSnapshot` into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.
//!
//! The primary axis is drawn as screen rows (pieces fall downward) and the
//! secondary axis as screen columns.

use crate::core::{ActiveSnapshot, GameSnapshot, Phase, PrimaryBounds};
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::types::{Flip2, Rot4, Shape, COLLS, ROWS};

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorY {
    Center,
    Top,
}

const PLAY_BG: Rgb = Rgb::new(30, 30, 40);
const PANEL_BG: Rgb = Rgb::new(0, 0, 0);

/// A lightweight terminal renderer for the grid game.
pub struct GameView {
    /// Grid cell width in terminal columns.
    cell_w: u16,
    /// Grid cell height in terminal rows.
    cell_h: u16,
    anchor_y: AnchorY,
}

impl Default for GameView {
    fn default() -> Self {
        // 2x1 helps compensate for typical terminal glyph aspect ratio.
        Self {
            cell_w: 2,
            cell_h: 1,
            anchor_y: AnchorY::Center,
        }
    }
}

impl GameView {
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self {
            cell_w,
            cell_h,
            anchor_y: AnchorY::Center,
        }
    }

    pub fn with_anchor_y(mut self, anchor_y: AnchorY) -> Self {
        self.anchor_y = anchor_y;
        self
    }

    /// Frame size (grid plus border) in terminal cells.
    pub fn frame_size(&self) -> (u16, u16) {
        (
            (ROWS as u16) * self.cell_w + 2,
            (COLLS as u16) * self.cell_h + 2,
        )
    }

    /// Render a snapshot into an existing framebuffer.
    ///
    /// Allocation-free once the framebuffer has the viewport's size.
    pub fn render_into(&self, snap: &GameSnapshot, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::default().cell(' '));

        let (frame_w, frame_h) = self.frame_size();
        let start_x = viewport.width.saturating_sub(frame_w) / 2;
        let start_y = match self.anchor_y {
            AnchorY::Center => viewport.height.saturating_sub(frame_h) / 2,
            AnchorY::Top => 0,
        };

        let bg = CellStyle::new(Rgb::new(80, 80, 90), PLAY_BG);
        let border = CellStyle::new(Rgb::new(200, 200, 200), PANEL_BG);

        fb.fill_rect(
            start_x + 1,
            start_y + 1,
            frame_w - 2,
            frame_h - 2,
            ' ',
            bg,
        );
        self.draw_border(fb, start_x, start_y, frame_w, frame_h, border);

        // Locked cells.
        for (p, column) in snap.grid.iter().enumerate() {
            for (s, &occupied) in column.iter().enumerate() {
                if occupied {
                    self.draw_locked_cell(fb, start_x, start_y, p as u16, s as u16);
                } else {
                    self.draw_empty_cell(fb, start_x, start_y, p as u16, s as u16);
                }
            }
        }

        // Active piece. Cells above the grid are not drawn; under wrapping
        // bounds cells past the far edge are drawn where they are read.
        if let Some(active) = snap.active.as_ref() {
            let style = CellStyle::new(shape_color(active.shape), PLAY_BG).bold();
            for &(p, s) in active.cells() {
                let p = match snap.bounds {
                    PrimaryBounds::Wrap => p.rem_euclid(COLLS as i8),
                    PrimaryBounds::Floor => p,
                };
                if (0..COLLS as i8).contains(&p) && (0..ROWS as i8).contains(&s) {
                    self.fill_cell_rect(fb, start_x, start_y, p as u16, s as u16, '█', style);
                }
            }
        }

        self.draw_side_panel(fb, snap, viewport, start_x, start_y, frame_w);

        if snap.phase == Phase::Blocked {
            self.draw_overlay_text(fb, start_x, start_y, frame_w, frame_h, "BLOCKED");
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &GameSnapshot, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, viewport, &mut fb);
        fb
    }

    fn draw_border(&self, fb: &mut FrameBuffer, x: u16, y: u16, w: u16, h: u16, style: CellStyle) {
        if w < 2 || h < 2 {
            return;
        }

        fb.put_char(x, y, '┌', style);
        fb.put_char(x + w - 1, y, '┐', style);
        fb.put_char(x, y + h - 1, '└', style);
        fb.put_char(x + w - 1, y + h - 1, '┘', style);

        for dx in 1..w - 1 {
            fb.put_char(x + dx, y, '─', style);
            fb.put_char(x + dx, y + h - 1, '─', style);
        }
        for dy in 1..h - 1 {
            fb.put_char(x, y + dy, '│', style);
            fb.put_char(x + w - 1, y + dy, '│', style);
        }
    }

    fn draw_empty_cell(&self, fb: &mut FrameBuffer, start_x: u16, start_y: u16, p: u16, s: u16) {
        let style = CellStyle::new(Rgb::new(90, 90, 100), PLAY_BG).dim();
        self.fill_cell_rect(fb, start_x, start_y, p, s, '·', style);
    }

    fn draw_locked_cell(&self, fb: &mut FrameBuffer, start_x: u16, start_y: u16, p: u16, s: u16) {
        let style = CellStyle::new(Rgb::new(150, 160, 180), PLAY_BG);
        self.fill_cell_rect(fb, start_x, start_y, p, s, '█', style);
    }

    /// Fill the screen rectangle of grid cell `(p, s)`.
    fn fill_cell_rect(
        &self,
        fb: &mut FrameBuffer,
        start_x: u16,
        start_y: u16,
        p: u16,
        s: u16,
        ch: char,
        style: CellStyle,
    ) {
        let px = start_x + 1 + s * self.cell_w;
        let py = start_y + 1 + p * self.cell_h;
        fb.fill_rect(px, py, self.cell_w, self.cell_h, ch, style);
    }

    fn draw_side_panel(
        &self,
        fb: &mut FrameBuffer,
        snap: &GameSnapshot,
        viewport: Viewport,
        start_x: u16,
        start_y: u16,
        frame_w: u16,
    ) {
        let panel_x = start_x.saturating_add(frame_w).saturating_add(2);
        if panel_x >= viewport.width {
            return;
        }
        let panel_w = viewport.width - panel_x;
        if panel_w < 10 {
            return;
        }

        let label = CellStyle::new(Rgb::new(220, 220, 220), PANEL_BG).bold();
        let value = CellStyle::new(Rgb::new(200, 200, 200), PANEL_BG);

        let mut y = start_y;
        fb.put_str(panel_x, y, "SHAPE", label);
        y = y.saturating_add(1);
        match snap.active.as_ref() {
            Some(active) => {
                let shape_style = CellStyle {
                    fg: shape_color(active.shape),
                    ..value
                };
                fb.put_str(panel_x, y, shape_label(active.shape), shape_style);
            }
            None => {
                fb.put_str(panel_x, y, "-", value);
            }
        }
        y = y.saturating_add(2);

        fb.put_str(panel_x, y, "ORIENT", label);
        y = y.saturating_add(1);
        match snap.active.as_ref() {
            Some(active) => self.put_orientation(fb, panel_x, y, active, value),
            None => {
                fb.put_str(panel_x, y, "-", value);
            }
        }
        y = y.saturating_add(2);

        fb.put_str(panel_x, y, "PIECES", label);
        y = y.saturating_add(1);
        fb.put_u32(panel_x, y, snap.piece_id, value);
        y = y.saturating_add(2);

        fb.put_str(panel_x, y, "CLEARED", label);
        y = y.saturating_add(1);
        fb.put_u32(panel_x, y, snap.columns_cleared, value);
        y = y.saturating_add(2);

        fb.put_str(panel_x, y, "PHASE", label);
        y = y.saturating_add(1);
        fb.put_str(panel_x, y, phase_label(snap.phase), value);
        y = y.saturating_add(2);

        if y < viewport.height {
            let dim = value.dim();
            let x = fb.put_str(panel_x, y, "EP ", dim);
            fb.put_u32(x, y, snap.episode_id, dim);
        }
    }

    fn put_orientation(
        &self,
        fb: &mut FrameBuffer,
        x: u16,
        y: u16,
        active: &ActiveSnapshot,
        style: CellStyle,
    ) {
        let x = fb.put_str(x, y, rot_label(active.orientation.rot), style);
        if active.orientation.flip == Flip2::Mirrored {
            fb.put_str(x, y, " FLIP", style);
        }
    }

    fn draw_overlay_text(
        &self,
        fb: &mut FrameBuffer,
        start_x: u16,
        start_y: u16,
        frame_w: u16,
        frame_h: u16,
        text: &str,
    ) {
        let mid_y = start_y.saturating_add(frame_h / 2);
        let text_w = text.chars().count() as u16;
        let x = start_x.saturating_add(frame_w.saturating_sub(text_w) / 2);
        let style = CellStyle::new(Rgb::new(255, 255, 255), PANEL_BG).bold();
        fb.put_str(x, mid_y, text, style);
    }
}

fn shape_color(shape: Shape) -> Rgb {
    match shape {
        Shape::Long => Rgb::new(80, 220, 220),
        Shape::T => Rgb::new(200, 120, 220),
        Shape::L => Rgb::new(255, 165, 0),
        Shape::Z => Rgb::new(220, 80, 80),
    }
}

fn shape_label(shape: Shape) -> &'static str {
    match shape {
        Shape::Long => "LONG",
        Shape::T => "T",
        Shape::L => "L",
        Shape::Z => "Z",
    }
}

fn rot_label(rot: Rot4) -> &'static str {
    match rot {
        Rot4::R0 => "R0",
        Rot4::R90 => "R90",
        Rot4::R180 => "R180",
        Rot4::R270 => "R270",
    }
}

fn phase_label(phase: Phase) -> &'static str {
    match phase {
        Phase::Ready => "READY",
        Phase::Falling => "FALLING",
        Phase::Blocked => "BLOCKED",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frame_size_matches_grid_dimensions() {
        // 8 secondaries * 2 chars + border, 16 primaries + border.
        assert_eq!(GameView::default().frame_size(), (18, 18));
        assert_eq!(GameView::new(1, 1).frame_size(), (10, 18));
    }

    #[test]
    fn labels_cover_every_variant() {
        for shape in Shape::ALL {
            assert!(!shape_label(shape).is_empty());
        }
        for rot in Rot4::ALL {
            assert!(rot_label(rot).starts_with('R'));
        }
        assert_eq!(phase_label(Phase::Blocked), "BLOCKED");
    }
}
