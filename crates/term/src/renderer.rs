//! Terminal output for the polydrop host.
//!
//! Frames are encoded into a reusable byte buffer and written in one go. The
//! renderer remembers the last frame it wrote; when the size matches, only the
//! horizontal spans that changed are repainted.

use std::io::{self, Write};

use anyhow::{Context, Result};
use crossterm::{
    cursor,
    style::{
        Attribute, Color, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor,
    },
    terminal, QueueableCommand,
};

use crate::fb::{Cell, CellStyle, FrameBuffer, Rgb};

const WINDOW_TITLE: &str = "polydrop";

/// Writes framebuffers to stdout.
pub struct TerminalRenderer {
    out: io::Stdout,
    shown: Option<FrameBuffer>,
    bytes: Vec<u8>,
    raw: bool,
}

impl Default for TerminalRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl TerminalRenderer {
    pub fn new() -> Self {
        Self {
            out: io::stdout(),
            shown: None,
            bytes: Vec::with_capacity(32 * 1024),
            raw: false,
        }
    }

    /// Switch to raw mode on the alternate screen.
    pub fn enter(&mut self) -> Result<()> {
        terminal::enable_raw_mode().context("enable raw mode")?;
        self.raw = true;
        self.bytes.clear();
        self.bytes.queue(terminal::SetTitle(WINDOW_TITLE))?;
        self.bytes.queue(terminal::EnterAlternateScreen)?;
        self.bytes.queue(terminal::DisableLineWrap)?;
        self.bytes.queue(cursor::Hide)?;
        self.write_bytes()
    }

    /// Restore the terminal. Does nothing if `enter` never succeeded.
    pub fn exit(&mut self) -> Result<()> {
        if !self.raw {
            return Ok(());
        }
        self.bytes.clear();
        reset_style(&mut self.bytes)?;
        self.bytes.queue(cursor::Show)?;
        self.bytes.queue(terminal::EnableLineWrap)?;
        self.bytes.queue(terminal::LeaveAlternateScreen)?;
        self.write_bytes()?;
        self.raw = false;
        terminal::disable_raw_mode().context("disable raw mode")
    }

    /// Repaint everything on the next draw (after a resize).
    pub fn invalidate(&mut self) {
        self.shown = None;
    }

    /// Write `fb`, then hand back the previous frame in its place.
    ///
    /// The caller renders into the same buffer every frame; swapping keeps
    /// both frames alive without cloning.
    pub fn draw_swap(&mut self, fb: &mut FrameBuffer) -> Result<()> {
        self.bytes.clear();
        encode_frame(self.shown.as_ref(), fb, &mut self.bytes)?;
        self.write_bytes()?;

        let mut previous = self
            .shown
            .take()
            .unwrap_or_else(|| FrameBuffer::new(fb.width(), fb.height()));
        previous.resize(fb.width(), fb.height());
        std::mem::swap(&mut previous, fb);
        self.shown = Some(previous);
        Ok(())
    }

    fn write_bytes(&mut self) -> Result<()> {
        self.out
            .write_all(&self.bytes)
            .and_then(|_| self.out.flush())
            .context("write frame to terminal")
    }
}

/// Encode `next` into `out`, as a diff against `shown` when the sizes match.
pub fn encode_frame(
    shown: Option<&FrameBuffer>,
    next: &FrameBuffer,
    out: &mut Vec<u8>,
) -> Result<()> {
    let mut pen = Pen::new(out);
    match shown {
        Some(prev) if prev.width() == next.width() && prev.height() == next.height() => {
            for y in 0..next.height() {
                for (x, len) in changed_spans(prev, next, y) {
                    pen.out.queue(cursor::MoveTo(x, y))?;
                    for dx in 0..len {
                        pen.cell(next.get(x + dx, y).unwrap_or_default())?;
                    }
                }
            }
        }
        _ => {
            pen.out.queue(terminal::Clear(terminal::ClearType::All))?;
            for y in 0..next.height() {
                pen.out.queue(cursor::MoveTo(0, y))?;
                for x in 0..next.width() {
                    pen.cell(next.get(x, y).unwrap_or_default())?;
                }
            }
        }
    }
    reset_style(out)
}

/// Emits cells, switching colors only when the style changes.
struct Pen<'a> {
    out: &'a mut Vec<u8>,
    style: Option<CellStyle>,
}

impl<'a> Pen<'a> {
    fn new(out: &'a mut Vec<u8>) -> Self {
        Self { out, style: None }
    }

    fn cell(&mut self, cell: Cell) -> Result<()> {
        if self.style != Some(cell.style) {
            let style = cell.style;
            self.out.queue(SetAttribute(Attribute::Reset))?;
            self.out.queue(SetForegroundColor(truecolor(style.fg)))?;
            self.out.queue(SetBackgroundColor(truecolor(style.bg)))?;
            if style.bold {
                self.out.queue(SetAttribute(Attribute::Bold))?;
            }
            if style.dim {
                self.out.queue(SetAttribute(Attribute::Dim))?;
            }
            self.style = Some(style);
        }
        self.out.queue(Print(cell.ch))?;
        Ok(())
    }
}

fn reset_style(out: &mut Vec<u8>) -> Result<()> {
    out.queue(ResetColor)?;
    out.queue(SetAttribute(Attribute::Reset))?;
    Ok(())
}

fn truecolor(rgb: Rgb) -> Color {
    Color::Rgb {
        r: rgb.r,
        g: rgb.g,
        b: rgb.b,
    }
}

/// `(x, len)` spans of row `y` where the two frames differ. Same-size frames only.
fn changed_spans<'a>(
    prev: &'a FrameBuffer,
    next: &'a FrameBuffer,
    y: u16,
) -> impl Iterator<Item = (u16, u16)> + 'a {
    let width = next.width();
    let differs = move |x: u16| prev.get(x, y) != next.get(x, y);
    let mut x = 0u16;
    std::iter::from_fn(move || {
        while x < width && !differs(x) {
            x += 1;
        }
        if x >= width {
            return None;
        }
        let start = x;
        while x < width && differs(x) {
            x += 1;
        }
        Some((start, x - start))
    })
}
