//! GameView: lays the board canvas and run status out into a framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::canvas::BoardCanvas;
use crate::core::{GameSnapshot, RunState};
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::theme::Theme;
use crate::types::{CellState, Coord, COLS, ROWS};

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

/// Host-side numbers shown next to the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StatusView {
    /// Best score for the configured tier
    pub best: u32,
    /// Average score for the configured tier
    pub average: u32,
    /// Tick rate selected for the next run
    pub tier: u32,
    pub use_beep: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorY {
    Center,
    Top,
}

pub struct GameView {
    /// Board cell width in terminal columns.
    cell_w: u16,
    /// Board cell height in terminal rows.
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

const PANEL_MIN_WIDTH: u16 = 12;

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

    /// Render into an existing framebuffer.
    ///
    /// Board cells come from the canvas (what the engine published); the
    /// snapshot supplies segment order for colouring plus the run numbers.
    pub fn render_into(
        &self,
        canvas: &BoardCanvas,
        snap: &GameSnapshot,
        theme: &Theme,
        status: &StatusView,
        viewport: Viewport,
        fb: &mut FrameBuffer,
    ) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::default().into_cell(' '));

        let board_px_w = (COLS as u16) * self.cell_w;
        let board_px_h = (ROWS as u16) * self.cell_h;
        let frame_w = board_px_w + 2;
        let frame_h = board_px_h + 2;

        let start_x = viewport.width.saturating_sub(frame_w) / 2;
        let start_y = match self.anchor_y {
            AnchorY::Center => viewport.height.saturating_sub(frame_h) / 2,
            AnchorY::Top => 0,
        };

        let border = CellStyle {
            fg: Rgb::new(200, 200, 200),
            bg: Rgb::new(0, 0, 0),
            bold: false,
            dim: canvas.is_faded(),
        };
        self.draw_border(fb, start_x, start_y, frame_w, frame_h, border);

        let board_alpha = canvas.alpha();
        for y in 0..ROWS {
            for x in 0..COLS {
                let coord = Coord::new(x, y);
                let (ch, style) = match canvas.cell(coord) {
                    CellState::Empty => {
                        let bg = theme.shade(theme.background, 1.0, board_alpha);
                        let fg = theme.shade(theme.grid, 1.0, board_alpha);
                        ('·', CellStyle { fg, bg, bold: false, dim: true })
                    }
                    CellState::Fruit => {
                        let bg = theme.shade(theme.background, 1.0, board_alpha);
                        let fg = theme.shade(theme.fruit, 1.0, board_alpha);
                        ('●', CellStyle { fg, bg, bold: true, dim: false })
                    }
                    // Overdrawn below with the segment colour when the snapshot knows it.
                    CellState::Snake => (
                        ' ',
                        CellStyle::solid(theme.shade(theme.primary, 1.0, board_alpha)),
                    ),
                };
                self.fill_cell_rect(fb, start_x, start_y, coord, ch, style);
            }
        }

        let len = snap.snake.len();
        for (i, &coord) in snap.snake.iter().enumerate() {
            if canvas.cell(coord) != CellState::Snake {
                continue;
            }
            let (color, alpha) = theme.segment(i, len);
            let style = CellStyle::solid(theme.shade(color, alpha, board_alpha));
            self.fill_cell_rect(fb, start_x, start_y, coord, ' ', style);
        }

        self.draw_side_panel(fb, snap, status, viewport, start_x, start_y, frame_w);

        match snap.state {
            RunState::Paused => {
                self.draw_overlay_text(fb, start_x, start_y, frame_w, frame_h, "PAUSED")
            }
            RunState::Stopped => {
                self.draw_overlay_text(fb, start_x, start_y, frame_w, frame_h, "ENTER TO START")
            }
            RunState::Running => {}
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(
        &self,
        canvas: &BoardCanvas,
        snap: &GameSnapshot,
        theme: &Theme,
        status: &StatusView,
        viewport: Viewport,
    ) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(canvas, snap, theme, status, viewport, &mut fb);
        fb
    }

    /// Terminal position of the top-left character of a board cell.
    ///
    /// Board y grows upward, terminal rows grow downward.
    pub fn cell_origin(&self, viewport: Viewport, coord: Coord) -> Option<(u16, u16)> {
        if !coord.in_bounds() {
            return None;
        }
        let frame_w = (COLS as u16) * self.cell_w + 2;
        let frame_h = (ROWS as u16) * self.cell_h + 2;
        let start_x = viewport.width.saturating_sub(frame_w) / 2;
        let start_y = match self.anchor_y {
            AnchorY::Center => viewport.height.saturating_sub(frame_h) / 2,
            AnchorY::Top => 0,
        };
        Some(self.cell_px(start_x, start_y, coord))
    }

    fn cell_px(&self, start_x: u16, start_y: u16, coord: Coord) -> (u16, u16) {
        let row = (ROWS - 1 - coord.y) as u16;
        let px = start_x + 1 + (coord.x as u16) * self.cell_w;
        let py = start_y + 1 + row * self.cell_h;
        (px, py)
    }

    fn fill_cell_rect(
        &self,
        fb: &mut FrameBuffer,
        start_x: u16,
        start_y: u16,
        coord: Coord,
        ch: char,
        style: CellStyle,
    ) {
        let (px, py) = self.cell_px(start_x, start_y, coord);
        fb.fill_rect(px, py, self.cell_w, self.cell_h, ch, style);
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

    #[allow(clippy::too_many_arguments)]
    fn draw_side_panel(
        &self,
        fb: &mut FrameBuffer,
        snap: &GameSnapshot,
        status: &StatusView,
        viewport: Viewport,
        start_x: u16,
        start_y: u16,
        frame_w: u16,
    ) {
        let panel_x = start_x.saturating_add(frame_w).saturating_add(2);
        if panel_x >= viewport.width || viewport.width - panel_x < PANEL_MIN_WIDTH {
            return;
        }

        let label = CellStyle {
            fg: Rgb::new(220, 220, 220),
            bg: Rgb::new(0, 0, 0),
            bold: true,
            dim: false,
        };
        let value = CellStyle {
            fg: Rgb::new(200, 200, 200),
            bg: Rgb::new(0, 0, 0),
            bold: false,
            dim: false,
        };

        let mut y = start_y;
        fb.put_str(panel_x, y, "SCORE", label);
        y = y.saturating_add(1);
        fb.put_u32(panel_x, y, snap.score, value);
        y = y.saturating_add(2);

        // During a run the bucket is the run's own tier; otherwise the configured one.
        let tier = if snap.state == RunState::Stopped {
            status.tier
        } else {
            snap.tier
        };
        fb.put_str(panel_x, y, "SPEED", label);
        y = y.saturating_add(1);
        fb.put_u32(panel_x, y, tier, value);
        y = y.saturating_add(2);

        fb.put_str(panel_x, y, "BEST", label);
        y = y.saturating_add(1);
        fb.put_u32(panel_x, y, status.best, value);
        y = y.saturating_add(2);

        fb.put_str(panel_x, y, "AVG", label);
        y = y.saturating_add(1);
        fb.put_u32(panel_x, y, status.average, value);
        y = y.saturating_add(2);

        fb.put_str(panel_x, y, "BEEP", label);
        y = y.saturating_add(1);
        fb.put_str(panel_x, y, if status.use_beep { "ON" } else { "OFF" }, value);
        y = y.saturating_add(2);

        let dim = CellStyle { dim: true, ..value };
        fb.put_str(panel_x, y, snap.state.as_str(), dim);
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
        let style = CellStyle {
            fg: Rgb::new(255, 255, 255),
            bg: Rgb::new(0, 0, 0),
            bold: true,
            dim: false,
        };
        fb.put_str(x, mid_y, text, style);
    }
}
