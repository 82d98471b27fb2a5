//! Terminal output for the game screen.
//!
//! [`ScreenState`] remembers the frame currently on screen and the SGR state
//! the terminal was left in. Presenting a new frame writes only the spans that
//! differ from it; board cells are two columns wide, so a normal tick touches
//! a few short spans (new head, vacated tail, respawned fruit, score digits).
//! [`TerminalRenderer`] wraps that state around stdout.

use std::io::{self, Write};

use anyhow::Result;

use crossterm::{
    cursor, event, queue,
    style::{Attribute, Color, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor},
    terminal::{self, BeginSynchronizedUpdate, ClearType, EndSynchronizedUpdate},
};

use crate::fb::{Cell, CellStyle, FrameBuffer, Rgb};

/// A horizontal run of cells that differ between two frames.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub x: u16,
    pub y: u16,
    pub len: u16,
}

/// Iterator over the [`Span`]s where `back` differs from `front`, row-major.
///
/// Cells of `back` with no counterpart in `front` count as changed.
pub struct ChangedSpans<'a> {
    front: &'a FrameBuffer,
    back: &'a FrameBuffer,
    x: usize,
    y: u16,
}

pub fn changed_spans<'a>(front: &'a FrameBuffer, back: &'a FrameBuffer) -> ChangedSpans<'a> {
    ChangedSpans {
        front,
        back,
        x: 0,
        y: 0,
    }
}

impl Iterator for ChangedSpans<'_> {
    type Item = Span;

    fn next(&mut self) -> Option<Span> {
        while self.y < self.back.height() {
            let old = self.front.row(self.y);
            let new = self.back.row(self.y);
            let same = |x: usize| old.get(x) == Some(&new[x]);

            let mut x = self.x;
            while x < new.len() && same(x) {
                x += 1;
            }
            if x < new.len() {
                let start = x;
                while x < new.len() && !same(x) {
                    x += 1;
                }
                self.x = x;
                return Some(Span {
                    x: start as u16,
                    y: self.y,
                    len: (x - start) as u16,
                });
            }
            self.x = 0;
            self.y += 1;
        }
        None
    }
}

/// Last style sent to the terminal, so each cell only emits what differs.
#[derive(Debug, Default)]
struct StylePen {
    current: Option<CellStyle>,
}

impl StylePen {
    fn apply<W: Write>(&mut self, out: &mut W, style: CellStyle) -> io::Result<()> {
        let kept = match self.current {
            Some(prev) if prev == style => return Ok(()),
            Some(prev) if prev.bold == style.bold && prev.dim == style.dim => Some(prev),
            _ => None,
        };
        if kept.is_none() {
            // Bold and dim can only be dropped by a full reset, which also drops colours.
            queue!(out, SetAttribute(Attribute::Reset))?;
            if style.bold {
                queue!(out, SetAttribute(Attribute::Bold))?;
            }
            if style.dim {
                queue!(out, SetAttribute(Attribute::Dim))?;
            }
        }
        if kept.map_or(true, |p| p.fg != style.fg) {
            queue!(out, SetForegroundColor(truecolor(style.fg)))?;
        }
        if kept.map_or(true, |p| p.bg != style.bg) {
            queue!(out, SetBackgroundColor(truecolor(style.bg)))?;
        }
        self.current = Some(style);
        Ok(())
    }

    fn forget(&mut self) {
        self.current = None;
    }
}

fn truecolor(rgb: Rgb) -> Color {
    Color::Rgb {
        r: rgb.r,
        g: rgb.g,
        b: rgb.b,
    }
}

/// What the terminal is showing, as far as this process knows.
#[derive(Debug, Default)]
pub struct ScreenState {
    front: Option<FrameBuffer>,
    pen: StylePen,
}

impl ScreenState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Next `encode` repaints everything (after a resize or foreign output).
    pub fn invalidate(&mut self) {
        self.front = None;
        self.pen.forget();
    }

    /// Append the bytes that turn the current screen into `frame` to `out`.
    ///
    /// Nothing is appended when `frame` matches what is already shown.
    pub fn encode<W: Write>(&mut self, frame: &FrameBuffer, out: &mut W) -> io::Result<()> {
        // Taken while encoding; a failed write leaves it empty and forces a repaint.
        let mut front = match self.front.take() {
            Some(front) if front.width() == frame.width() && front.height() == frame.height() => {
                front
            }
            _ => {
                self.pen.forget();
                queue!(out, BeginSynchronizedUpdate, terminal::Clear(ClearType::All))?;
                for y in 0..frame.height() {
                    queue!(out, cursor::MoveTo(0, y))?;
                    write_cells(out, &mut self.pen, frame.row(y))?;
                }
                queue!(out, EndSynchronizedUpdate)?;
                self.front = Some(frame.clone());
                return Ok(());
            }
        };

        let mut spans = changed_spans(&front, frame).peekable();
        if spans.peek().is_some() {
            queue!(out, BeginSynchronizedUpdate)?;
            for span in spans {
                let from = usize::from(span.x);
                let cells = &frame.row(span.y)[from..from + usize::from(span.len)];
                queue!(out, cursor::MoveTo(span.x, span.y))?;
                write_cells(out, &mut self.pen, cells)?;
            }
            queue!(out, EndSynchronizedUpdate)?;
            front.copy_from(frame);
        }
        self.front = Some(front);
        Ok(())
    }
}

fn write_cells<W: Write>(out: &mut W, pen: &mut StylePen, cells: &[Cell]) -> io::Result<()> {
    for cell in cells {
        pen.apply(out, cell.style)?;
        queue!(out, Print(cell.ch))?;
    }
    Ok(())
}

/// Owns stdout for the lifetime of the game screen.
pub struct TerminalRenderer {
    stdout: io::Stdout,
    screen: ScreenState,
    out: Vec<u8>,
}

impl TerminalRenderer {
    pub fn new() -> Self {
        Self {
            stdout: io::stdout(),
            screen: ScreenState::new(),
            out: Vec::with_capacity(16 * 1024),
        }
    }

    pub fn enter(&mut self) -> Result<()> {
        terminal::enable_raw_mode()?;
        self.out.clear();
        queue!(
            self.out,
            terminal::EnterAlternateScreen,
            cursor::Hide,
            terminal::DisableLineWrap,
            event::EnableFocusChange
        )?;
        self.screen.invalidate();
        self.flush()
    }

    pub fn exit(&mut self) -> Result<()> {
        self.out.clear();
        queue!(
            self.out,
            event::DisableFocusChange,
            ResetColor,
            SetAttribute(Attribute::Reset),
            terminal::EnableLineWrap,
            cursor::Show,
            terminal::LeaveAlternateScreen
        )?;
        self.flush()?;
        terminal::disable_raw_mode()?;
        Ok(())
    }

    /// Repaint fully on the next `present` (terminal resized).
    pub fn invalidate(&mut self) {
        self.screen.invalidate();
    }

    /// Show `frame`, ringing the bell first when `bell` is set.
    pub fn present(&mut self, frame: &FrameBuffer, bell: bool) -> Result<()> {
        self.out.clear();
        if bell {
            self.out.push(0x07);
        }
        self.screen.encode(frame, &mut self.out)?;
        self.flush()
    }

    fn flush(&mut self) -> Result<()> {
        if self.out.is_empty() {
            return Ok(());
        }
        self.stdout.write_all(&self.out)?;
        self.stdout.flush()?;
        Ok(())
    }
}

impl Default for TerminalRenderer {
    fn default() -> Self {
        Self::new()
    }
}
