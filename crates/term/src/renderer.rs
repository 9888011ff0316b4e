//! Pushes rendered frames to the real terminal.
//!
//! The board only changes a few cells per move, so each frame is compared
//! with the one before it and only the differing spans are written out.

use std::io::{self, Write};

use anyhow::Result;

use crossterm::{
    cursor,
    style::{
        Attribute, Color, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor,
    },
    terminal, QueueableCommand,
};

use crate::fb::{Cell, CellStyle, FrameBuffer, Rgb};
use crate::game_view::Viewport;

pub struct TerminalRenderer {
    stdout: io::Stdout,
    shown: Option<FrameBuffer>,
    out: Vec<u8>,
}

impl TerminalRenderer {
    pub fn new() -> Self {
        Self {
            stdout: io::stdout(),
            shown: None,
            out: Vec::with_capacity(32 * 1024),
        }
    }

    /// Raw mode on an alternate screen with a hidden cursor.
    pub fn enter(&mut self) -> Result<()> {
        terminal::enable_raw_mode()?;
        self.out.clear();
        self.out.queue(terminal::EnterAlternateScreen)?;
        self.out.queue(cursor::Hide)?;
        self.out.queue(terminal::DisableLineWrap)?;
        self.write_out()
    }

    pub fn exit(&mut self) -> Result<()> {
        self.out.clear();
        reset_style(&mut self.out)?;
        self.out.queue(terminal::EnableLineWrap)?;
        self.out.queue(cursor::Show)?;
        self.out.queue(terminal::LeaveAlternateScreen)?;
        self.write_out()?;
        terminal::disable_raw_mode()?;
        Ok(())
    }

    pub fn viewport(&self) -> Result<Viewport> {
        let (width, height) = terminal::size()?;
        Ok(Viewport::new(width, height))
    }

    /// Next draw repaints the whole screen.
    pub fn invalidate(&mut self) {
        self.shown = None;
    }

    /// Terminal bell, used as the sound effect.
    pub fn bell(&mut self) -> Result<()> {
        self.out.clear();
        self.out.queue(Print('\x07'))?;
        self.write_out()
    }

    /// Show `fb`, then hand back the previously shown frame in its place.
    ///
    /// The caller keeps redrawing into the same buffer each frame; the two
    /// buffers trade places so nothing is cloned.
    pub fn draw_swap(&mut self, fb: &mut FrameBuffer) -> Result<()> {
        self.out.clear();
        let mut spare = match self.shown.take() {
            Some(shown) if same_size(&shown, fb) => {
                encode_diff_into(&shown, fb, &mut self.out)?;
                shown
            }
            Some(mut shown) => {
                encode_full_into(fb, &mut self.out)?;
                shown.resize(fb.width(), fb.height());
                shown
            }
            None => {
                encode_full_into(fb, &mut self.out)?;
                FrameBuffer::new(fb.width(), fb.height())
            }
        };
        self.write_out()?;

        std::mem::swap(&mut spare, fb);
        self.shown = Some(spare);
        Ok(())
    }

    fn write_out(&mut self) -> Result<()> {
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

/// Clear the screen and write every cell of `fb` into `out`.
pub fn encode_full_into(fb: &FrameBuffer, out: &mut Vec<u8>) -> Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;
    out.queue(cursor::MoveTo(0, 0))?;

    let mut pen = Pen::default();
    for y in 0..fb.height() {
        for x in 0..fb.width() {
            pen.print(out, fb.get(x, y).unwrap_or_default())?;
        }
        if y + 1 < fb.height() {
            out.queue(Print("\r\n"))?;
        }
    }
    reset_style(out)
}

/// Write only the cells of `next` that differ from `prev` into `out`.
pub fn encode_diff_into(prev: &FrameBuffer, next: &FrameBuffer, out: &mut Vec<u8>) -> Result<()> {
    let mut pen = Pen::default();
    for_each_changed_run(prev, next, |x, y, len| {
        out.queue(cursor::MoveTo(x, y))?;
        for x in x..x + len {
            pen.print(out, next.get(x, y).unwrap_or_default())?;
        }
        Ok(())
    })?;
    reset_style(out)
}

/// Tracks the style last sent so runs of equal style emit it once
#[derive(Default)]
struct Pen {
    style: Option<CellStyle>,
}

impl Pen {
    fn print(&mut self, out: &mut Vec<u8>, cell: Cell) -> Result<()> {
        if self.style != Some(cell.style) {
            set_style(out, cell.style)?;
            self.style = Some(cell.style);
        }
        out.queue(Print(cell.ch))?;
        Ok(())
    }
}

fn set_style(out: &mut Vec<u8>, style: CellStyle) -> Result<()> {
    out.queue(SetAttribute(Attribute::Reset))?;
    out.queue(SetForegroundColor(to_color(style.fg)))?;
    out.queue(SetBackgroundColor(to_color(style.bg)))?;
    if style.bold {
        out.queue(SetAttribute(Attribute::Bold))?;
    }
    if style.dim {
        out.queue(SetAttribute(Attribute::Dim))?;
    }
    Ok(())
}

fn reset_style(out: &mut Vec<u8>) -> Result<()> {
    out.queue(ResetColor)?;
    out.queue(SetAttribute(Attribute::Reset))?;
    Ok(())
}

fn to_color(Rgb { r, g, b }: Rgb) -> Color {
    Color::Rgb { r, g, b }
}

fn same_size(a: &FrameBuffer, b: &FrameBuffer) -> bool {
    a.width() == b.width() && a.height() == b.height()
}

/// Calls `f(x, y, len)` for each horizontal span of cells that differ.
/// Frames of different sizes count as entirely changed.
fn for_each_changed_run(
    prev: &FrameBuffer,
    next: &FrameBuffer,
    mut f: impl FnMut(u16, u16, u16) -> Result<()>,
) -> Result<()> {
    let width = next.width();
    let resized = !same_size(prev, next);

    for y in 0..next.height() {
        let differs = |x: u16| resized || prev.get(x, y) != next.get(x, y);
        let mut run_start = None;
        for x in 0..width {
            match (run_start, differs(x)) {
                (None, true) => run_start = Some(x),
                (Some(start), false) => {
                    f(start, y, x - start)?;
                    run_start = None;
                }
                _ => {}
            }
        }
        if let Some(start) = run_start {
            f(start, y, width - start)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn runs(prev: &FrameBuffer, next: &FrameBuffer) -> Vec<(u16, u16, u16)> {
        let mut runs = Vec::new();
        for_each_changed_run(prev, next, |x, y, len| {
            runs.push((x, y, len));
            Ok(())
        })
        .unwrap();
        runs
    }

    #[test]
    fn placed_piece_becomes_one_run_per_row() {
        let style = CellStyle::default();
        let before = FrameBuffer::new(8, 3);
        let mut after = before.clone();
        after.put_str(2, 0, "████", style);
        after.put_char(7, 1, '█', style);

        assert_eq!(runs(&before, &after), vec![(2, 0, 4), (7, 1, 1)]);
    }

    #[test]
    fn resized_frame_is_all_changed() {
        let before = FrameBuffer::new(4, 2);
        let after = FrameBuffer::new(5, 2);
        assert_eq!(runs(&before, &after), vec![(0, 0, 5), (0, 1, 5)]);
    }

    #[test]
    fn unchanged_frame_only_resets_style() {
        let frame = FrameBuffer::new(4, 4);
        let mut out = Vec::new();
        encode_diff_into(&frame, &frame.clone(), &mut out).unwrap();

        let mut expected = Vec::new();
        reset_style(&mut expected).unwrap();
        assert_eq!(out, expected);
    }

    #[test]
    fn full_redraw_writes_the_text() {
        let mut fb = FrameBuffer::new(5, 2);
        fb.put_str(0, 1, "SCORE", CellStyle::default());
        let mut out = Vec::new();
        encode_full_into(&fb, &mut out).unwrap();
        assert!(String::from_utf8_lossy(&out).contains("SCORE"));
    }
}
