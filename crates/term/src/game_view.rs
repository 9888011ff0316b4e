//! GameView: maps a [`GameSnapshot`] into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.
//!
//! Layout, top to bottom: the bordered 10x10 board, then the three trio
//! slots. A side panel (score, best, power-ups, settings) is drawn to the
//! right when the viewport is wide enough.

use crate::core::{Cell, GameSnapshot, Piece};
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::theme::Palette;
use crate::types::{CellFx, HintState, PowerUpKind, ThemeName, GRID_SIZE, TRIO_SIZE};

/// Largest piece footprint, in cells
const SLOT_CELLS: u16 = 5;
const PANEL_MIN_W: u16 = 18;

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

/// Presentation state that lives outside the game: cursor, selection and
/// preferences.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HudView {
    pub theme: ThemeName,
    pub cursor: Option<(i8, i8)>,
    pub selected_slot: usize,
    pub sfx_enabled: bool,
    pub music_enabled: bool,
}

impl Default for HudView {
    fn default() -> Self {
        Self {
            theme: ThemeName::default(),
            cursor: None,
            selected_slot: 0,
            sfx_enabled: true,
            music_enabled: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorY {
    Center,
    Top,
}

/// Where the board frame and the trio row land for a given viewport
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layout {
    pub board_x: u16,
    pub board_y: u16,
    pub frame_w: u16,
    pub frame_h: u16,
    pub trio_x: u16,
    pub trio_y: u16,
    pub panel_x: u16,
}

/// A lightweight terminal renderer for the block puzzle.
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

impl GameView {
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self {
            cell_w: cell_w.max(1),
            cell_h: cell_h.max(1),
            anchor_y: AnchorY::Center,
        }
    }

    pub fn with_anchor_y(mut self, anchor_y: AnchorY) -> Self {
        self.anchor_y = anchor_y;
        self
    }

    fn slot_w(&self) -> u16 {
        SLOT_CELLS * self.cell_w
    }

    pub fn layout(&self, viewport: Viewport) -> Layout {
        let side = GRID_SIZE as u16;
        let frame_w = side * self.cell_w + 2;
        let frame_h = side * self.cell_h + 2;
        let trio_w = TRIO_SIZE as u16 * (self.slot_w() + 1) - 1;
        let content_w = frame_w.max(trio_w);
        // Frame, a spacer, the slot labels, then the slots.
        let content_h = frame_h + 2 + SLOT_CELLS * self.cell_h;

        let start_x = viewport.width.saturating_sub(content_w) / 2;
        let start_y = match self.anchor_y {
            AnchorY::Center => viewport.height.saturating_sub(content_h) / 2,
            AnchorY::Top => 0,
        };

        Layout {
            board_x: start_x + (content_w - frame_w) / 2,
            board_y: start_y,
            frame_w,
            frame_h,
            trio_x: start_x + (content_w - trio_w) / 2,
            trio_y: start_y + frame_h + 1,
            panel_x: start_x.saturating_add(content_w).saturating_add(2),
        }
    }

    /// Render into an existing framebuffer.
    ///
    /// This is the allocation-free hot path. Callers can reuse a framebuffer
    /// across frames and only resize when the terminal size changes.
    pub fn render_into(
        &self,
        snap: &GameSnapshot,
        hud: &HudView,
        viewport: Viewport,
        fb: &mut FrameBuffer,
    ) {
        let palette = Palette::for_theme(hud.theme);
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::new(palette.text, palette.backdrop).into_cell(' '));

        let layout = self.layout(viewport);
        self.draw_border(
            fb,
            layout.board_x,
            layout.board_y,
            layout.frame_w,
            layout.frame_h,
            palette.border_style(),
        );

        for (r, row) in snap.board.iter().enumerate() {
            for (c, cell) in row.iter().enumerate() {
                let (ch, style) = board_glyph(cell, palette);
                self.fill_board_cell(fb, &layout, r as u16, c as u16, ch, style);
            }
        }

        if let Some((row, col)) = hud.cursor {
            self.draw_cursor(fb, &layout, snap, palette, row, col);
        }

        self.draw_trio(fb, snap, hud, palette, &layout);
        self.draw_side_panel(fb, snap, hud, palette, viewport, &layout);

        if snap.game_over {
            self.draw_overlay_text(fb, &layout, 0, "GAME OVER", palette);
            self.draw_overlay_text(fb, &layout, 1, "N: new game", palette);
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &GameSnapshot, hud: &HudView, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, hud, viewport, &mut fb);
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

    fn fill_board_cell(
        &self,
        fb: &mut FrameBuffer,
        layout: &Layout,
        row: u16,
        col: u16,
        ch: char,
        style: CellStyle,
    ) {
        let px = layout.board_x + 1 + col * self.cell_w;
        let py = layout.board_y + 1 + row * self.cell_h;
        fb.fill_rect(px, py, self.cell_w, self.cell_h, ch, style);
    }

    /// Brackets around the cursor cell, keeping whatever is underneath
    fn draw_cursor(
        &self,
        fb: &mut FrameBuffer,
        layout: &Layout,
        snap: &GameSnapshot,
        palette: &Palette,
        row: i8,
        col: i8,
    ) {
        let side = GRID_SIZE as i8;
        if !(0..side).contains(&row) || !(0..side).contains(&col) {
            return;
        }
        let px = layout.board_x + 1 + col as u16 * self.cell_w;
        let py = layout.board_y + 1 + row as u16 * self.cell_h;
        let bg = fb.get(px, py).map_or(palette.empty, |c| c.style.bg);
        let fg = if snap.armed.is_some() {
            palette.hint_bad.over(Rgb::new(255, 255, 255), 96)
        } else {
            palette.accent
        };
        let style = CellStyle::new(fg, bg).bold();
        fb.put_char(px, py, '[', style);
        fb.put_char(px + self.cell_w - 1, py, ']', style);
    }

    fn draw_trio(
        &self,
        fb: &mut FrameBuffer,
        snap: &GameSnapshot,
        hud: &HudView,
        palette: &Palette,
        layout: &Layout,
    ) {
        let selected = if hud.selected_slot < snap.trio.len() {
            hud.selected_slot
        } else {
            0
        };
        let label = palette.label_style();
        let idle = palette.text_style().dim();
        let slot_w = self.slot_w();

        for slot in 0..TRIO_SIZE {
            let x = layout.trio_x + slot as u16 * (slot_w + 1);
            let number = (slot as u32) + 1;
            let piece = snap.trio.get(slot);
            if piece.is_some() && slot == selected && snap.armed.is_none() {
                fb.put_char(x, layout.trio_y, '▶', label);
                fb.put_u32(x + 1, layout.trio_y, number, label);
            } else {
                fb.put_u32(x + 1, layout.trio_y, number, idle);
            }
            if let Some(piece) = piece {
                self.draw_piece(fb, piece, snap.playable(), palette, x, layout.trio_y + 1);
            }
        }
    }

    fn draw_piece(
        &self,
        fb: &mut FrameBuffer,
        piece: &Piece,
        playable: bool,
        palette: &Palette,
        x: u16,
        y: u16,
    ) {
        let mut style = CellStyle::new(palette.block(piece.color()), palette.backdrop);
        if !playable {
            style = style.dim();
        }
        for (r, c) in piece.shape().cells() {
            fb.fill_rect(
                x + c as u16 * self.cell_w,
                y + r as u16 * self.cell_h,
                self.cell_w,
                self.cell_h,
                '█',
                style,
            );
        }
    }

    fn draw_side_panel(
        &self,
        fb: &mut FrameBuffer,
        snap: &GameSnapshot,
        hud: &HudView,
        palette: &Palette,
        viewport: Viewport,
        layout: &Layout,
    ) {
        let panel_x = layout.panel_x;
        if panel_x >= viewport.width || viewport.width - panel_x < PANEL_MIN_W {
            return;
        }

        let label = palette.label_style();
        let value = palette.text_style();
        let dim = value.dim();

        let mut y = layout.board_y;
        fb.put_str(panel_x, y, "SCORE", label);
        y = y.saturating_add(1);
        fb.put_u32(panel_x, y, snap.score, value);
        y = y.saturating_add(2);

        fb.put_str(panel_x, y, "BEST", label);
        y = y.saturating_add(1);
        fb.put_u32(panel_x, y, snap.high_score, value);
        y = y.saturating_add(2);

        fb.put_str(panel_x, y, "MODE", label);
        y = y.saturating_add(1);
        fb.put_str(panel_x, y, snap.difficulty.as_str(), value);
        y = y.saturating_add(2);

        fb.put_str(panel_x, y, "POWER-UPS", label);
        y = y.saturating_add(1);
        for (key, name, kind) in [
            ('B', "area", PowerUpKind::AreaClear),
            ('X', "single", PowerUpKind::SingleClear),
            ('R', "shuffle", PowerUpKind::Reshuffle),
        ] {
            let count = snap.power_ups.count(kind);
            let armed = snap.armed == Some(kind);
            let style = if armed {
                label
            } else if count == 0 {
                dim
            } else {
                value
            };
            fb.put_char(panel_x, y, if armed { '▶' } else { ' ' }, style);
            fb.put_char(panel_x + 1, y, key, style);
            fb.put_str(panel_x + 3, y, name, style);
            fb.put_char(panel_x + 11, y, 'x', style);
            fb.put_u32(panel_x + 12, y, count as u32, style);
            y = y.saturating_add(1);
        }
        y = y.saturating_add(1);

        fb.put_str(panel_x, y, "THEME", label);
        y = y.saturating_add(1);
        fb.put_str(panel_x, y, hud.theme.display_name(), value);
        y = y.saturating_add(2);

        let x = fb.put_str(panel_x, y, "SFX ", value);
        fb.put_str(x, y, on_off(hud.sfx_enabled), value);
        y = y.saturating_add(1);
        let x = fb.put_str(panel_x, y, "MUSIC ", value);
        fb.put_str(x, y, on_off(hud.music_enabled), value);
    }

    /// Centered text over the board; `line` counts down from the middle row
    fn draw_overlay_text(
        &self,
        fb: &mut FrameBuffer,
        layout: &Layout,
        line: u16,
        text: &str,
        palette: &Palette,
    ) {
        let mid_y = layout.board_y.saturating_add(layout.frame_h / 2).saturating_sub(1) + line;
        let text_w = text.chars().count() as u16;
        let x = layout
            .board_x
            .saturating_add(layout.frame_w.saturating_sub(text_w) / 2);
        let style = CellStyle::new(Rgb::new(255, 255, 255), palette.backdrop).bold();
        fb.put_str(x, mid_y, text, style);
    }
}

fn on_off(enabled: bool) -> &'static str {
    if enabled {
        "on"
    } else {
        "off"
    }
}

/// Glyph and colors for one board cell
fn board_glyph(cell: &Cell, palette: &Palette) -> (char, CellStyle) {
    let Some(color) = cell.color() else {
        let bg = match cell.hint() {
            HintState::None => palette.empty,
            HintState::Good => palette.hint_good_over(palette.empty),
            HintState::Bad => palette.hint_bad,
        };
        return ('·', CellStyle::new(palette.grid, bg).dim());
    };

    let mut fg = palette.block(color);
    match cell.hint() {
        HintState::None => {}
        HintState::Good => fg = palette.hint_good_over(fg),
        HintState::Bad => fg = palette.hint_bad.over(fg, 160),
    }

    let base = CellStyle::new(fg, palette.board);
    match cell.fx() {
        CellFx::Idle => ('█', base),
        CellFx::JustPlaced => ('█', base.bold()),
        CellFx::Clearing { .. } => ('▓', base.bold()),
        CellFx::Exploding => ('✸', CellStyle::new(Rgb::new(255, 237, 213), fg).bold()),
        CellFx::Dissolving => ('░', base.dim()),
    }
}
