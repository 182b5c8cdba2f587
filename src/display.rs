//! Rendering layer — all terminal I/O lives here.
//!
//! Each function receives a mutable writer and an immutable view of the
//! game state.  No game logic is performed; this module only translates
//! world coordinates into terminal cells and state into terminal commands.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal,
    QueueableCommand,
};
use bubble_pop::config::{GameConfig, Rgb};
use bubble_pop::entities::{Bubble, BubbleKind, EntireGameStateInfo, GameStatus, Particle};

// ── Colour palette ────────────────────────────────────────────────────────────

const C_BACKGROUND: Color = Color::Rgb { r: 25, g: 25, b: 40 };
const C_HUD_SCORE: Color = Color::Rgb { r: 255, g: 255, b: 100 };
const C_HUD_LIVES: Color = Color::Rgb { r: 255, g: 100, b: 150 };
const C_HUD_LEVEL: Color = Color::Rgb { r: 100, g: 200, b: 255 };
const C_HUD_COMBO: Color = Color::Rgb { r: 100, g: 255, b: 150 };
const C_MARK: Color = Color::White;
const C_HINT: Color = Color::DarkGrey;
const C_TITLE: Color = Color::Rgb { r: 100, g: 200, b: 255 };
const C_GAME_OVER: Color = Color::Rgb { r: 255, g: 100, b: 100 };

/// Rows reserved above the playfield for the HUD.
const HUD_ROWS: u16 = 1;

fn color(rgb: Rgb) -> Color {
    Color::Rgb {
        r: rgb.0,
        g: rgb.1,
        b: rgb.2,
    }
}

// ── World ↔ terminal mapping ──────────────────────────────────────────────────

/// The terminal area the playfield is stretched over.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub cols: u16,
    pub rows: u16,
    world_w: f32,
    world_h: f32,
}

impl Viewport {
    pub fn new(cols: u16, rows: u16, cfg: &GameConfig) -> Self {
        Self {
            cols: cols.max(1),
            rows: rows.max(HUD_ROWS + 1),
            world_w: cfg.width,
            world_h: cfg.height,
        }
    }

    fn play_rows(&self) -> u16 {
        self.rows - HUD_ROWS
    }

    /// World units covered by one cell, horizontally and vertically.
    fn cell_size(&self) -> (f32, f32) {
        (
            self.world_w / self.cols as f32,
            self.world_h / self.play_rows() as f32,
        )
    }

    /// The world point at the centre of a terminal cell, or `None` for the HUD.
    pub fn cell_to_world(&self, col: u16, row: u16) -> Option<(f32, f32)> {
        if row < HUD_ROWS || row >= self.rows || col >= self.cols {
            return None;
        }
        let (cw, ch) = self.cell_size();
        Some((
            (col as f32 + 0.5) * cw,
            ((row - HUD_ROWS) as f32 + 0.5) * ch,
        ))
    }

    /// The cell containing a world point, if it is inside the playfield.
    pub fn world_to_cell(&self, x: f32, y: f32) -> Option<(u16, u16)> {
        if x < 0.0 || y < 0.0 || x >= self.world_w || y >= self.world_h {
            return None;
        }
        let (cw, ch) = self.cell_size();
        let col = ((x / cw) as u16).min(self.cols - 1);
        let row = ((y / ch) as u16).min(self.play_rows() - 1);
        Some((col, row + HUD_ROWS))
    }

    /// Cells whose centre falls inside the bubble's drawn outline.
    pub fn bubble_cells(&self, bubble: &Bubble) -> Vec<(u16, u16)> {
        let r = bubble.display_radius();
        let (cw, ch) = self.cell_size();
        let col_lo = ((bubble.x - r) / cw).floor().max(0.0) as u16;
        let col_hi = (((bubble.x + r) / cw).ceil().max(0.0) as u16).min(self.cols);
        let row_lo = ((bubble.y - r) / ch).floor().max(0.0) as u16;
        let row_hi = (((bubble.y + r) / ch).ceil().max(0.0) as u16).min(self.play_rows());

        let mut cells = Vec::new();
        for row in row_lo..row_hi {
            for col in col_lo..col_hi {
                let cx = (col as f32 + 0.5) * cw;
                let cy = (row as f32 + 0.5) * ch;
                let (dx, dy) = (cx - bubble.x, cy - bubble.y);
                if dx * dx + dy * dy <= r * r {
                    cells.push((col, row + HUD_ROWS));
                }
            }
        }
        cells
    }
}

// ── Public entry point ────────────────────────────────────────────────────────

/// Render one complete frame.
pub fn render<W: Write>(
    out: &mut W,
    state: &EntireGameStateInfo,
    view: &Viewport,
) -> std::io::Result<()> {
    out.queue(style::SetBackgroundColor(C_BACKGROUND))?;
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    for bubble in &state.bubbles {
        draw_bubble(out, bubble, view)?;
    }
    for particle in &state.particles {
        draw_particle(out, particle, view)?;
    }

    draw_hud(out, state, view)?;

    match state.status {
        GameStatus::NotStarted => draw_start_screen(out, view)?,
        GameStatus::Playing => draw_instructions(out, view)?,
        GameStatus::GameOver => draw_game_over(out, state, view)?,
    }

    // Park cursor in a harmless spot and flush
    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, view.rows.saturating_sub(1)))?;
    out.flush()?;
    Ok(())
}

// ── HUD (row 0) ───────────────────────────────────────────────────────────────

fn draw_hud<W: Write>(
    out: &mut W,
    state: &EntireGameStateInfo,
    view: &Viewport,
) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_SCORE))?;
    out.queue(Print(format!("Score:{:>6}  ", state.score)))?;

    out.queue(style::SetForegroundColor(C_HUD_LIVES))?;
    out.queue(Print(format!("Lives:{:<5}  ", "♥".repeat(state.lives as usize))))?;

    out.queue(style::SetForegroundColor(C_HUD_LEVEL))?;
    out.queue(Print(format!("Level:{}", state.level)))?;

    // Combo — right side, only while a chain is running
    if state.combo > 1 {
        let combo = format!("Combo: x{}!", state.combo);
        let x = view.cols.saturating_sub(combo.chars().count() as u16 + 1);
        out.queue(cursor::MoveTo(x, 0))?;
        out.queue(style::SetForegroundColor(C_HUD_COMBO))?;
        out.queue(Print(combo))?;
    }
    Ok(())
}

// ── Entities ──────────────────────────────────────────────────────────────────

fn draw_bubble<W: Write>(out: &mut W, bubble: &Bubble, view: &Viewport) -> std::io::Result<()> {
    out.queue(style::SetForegroundColor(color(bubble.color)))?;
    for (col, row) in view.bubble_cells(bubble) {
        out.queue(cursor::MoveTo(col, row))?;
        out.queue(Print("█"))?;
    }

    let mark = match bubble.kind {
        BubbleKind::Normal => return Ok(()),
        BubbleKind::Bomb => "X",
        BubbleKind::Coin => "$",
        BubbleKind::Heart => "♥",
    };
    if let Some((col, row)) = view.world_to_cell(bubble.x, bubble.y) {
        out.queue(cursor::MoveTo(col, row))?;
        out.queue(style::SetForegroundColor(C_MARK))?;
        out.queue(style::SetBackgroundColor(color(bubble.color)))?;
        out.queue(Print(mark))?;
        out.queue(style::SetBackgroundColor(C_BACKGROUND))?;
    }
    Ok(())
}

fn draw_particle<W: Write>(
    out: &mut W,
    particle: &Particle,
    view: &Viewport,
) -> std::io::Result<()> {
    if particle.size < 1.0 {
        return Ok(());
    }
    let Some((col, row)) = view.world_to_cell(particle.x, particle.y) else {
        return Ok(());
    };
    let glyph = if particle.size >= 5.0 { "•" } else { "·" };
    out.queue(cursor::MoveTo(col, row))?;
    out.queue(style::SetForegroundColor(color(particle.color)))?;
    out.queue(Print(glyph))?;
    Ok(())
}

// ── Overlays ──────────────────────────────────────────────────────────────────

fn print_centered<W: Write>(
    out: &mut W,
    view: &Viewport,
    row: u16,
    text: &str,
    fg: Color,
) -> std::io::Result<()> {
    let x = (view.cols / 2).saturating_sub(text.chars().count() as u16 / 2);
    out.queue(cursor::MoveTo(x, row))?;
    out.queue(style::SetForegroundColor(fg))?;
    out.queue(Print(text))?;
    Ok(())
}

fn draw_start_screen<W: Write>(out: &mut W, view: &Viewport) -> std::io::Result<()> {
    let cy = view.rows / 2;
    print_centered(out, view, cy.saturating_sub(4), "◯  BUBBLE  POP  ◯", C_TITLE)?;
    print_centered(out, view, cy, "Press SPACE to Start", C_HUD_COMBO)?;
    print_centered(
        out,
        view,
        cy + 2,
        "Click on bubbles to pop them and score points!",
        C_HUD_SCORE,
    )?;
    print_centered(out, view, cy + 4, "ESC / Q : Quit", C_HINT)?;
    Ok(())
}

fn draw_instructions<W: Write>(out: &mut W, view: &Viewport) -> std::io::Result<()> {
    const LINES: [&str; 6] = [
        "Click bubbles to pop them!",
        "Grey bubbles (X) are bombs - avoid them!",
        "Gold bubbles ($) give 50 points",
        "Heart bubbles (♥) give extra life",
        "Don't let bubbles reach the top!",
        "ESC: Quit  |  R: Restart",
    ];
    out.queue(style::SetForegroundColor(C_HINT))?;
    for (i, line) in LINES.iter().enumerate() {
        let row = HUD_ROWS + 1 + i as u16;
        if row >= view.rows {
            break;
        }
        let x = view.cols.saturating_sub(line.chars().count() as u16 + 1);
        out.queue(cursor::MoveTo(x, row))?;
        out.queue(Print(*line))?;
    }
    Ok(())
}

fn draw_game_over<W: Write>(
    out: &mut W,
    state: &EntireGameStateInfo,
    view: &Viewport,
) -> std::io::Result<()> {
    let cy = view.rows / 2;
    print_centered(out, view, cy.saturating_sub(3), "G A M E   O V E R", C_GAME_OVER)?;
    print_centered(
        out,
        view,
        cy,
        &format!("Final Score: {}", state.score),
        C_HUD_SCORE,
    )?;
    print_centered(out, view, cy + 2, "Press R to Restart", C_HUD_COMBO)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bubble_at(x: f32, y: f32, radius: u32) -> Bubble {
        Bubble {
            x,
            y,
            radius,
            speed: 1.0,
            color: Rgb(1, 2, 3),
            kind: BubbleKind::Normal,
            pulse: 0.0,
            pulse_speed: 0.0,
            wobble: 0.0,
            wobble_speed: 0.0,
            wobble_amount: 0.0,
        }
    }

    #[test]
    fn hud_row_is_not_playfield() {
        let view = Viewport::new(80, 25, &GameConfig::default());
        assert_eq!(view.cell_to_world(10, 0), None);
        assert_eq!(view.cell_to_world(80, 5), None);
    }

    #[test]
    fn cell_centre_maps_to_world() {
        // 80 cols over 800 units, 24 play rows over 600 units → 10 x 25 cells
        let view = Viewport::new(80, 25, &GameConfig::default());
        assert_eq!(view.cell_to_world(0, 1), Some((5.0, 12.5)));
        assert_eq!(view.cell_to_world(79, 24), Some((795.0, 587.5)));
    }

    #[test]
    fn world_to_cell_inverts_cell_to_world() {
        let view = Viewport::new(80, 25, &GameConfig::default());
        let (x, y) = view.cell_to_world(33, 7).unwrap();
        assert_eq!(view.world_to_cell(x, y), Some((33, 7)));
        assert_eq!(view.world_to_cell(-1.0, 10.0), None);
        assert_eq!(view.world_to_cell(10.0, 600.0), None);
    }

    #[test]
    fn bubble_cells_cover_its_centre() {
        let view = Viewport::new(80, 25, &GameConfig::default());
        let b = bubble_at(405.0, 312.5, 30);
        let cells = view.bubble_cells(&b);
        assert!(cells.contains(&(40, 13)));
        assert!(!cells.contains(&(0, 1)));
    }

    #[test]
    fn offscreen_bubble_has_no_cells() {
        let view = Viewport::new(80, 25, &GameConfig::default());
        let b = bubble_at(400.0, 640.0, 30);
        assert!(view.bubble_cells(&b).is_empty());
    }
}
