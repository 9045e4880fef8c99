//! GameView: draws a [`Snapshot`] into a framebuffer.
//!
//! Pure; no terminal I/O happens here.

use crate::core::{CellView, Snapshot};
use crate::fb::{CellStyle, FrameBuffer, Rgb};

const PANEL_GAP: u16 = 3;
const PANEL_WIDTH: u16 = 22;

const LEGEND: [&str; 7] = [
    "h/←  left",
    "l/→  right",
    "r/↑  rotate",
    "d/↓  drop",
    "p    pause",
    "g    gravity",
    "q    quit",
];

/// Terminal size in character cells.
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

pub struct GameView {
    /// Terminal columns per field cell
    cell_w: u16,
}

impl Default for GameView {
    fn default() -> Self {
        Self { cell_w: 2 }
    }
}

impl GameView {
    pub fn new(cell_w: u16) -> Self {
        Self {
            cell_w: cell_w.max(1),
        }
    }

    /// Smallest viewport that shows the whole field and side panel
    pub fn min_viewport(&self, snap: &Snapshot) -> Viewport {
        let field_w = snap.field.width() as u16 * self.cell_w;
        let field_h = snap.field.height() as u16;
        Viewport::new(
            field_w + PANEL_GAP + PANEL_WIDTH,
            field_h.max(Self::panel_height()),
        )
    }

    fn panel_height() -> u16 {
        12 + LEGEND.len() as u16
    }

    /// Render the snapshot centred in the viewport
    pub fn render(&self, snap: &Snapshot, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);

        let wanted = self.min_viewport(snap);
        let left = viewport.width.saturating_sub(wanted.width) / 2;
        let top = viewport.height.saturating_sub(wanted.height) / 2;

        self.draw_field(&mut fb, snap, left, top);

        let panel_x = left + snap.field.width() as u16 * self.cell_w + PANEL_GAP;
        draw_panel(&mut fb, snap, panel_x, top);

        let overlay = if snap.is_paused() {
            Some("PAUSED")
        } else if snap.is_game_over() {
            Some("GAME OVER")
        } else {
            None
        };
        if let Some(text) = overlay {
            self.draw_overlay(&mut fb, snap, left, top, text);
        }

        fb
    }

    fn draw_field(&self, fb: &mut FrameBuffer, snap: &Snapshot, left: u16, top: u16) {
        let active = CellStyle::fg(piece_color(snap.piece.kind)).bold();
        for row in 0..snap.field.height() {
            for col in 0..snap.field.width() {
                let (ch, style) = match snap.cell_view(row as i32, col as i32) {
                    CellView::Wall => ('▓', WALL),
                    CellView::Locked => ('█', LOCKED),
                    CellView::Active => ('█', active),
                    CellView::Empty => (' ', EMPTY),
                };
                let x = left + col as u16 * self.cell_w;
                for dx in 0..self.cell_w {
                    fb.put(x + dx, top + row as u16, ch, style);
                }
            }
        }
    }

    fn draw_overlay(&self, fb: &mut FrameBuffer, snap: &Snapshot, left: u16, top: u16, text: &str) {
        let field_w = snap.field.width() as u16 * self.cell_w;
        let x = left + field_w.saturating_sub(text.chars().count() as u16) / 2;
        let y = top + snap.field.height() as u16 / 2;
        fb.text(x, y, text, CellStyle::fg(Rgb::new(255, 255, 255)).bold());
    }
}

fn draw_panel(fb: &mut FrameBuffer, snap: &Snapshot, x: u16, top: u16) {
    let label = CellStyle::PLAIN.bold();
    let value = CellStyle::PLAIN;
    let dim = CellStyle::fg(Rgb::new(120, 120, 130));

    let mut y = top;
    let pair = |fb: &mut FrameBuffer, y: &mut u16, name: &str, text: String| {
        let end = fb.text(x, *y, name, label);
        fb.text(end + 1, *y, &text, value);
        *y += 1;
    };

    fb.text(x, y, "BLOCKTRIS", label);
    y += 2;
    pair(fb, &mut y, "Pieces:", snap.pieces_spawned.to_string());
    pair(fb, &mut y, "Lines: ", snap.lines_cleared.to_string());
    pair(fb, &mut y, "State: ", snap.state.as_str().to_string());
    pair(
        fb,
        &mut y,
        "Gravity:",
        if snap.gravity { "on" } else { "off" }.to_string(),
    );
    y += 1;

    fb.text(
        x,
        y,
        &format!(
            "piece {} rot {}",
            snap.piece.kind,
            snap.piece.rotation.index()
        ),
        dim,
    );
    y += 1;
    fb.text(
        x,
        y,
        &format!("row {} col {}", snap.piece.row, snap.piece.col),
        dim,
    );
    y += 1;
    fb.text(x, y, &format!("seed {}", snap.seed), dim);
    y += 2;

    for line in LEGEND {
        fb.text(x, y, line, dim);
        y += 1;
    }
}

const EMPTY: CellStyle = CellStyle::fg(Rgb::new(60, 60, 70)).on(Rgb::new(24, 24, 32));
const WALL: CellStyle = CellStyle::fg(Rgb::new(150, 150, 160));
const LOCKED: CellStyle = CellStyle::fg(Rgb::new(170, 170, 180)).on(Rgb::new(24, 24, 32));

fn piece_color(kind: usize) -> Rgb {
    match kind {
        0 => Rgb::new(80, 220, 220),
        1 => Rgb::new(80, 120, 220),
        2 => Rgb::new(255, 165, 0),
        3 => Rgb::new(240, 220, 80),
        4 => Rgb::new(100, 220, 120),
        5 => Rgb::new(200, 120, 220),
        6 => Rgb::new(220, 80, 80),
        _ => Rgb::new(230, 230, 230),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Game, GameConfig};
    use crate::types::Command;

    fn running(config: GameConfig) -> Game {
        let mut game = Game::new(42, config).unwrap();
        game.start();
        game
    }

    #[test]
    fn bucket_field_layout() {
        let snap = running(GameConfig::bucket()).snapshot();
        let view = GameView::default();
        let vp = view.min_viewport(&snap);
        let fb = view.render(&snap, vp);

        // 5 field columns, two characters each
        assert!(fb.line(0).starts_with("▓▓▓▓▓▓▓▓▓▓"));
        assert!(fb.line(1).starts_with("▓▓  ██  ▓▓"));
        assert!(fb.line(11).starts_with("▓▓▓▓▓▓▓▓▓▓"));
    }

    #[test]
    fn panel_shows_counters_and_legend() {
        let snap = running(GameConfig::standard()).snapshot();
        let view = GameView::default();
        let fb = view.render(&snap, view.min_viewport(&snap));

        assert!(fb.contains("Pieces: 1"));
        assert!(fb.contains("Lines:  0"));
        assert!(fb.contains("State:  running"));
        assert!(fb.contains("Gravity: on"));
        assert!(fb.contains("row 1 col 5"));
        assert!(fb.contains("q    quit"));
        assert!(!fb.contains("PAUSED"));
    }

    #[test]
    fn overlays_follow_state() {
        let mut game = running(GameConfig::standard());
        let view = GameView::default();

        game.apply(Command::Pause);
        let snap = game.snapshot();
        assert!(view.render(&snap, view.min_viewport(&snap)).contains("PAUSED"));

        game.apply(Command::Stop);
        let snap = game.snapshot();
        assert!(view.render(&snap, view.min_viewport(&snap)).contains("GAME OVER"));
    }

    #[test]
    fn small_viewport_is_clipped_not_panicking() {
        let snap = running(GameConfig::standard()).snapshot();
        let fb = GameView::default().render(&snap, Viewport::new(8, 4));
        assert_eq!(fb.line(0).chars().count(), 8);
    }
}
