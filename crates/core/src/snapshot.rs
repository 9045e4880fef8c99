use crate::catalog::{MaskCells, PieceCatalog};
use crate::field::Field;
use crate::game::ActivePiece;
use crate::types::LifecycleState;

/// What a viewer should draw at one field position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CellView {
    Empty,
    Wall,
    Locked,
    Active,
}

/// Fully copied view of a game at one instant
///
/// Owns its field; only the catalog is shared, and that table never changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    pub seed: u64,
    pub state: LifecycleState,
    pub piece: ActivePiece,
    pub field: Field,
    pub rows: usize,
    pub columns: usize,
    pub piece_kinds: usize,
    pub catalog: PieceCatalog,
    pub pieces_spawned: u32,
    pub lines_cleared: u32,
    pub gravity: bool,
}

impl Snapshot {
    pub fn is_running(&self) -> bool {
        self.state == LifecycleState::Running
    }

    pub fn is_paused(&self) -> bool {
        self.state == LifecycleState::Paused
    }

    pub fn is_game_over(&self) -> bool {
        self.state == LifecycleState::GameOver
    }

    /// Field cells covered by the active piece
    pub fn active_cells(&self) -> MaskCells {
        let mut cells = self.catalog.cells(self.piece.kind, self.piece.rotation);
        for (row, col) in cells.iter_mut() {
            *row += self.piece.row;
            *col += self.piece.col;
        }
        cells
    }

    /// Cell contents with the active piece drawn over the field
    pub fn cell_view(&self, row: i32, col: i32) -> CellView {
        if self.active_cells().contains(&(row, col)) {
            return CellView::Active;
        }
        if self.field.is_border(row, col) {
            CellView::Wall
        } else if self.field.is_occupied(row, col) {
            CellView::Locked
        } else {
            CellView::Empty
        }
    }

    /// Multi-line dump: header fields, then the field with the active piece as `*`
    pub fn debug_string(&self) -> String {
        let mut out = String::new();
        out.push_str("Game {\n");
        out.push_str(&format!("Seed: {}\n", self.seed));
        out.push_str(&format!("State: {}\n", self.state.as_str()));
        out.push_str(&format!(
            "Piece: {}\tRotation: {}\n",
            self.piece.kind,
            self.piece.rotation.index()
        ));
        out.push_str(&format!("PosRow: {}\n", self.piece.row));
        out.push_str(&format!("PosCol: {}\n", self.piece.col));
        out.push_str(&format!(
            "Pieces: {}\tLines: {}\n",
            self.pieces_spawned, self.lines_cleared
        ));
        out.push_str("Field:\n");
        for row in 0..self.field.height() as i32 {
            out.push_str("    ");
            for col in 0..self.field.width() as i32 {
                out.push(match self.cell_view(row, col) {
                    CellView::Empty => ' ',
                    CellView::Active => '*',
                    CellView::Wall | CellView::Locked => 'X',
                });
            }
            out.push('\n');
        }
        out.push_str("}\n");
        out
    }
}

impl std::fmt::Display for Snapshot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.debug_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::game::Game;
    use crate::types::{Rotation, OCCUPIED};

    fn bucket_snapshot() -> Snapshot {
        let mut game = Game::new(1, GameConfig::bucket()).unwrap();
        game.start();
        game.field_mut().set(10, 3, OCCUPIED);
        game.snapshot()
    }

    #[test]
    fn cell_view_overlays_active_piece() {
        let snap = bucket_snapshot();
        assert_eq!(snap.active_cells().as_slice(), &[(1, 2)]);
        assert_eq!(snap.cell_view(1, 2), CellView::Active);
        assert_eq!(snap.cell_view(0, 2), CellView::Wall);
        assert_eq!(snap.cell_view(10, 3), CellView::Locked);
        assert_eq!(snap.cell_view(5, 1), CellView::Empty);
    }

    #[test]
    fn debug_string_draws_field_and_piece() {
        let snap = bucket_snapshot();
        let dump = snap.debug_string();
        assert!(dump.starts_with("Game {\n"));
        assert!(dump.contains("State: running"));
        assert!(dump.contains("    XXXXX\n    X * X\n"));
        assert!(dump.contains("    X  XX\n    XXXXX\n}"));
    }

    #[test]
    fn active_cells_follow_rotation() {
        let mut game = Game::new(1, GameConfig::standard()).unwrap();
        game.start();
        game.set_active(ActivePiece {
            kind: 0,
            rotation: Rotation::new(1),
            row: 4,
            col: 2,
        });
        let snap = game.snapshot();
        assert_eq!(snap.active_cells().as_slice(), &[(4, 3), (5, 3), (6, 3), (7, 3)]);
    }
}
