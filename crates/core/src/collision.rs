//! Collision detection and placement

use crate::catalog::PieceCatalog;
use crate::field::Field;
use crate::game::ActivePiece;
use crate::types::{Rotation, OCCUPIED};

/// Would `kind` at `rotation`, anchored at `(row, col)`, overlap an occupied cell?
///
/// Cells outside the grid count as occupied, so any candidate position is safe to test.
pub fn collides(
    field: &Field,
    catalog: &PieceCatalog,
    kind: usize,
    rotation: Rotation,
    row: i32,
    col: i32,
) -> bool {
    catalog
        .cells(kind, rotation)
        .iter()
        .any(|&(i, j)| field.is_occupied(row + i, col + j))
}

/// Mark every cell of `piece` occupied
///
/// Does not re-check for collisions; callers test with [`collides`] first.
pub fn place(field: &mut Field, catalog: &PieceCatalog, piece: &ActivePiece) {
    for (i, j) in catalog.cells(piece.kind, piece.rotation) {
        field.set(piece.row + i, piece.col + j, OCCUPIED);
    }
}
