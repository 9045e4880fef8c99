//! Construction-time errors
//!
//! Normal play has no error conditions: rejected moves are silent no-ops and the end of a
//! game is a lifecycle state. Only building a game (or a field from external data) can fail.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("board must have at least one playable row and column (got {rows}x{columns})")]
    EmptyBoard { rows: usize, columns: usize },

    #[error("at least one piece kind is required")]
    NoPieceKinds,

    #[error("{requested} piece kinds requested but catalog '{catalog}' only holds {available}")]
    CatalogTooSmall {
        catalog: &'static str,
        requested: usize,
        available: usize,
    },

    #[error("piece kind {kind} has an empty mask at rotation {rotation}")]
    EmptyMask { kind: usize, rotation: u8 },

    #[error("piece kind {kind} collides at the spawn position of an empty {rows}x{columns} board")]
    SpawnBlocked {
        kind: usize,
        rows: usize,
        columns: usize,
    },

    #[error("field row {row} is {found} cells wide, expected {expected}")]
    FieldShape {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("field border cell ({row}, {col}) is empty")]
    BorderBreached { row: usize, col: usize },
}
