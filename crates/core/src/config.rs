//! Game configuration - board size, piece kinds and catalog
//!
//! A configuration is fixed for the life of a game, which lets alternate rule sets such as
//! the one-column bucket board share every algorithm with the standard board.

use crate::catalog::PieceCatalog;
use crate::collision::collides;
use crate::error::ConfigError;
use crate::field::Field;
use crate::types::{
    Rotation, BUCKET_COLUMNS, BUCKET_PIECE_KINDS, BUCKET_ROWS, DEFAULT_COLUMNS,
    DEFAULT_PIECE_KINDS, DEFAULT_ROWS, ROTATIONS, SPAWN_ROW,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameConfig {
    pub rows: usize,
    pub columns: usize,
    pub piece_kinds: usize,
    pub catalog: PieceCatalog,
}

impl GameConfig {
    /// 18 x 10 board with all seven tetrominoes
    pub const fn standard() -> Self {
        Self {
            rows: DEFAULT_ROWS,
            columns: DEFAULT_COLUMNS,
            piece_kinds: DEFAULT_PIECE_KINDS,
            catalog: PieceCatalog::standard(),
        }
    }

    /// 10 x 3 board with a single one-cell piece
    pub const fn bucket() -> Self {
        Self {
            rows: BUCKET_ROWS,
            columns: BUCKET_COLUMNS,
            piece_kinds: BUCKET_PIECE_KINDS,
            catalog: PieceCatalog::bucket(),
        }
    }

    /// Column new pieces are anchored at
    pub fn spawn_col(&self) -> i32 {
        (self.columns / 2) as i32
    }

    /// Check the configuration can never drive play out of range
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.rows == 0 || self.columns == 0 {
            return Err(ConfigError::EmptyBoard {
                rows: self.rows,
                columns: self.columns,
            });
        }
        if self.piece_kinds == 0 {
            return Err(ConfigError::NoPieceKinds);
        }
        if self.piece_kinds > self.catalog.len() {
            return Err(ConfigError::CatalogTooSmall {
                catalog: self.catalog.name(),
                requested: self.piece_kinds,
                available: self.catalog.len(),
            });
        }

        let empty = Field::new(self.rows, self.columns);
        for kind in 0..self.piece_kinds {
            for r in 0..ROTATIONS {
                if self.catalog.cells(kind, Rotation::new(r)).is_empty() {
                    return Err(ConfigError::EmptyMask { kind, rotation: r });
                }
            }
            if collides(
                &empty,
                &self.catalog,
                kind,
                Rotation::default(),
                SPAWN_ROW,
                self.spawn_col(),
            ) {
                return Err(ConfigError::SpawnBlocked {
                    kind,
                    rows: self.rows,
                    columns: self.columns,
                });
            }
        }
        Ok(())
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::standard()
    }
}
