//! Piece catalog - authored 4x4 occupancy masks per piece kind and rotation
//!
//! Masks are data, not computed from one another. Every kind carries four entries even when
//! they repeat (the O piece and the bucket block look the same at every index).

use arrayvec::ArrayVec;

use crate::types::{Rotation, MASK_SIZE};

/// One 4x4 occupancy mask, row-major, `1` = occupied
pub type PieceMask = [[u8; MASK_SIZE]; MASK_SIZE];

/// The four rotation masks of one piece kind
pub type PieceRotations = [PieceMask; 4];

/// Set cells of a mask as `(row, col)` offsets from the anchor
pub type MaskCells = ArrayVec<(i32, i32), { MASK_SIZE * MASK_SIZE }>;

/// A process-wide immutable table of piece masks
///
/// Copying a catalog copies a reference; the table itself is never mutated.
#[derive(Clone, Copy)]
pub struct PieceCatalog {
    name: &'static str,
    pieces: &'static [PieceRotations],
}

impl PieceCatalog {
    pub const fn new(name: &'static str, pieces: &'static [PieceRotations]) -> Self {
        Self { name, pieces }
    }

    /// The seven tetrominoes used by the standard board
    pub const fn standard() -> Self {
        Self::new("standard", &STANDARD_PIECES)
    }

    /// The single one-cell block used by the bucket board
    pub const fn bucket() -> Self {
        Self::new("bucket", &BUCKET_PIECES)
    }

    /// Resolve a built-in catalog by name
    pub fn by_name(name: &str) -> Option<Self> {
        match name {
            "standard" => Some(Self::standard()),
            "bucket" => Some(Self::bucket()),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Number of piece kinds in the table
    pub fn len(&self) -> usize {
        self.pieces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pieces.is_empty()
    }

    /// Occupancy mask for a kind and rotation
    ///
    /// # Panics
    ///
    /// Panics if `kind >= self.len()`. Games validate their kind count against the catalog
    /// at construction, so kinds drawn during play are always in range.
    pub fn occupancy(&self, kind: usize, rotation: Rotation) -> &'static PieceMask {
        &self.pieces[kind][rotation.index() as usize]
    }

    /// Offsets of the occupied mask cells, in row-major order
    pub fn cells(&self, kind: usize, rotation: Rotation) -> MaskCells {
        let mask = self.occupancy(kind, rotation);
        let mut cells = MaskCells::new();
        for (i, row) in mask.iter().enumerate() {
            for (j, &bit) in row.iter().enumerate() {
                if bit != 0 {
                    cells.push((i as i32, j as i32));
                }
            }
        }
        cells
    }
}

impl std::fmt::Debug for PieceCatalog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PieceCatalog")
            .field("name", &self.name)
            .field("kinds", &self.pieces.len())
            .finish()
    }
}

impl PartialEq for PieceCatalog {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && std::ptr::eq(self.pieces, other.pieces)
    }
}

impl Eq for PieceCatalog {}

/// Standard catalog: I, J, L, O, S, T, Z
pub static STANDARD_PIECES: [PieceRotations; 7] = [
    // I
    [
        [[1, 1, 1, 1], [0, 0, 0, 0], [0, 0, 0, 0], [0, 0, 0, 0]],
        [[0, 1, 0, 0], [0, 1, 0, 0], [0, 1, 0, 0], [0, 1, 0, 0]],
        [[1, 1, 1, 1], [0, 0, 0, 0], [0, 0, 0, 0], [0, 0, 0, 0]],
        [[0, 1, 0, 0], [0, 1, 0, 0], [0, 1, 0, 0], [0, 1, 0, 0]],
    ],
    // J
    [
        [[1, 1, 1, 0], [0, 0, 1, 0], [0, 0, 0, 0], [0, 0, 0, 0]],
        [[0, 1, 0, 0], [0, 1, 0, 0], [1, 1, 0, 0], [0, 0, 0, 0]],
        [[1, 0, 0, 0], [1, 1, 1, 0], [0, 0, 0, 0], [0, 0, 0, 0]],
        [[1, 1, 0, 0], [1, 0, 0, 0], [1, 0, 0, 0], [0, 0, 0, 0]],
    ],
    // L
    [
        [[1, 1, 1, 0], [1, 0, 0, 0], [0, 0, 0, 0], [0, 0, 0, 0]],
        [[1, 1, 0, 0], [0, 1, 0, 0], [0, 1, 0, 0], [0, 0, 0, 0]],
        [[0, 0, 1, 0], [1, 1, 1, 0], [0, 0, 0, 0], [0, 0, 0, 0]],
        [[1, 0, 0, 0], [1, 0, 0, 0], [1, 1, 0, 0], [0, 0, 0, 0]],
    ],
    // O
    [
        [[0, 1, 1, 0], [0, 1, 1, 0], [0, 0, 0, 0], [0, 0, 0, 0]],
        [[0, 1, 1, 0], [0, 1, 1, 0], [0, 0, 0, 0], [0, 0, 0, 0]],
        [[0, 1, 1, 0], [0, 1, 1, 0], [0, 0, 0, 0], [0, 0, 0, 0]],
        [[0, 1, 1, 0], [0, 1, 1, 0], [0, 0, 0, 0], [0, 0, 0, 0]],
    ],
    // S
    [
        [[0, 1, 1, 0], [1, 1, 0, 0], [0, 0, 0, 0], [0, 0, 0, 0]],
        [[0, 1, 0, 0], [0, 1, 1, 0], [0, 0, 1, 0], [0, 0, 0, 0]],
        [[0, 1, 1, 0], [1, 1, 0, 0], [0, 0, 0, 0], [0, 0, 0, 0]],
        [[0, 1, 0, 0], [0, 1, 1, 0], [0, 0, 1, 0], [0, 0, 0, 0]],
    ],
    // T
    [
        [[1, 1, 1, 0], [0, 1, 0, 0], [0, 0, 0, 0], [0, 0, 0, 0]],
        [[0, 0, 1, 0], [0, 1, 1, 0], [0, 0, 1, 0], [0, 0, 0, 0]],
        [[0, 1, 0, 0], [1, 1, 1, 0], [0, 0, 0, 0], [0, 0, 0, 0]],
        [[1, 0, 0, 0], [1, 1, 0, 0], [1, 0, 0, 0], [0, 0, 0, 0]],
    ],
    // Z
    [
        [[1, 1, 0, 0], [0, 1, 1, 0], [0, 0, 0, 0], [0, 0, 0, 0]],
        [[0, 1, 0, 0], [1, 1, 0, 0], [1, 0, 0, 0], [0, 0, 0, 0]],
        [[1, 1, 0, 0], [0, 1, 1, 0], [0, 0, 0, 0], [0, 0, 0, 0]],
        [[0, 1, 0, 0], [1, 1, 0, 0], [1, 0, 0, 0], [0, 0, 0, 0]],
    ],
];

/// Bucket catalog: a single block in mask column 1
pub static BUCKET_PIECES: [PieceRotations; 1] = [[
    [[0, 1, 0, 0], [0, 0, 0, 0], [0, 0, 0, 0], [0, 0, 0, 0]],
    [[0, 1, 0, 0], [0, 0, 0, 0], [0, 0, 0, 0], [0, 0, 0, 0]],
    [[0, 1, 0, 0], [0, 0, 0, 0], [0, 0, 0, 0], [0, 0, 0, 0]],
    [[0, 1, 0, 0], [0, 0, 0, 0], [0, 0, 0, 0], [0, 0, 0, 0]],
]];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_pieces_have_four_cells_in_every_rotation() {
        let catalog = PieceCatalog::standard();
        assert_eq!(catalog.len(), 7);
        for kind in 0..catalog.len() {
            for r in 0..4 {
                assert_eq!(
                    catalog.cells(kind, Rotation::new(r)).len(),
                    4,
                    "kind {} rotation {}",
                    kind,
                    r
                );
            }
        }
    }

    #[test]
    fn o_piece_repeats_the_same_mask() {
        let catalog = PieceCatalog::standard();
        let first = catalog.occupancy(3, Rotation::new(0));
        for r in 1..4 {
            assert_eq!(catalog.occupancy(3, Rotation::new(r)), first);
        }
    }

    #[test]
    fn bucket_block_is_a_single_cell() {
        let catalog = PieceCatalog::bucket();
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.cells(0, Rotation::new(2)).as_slice(), &[(0, 1)]);
    }

    #[test]
    fn catalogs_resolve_by_name() {
        assert_eq!(PieceCatalog::by_name("standard"), Some(PieceCatalog::standard()));
        assert_eq!(PieceCatalog::by_name("bucket"), Some(PieceCatalog::bucket()));
        assert_eq!(PieceCatalog::by_name("pentomino"), None);
        assert_ne!(PieceCatalog::standard(), PieceCatalog::bucket());
    }

    #[test]
    fn cells_follow_row_major_order() {
        let catalog = PieceCatalog::standard();
        // T, rotation 3
        let cells = catalog.cells(5, Rotation::new(3));
        assert_eq!(cells.as_slice(), &[(0, 0), (1, 0), (1, 1), (2, 0)]);
    }
}
