//! Field module - the bordered occupancy grid
//!
//! The field is `rows + 2` by `columns + 2` cells. Row 0, row `rows + 1`, column 0 and
//! column `columns + 1` form a permanently occupied ring that acts as walls and floor.
//! Playable cells are rows `1..=rows`, columns `1..=columns`.
//!
//! Storage is a flat row-major buffer. Reads outside the grid report "occupied", so
//! collision tests at any candidate position stay in bounds.

use crate::error::ConfigError;
use crate::types::{Cell, EMPTY, OCCUPIED};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Field {
    rows: usize,
    columns: usize,
    /// Flat cells, row-major (row * width + col), border included
    cells: Vec<Cell>,
}

impl Field {
    /// Create an empty field surrounded by its border
    pub fn new(rows: usize, columns: usize) -> Self {
        let width = columns + 2;
        let height = rows + 2;
        let mut cells = vec![EMPTY; width * height];
        for row in 0..height {
            for col in 0..width {
                if row == 0 || row == height - 1 || col == 0 || col == width - 1 {
                    cells[row * width + col] = OCCUPIED;
                }
            }
        }
        Self {
            rows,
            columns,
            cells,
        }
    }

    /// Build a field from explicit rows, border included
    ///
    /// Every row must be `columns + 2` wide and the border ring must be occupied.
    pub fn from_rows(rows: &[Vec<Cell>]) -> Result<Self, ConfigError> {
        if rows.len() < 3 {
            return Err(ConfigError::FieldShape {
                row: rows.len(),
                expected: 3,
                found: rows.len(),
            });
        }
        let width = rows[0].len();
        if width < 3 {
            return Err(ConfigError::FieldShape {
                row: 0,
                expected: 3,
                found: width,
            });
        }

        let mut field = Self::new(rows.len() - 2, width - 2);
        for (r, row) in rows.iter().enumerate() {
            if row.len() != width {
                return Err(ConfigError::FieldShape {
                    row: r,
                    expected: width,
                    found: row.len(),
                });
            }
            for (c, &cell) in row.iter().enumerate() {
                let occupied = cell != EMPTY;
                if field.is_border(r as i32, c as i32) {
                    if !occupied {
                        return Err(ConfigError::BorderBreached { row: r, col: c });
                    }
                } else {
                    field.cells[r * width + c] = if occupied { OCCUPIED } else { EMPTY };
                }
            }
        }
        Ok(field)
    }

    /// Playable rows
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Playable columns
    pub fn columns(&self) -> usize {
        self.columns
    }

    /// Total height including the border
    pub fn height(&self) -> usize {
        self.rows + 2
    }

    /// Total width including the border
    pub fn width(&self) -> usize {
        self.columns + 2
    }

    #[inline(always)]
    fn index(&self, row: i32, col: i32) -> Option<usize> {
        if row < 0 || col < 0 || row as usize >= self.height() || col as usize >= self.width() {
            return None;
        }
        Some(row as usize * self.width() + col as usize)
    }

    /// Cell at `(row, col)`, or `None` outside the grid
    pub fn get(&self, row: i32, col: i32) -> Option<Cell> {
        self.index(row, col).map(|idx| self.cells[idx])
    }

    /// True for occupied cells and for any position outside the grid
    pub fn is_occupied(&self, row: i32, col: i32) -> bool {
        self.get(row, col).map_or(true, |cell| cell != EMPTY)
    }

    pub fn is_border(&self, row: i32, col: i32) -> bool {
        row == 0 || col == 0 || row == self.rows as i32 + 1 || col == self.columns as i32 + 1
    }

    /// Set a playable cell
    ///
    /// Returns false (and leaves the field untouched) for border or out-of-range cells.
    pub fn set(&mut self, row: i32, col: i32, cell: Cell) -> bool {
        if self.is_border(row, col) {
            return false;
        }
        match self.index(row, col) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Row `row` including its two border cells
    pub fn row(&self, row: usize) -> Option<&[Cell]> {
        if row >= self.height() {
            return None;
        }
        let start = row * self.width();
        Some(&self.cells[start..start + self.width()])
    }

    /// All rows, top to bottom, border included
    pub fn iter_rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks(self.width())
    }

    /// Copy the grid into nested rows
    pub fn to_rows(&self) -> Vec<Vec<Cell>> {
        self.iter_rows().map(|row| row.to_vec()).collect()
    }

    /// True when every playable column of a playable row is occupied
    pub fn is_row_complete(&self, row: usize) -> bool {
        if row == 0 || row > self.rows {
            return false;
        }
        let start = row * self.width() + 1;
        self.cells[start..start + self.columns]
            .iter()
            .all(|&cell| cell != EMPTY)
    }

    /// Move every playable row above `row` down by one and empty row 1
    ///
    /// Row `row` receives row `row - 1`, and so on up to row 2 receiving row 1.
    pub fn shift_rows_down(&mut self, row: usize) {
        if row == 0 || row > self.rows {
            return;
        }
        let width = self.width();
        for r in (2..=row).rev() {
            let src = (r - 1) * width + 1;
            let dst = r * width + 1;
            self.cells.copy_within(src..src + self.columns, dst);
        }
        let top = width + 1;
        self.cells[top..top + self.columns].fill(EMPTY);
    }

    /// Remove completed rows and return how many were cleared
    ///
    /// Rows are scanned top to bottom and each complete row is collapsed as soon as it is
    /// found, before the scan moves on.
    pub fn clear_completed_rows(&mut self) -> u32 {
        let mut cleared = 0;
        for row in 1..=self.rows {
            if self.is_row_complete(row) {
                self.shift_rows_down(row);
                cleared += 1;
            }
        }
        cleared
    }

    /// Number of occupied playable cells
    pub fn occupied_count(&self) -> usize {
        (1..=self.rows)
            .map(|r| {
                (1..=self.columns)
                    .filter(|&c| self.is_occupied(r as i32, c as i32))
                    .count()
            })
            .sum()
    }
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for row in self.iter_rows() {
            for &cell in row {
                f.write_str(if cell == EMPTY { " " } else { "X" })?;
            }
            f.write_str("\n")?;
        }
        Ok(())
    }
}
