//! Mapping between a slot's placement in the grid and the cells it covers.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::fmt;
use thiserror::Error;

use crate::MAX_SLOT_LENGTH;

/// Zero-indexed (row, col) coords for a cell in the grid, where row = 0 is the top row.
pub type GridCoord = (usize, usize);

/// The cells covered by a single slot, in letter order.
pub type CellCoords = SmallVec<[GridCoord; MAX_SLOT_LENGTH]>;

/// Direction that a slot is facing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Across,
    Down,
}

impl Direction {
    /// The suffix used when naming slots, as in `3across`.
    pub fn name(&self) -> &'static str {
        match self {
            Direction::Across => "across",
            Direction::Down => "down",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GeometryError {
    #[error(
        "cell {cell:?} is not on the {} path of length {} starting at {:?}",
        .placement.direction, .placement.length, .placement.start_cell
    )]
    NotOnPath { placement: Placement, cell: GridCoord },
}

/// Where a slot sits in the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Placement {
    pub direction: Direction,
    pub start_cell: GridCoord,
    pub length: usize,
}

impl Placement {
    pub fn new(direction: Direction, start_cell: GridCoord, length: usize) -> Placement {
        Placement { direction, start_cell, length }
    }

    /// Generate the coords for each cell of this slot.
    pub fn cell_coords(&self) -> CellCoords {
        let (row, col) = self.start_cell;

        (0..self.length)
            .map(|cell_idx| match self.direction {
                Direction::Across => (row, col + cell_idx),
                Direction::Down => (row + cell_idx, col),
            })
            .collect()
    }

    /// Return the position within the slot of the given cell, failing if the slot doesn't cover
    /// it.
    pub fn letter_index(&self, cell: GridCoord) -> Result<usize, GeometryError> {
        let (row, col) = self.start_cell;

        let offset = match self.direction {
            Direction::Across if cell.0 == row && cell.1 >= col => Some(cell.1 - col),
            Direction::Down if cell.1 == col && cell.0 >= row => Some(cell.0 - row),
            _ => None,
        };

        offset
            .filter(|&offset| offset < self.length)
            .ok_or(GeometryError::NotOnPath { placement: *self, cell })
    }

    pub fn contains(&self, cell: GridCoord) -> bool {
        self.letter_index(cell).is_ok()
    }

    /// The last cell covered by the slot, or `None` for a zero-length slot.
    pub fn end_cell(&self) -> Option<GridCoord> {
        let (row, col) = self.start_cell;
        let last = self.length.checked_sub(1)?;

        Some(match self.direction {
            Direction::Across => (row, col + last),
            Direction::Down => (row + last, col),
        })
    }

    /// Does every cell of the slot fall inside a grid of the given size?
    pub fn fits_within(&self, height: usize, width: usize) -> bool {
        match self.end_cell() {
            Some((row, col)) => row < height && col < width,
            None => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::geometry::{Direction, GeometryError, Placement};

    #[test]
    fn test_cell_coords_follow_direction() {
        let across = Placement::new(Direction::Across, (2, 1), 4);
        assert_eq!(across.cell_coords().as_slice(), &[(2, 1), (2, 2), (2, 3), (2, 4)]);

        let down = Placement::new(Direction::Down, (3, 0), 3);
        assert_eq!(down.cell_coords().as_slice(), &[(3, 0), (4, 0), (5, 0)]);
    }

    #[test]
    fn test_letter_index_inverts_cell_coords() {
        for placement in [
            Placement::new(Direction::Across, (4, 0), 5),
            Placement::new(Direction::Down, (0, 2), 5),
        ] {
            for (idx, &cell) in placement.cell_coords().iter().enumerate() {
                assert_eq!(placement.letter_index(cell), Ok(idx));
            }
        }
    }

    #[test]
    fn test_letter_index_rejects_cells_off_the_path() {
        let placement = Placement::new(Direction::Across, (0, 2), 3);

        for cell in [(0, 1), (0, 5), (1, 2)] {
            assert_eq!(
                placement.letter_index(cell),
                Err(GeometryError::NotOnPath { placement, cell })
            );
            assert!(!placement.contains(cell));
        }
    }

    #[test]
    fn test_fits_within() {
        let placement = Placement::new(Direction::Down, (2, 4), 4);

        assert_eq!(placement.end_cell(), Some((5, 4)));
        assert!(placement.fits_within(6, 5));
        assert!(!placement.fits_within(5, 5));
        assert!(!placement.fits_within(6, 4));
    }
}
