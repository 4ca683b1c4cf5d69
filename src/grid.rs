//! Numbered crossword grids and their translation into a `Problem`.
//!
//! A grid is a rectangle of integer markers: a positive number labels a cell where one or more
//! slots start, `0` is an ordinary open cell, and a negative number is a block.

use log::info;
use std::cmp::Reverse;
use std::collections::{HashMap, HashSet};
use thiserror::Error;

use crate::assignment::Assignment;
use crate::geometry::{Direction, GridCoord, Placement};
use crate::problem::{Problem, ProblemError, VariableSpec};

pub type CellMarker = i32;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GridError {
    #[error("grid must have at least one row")]
    Empty,

    #[error("row {row} has {actual} cells, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        actual: usize,
    },

    #[error("invalid cell marker {marker:?} in row {row}")]
    InvalidMarker { row: usize, marker: String },
}

const SMALL_GRID: [[CellMarker; 5]; 6] = [
    [1, 0, 2, 0, 3],
    [-1, -1, 0, -1, 0],
    [-1, 4, 0, 5, 0],
    [6, -1, 7, 0, 0],
    [8, 0, 0, 0, 0],
    [0, -1, -1, 0, -1],
];

const LARGE_GRID: [[CellMarker; 12]; 11] = [
    [-1, -1, 1, 0, 0, 0, 0, 0, 2, -1, -1, -1],
    [-1, -1, 0, -1, -1, -1, -1, -1, 0, -1, -1, 3],
    [-1, -1, 0, -1, -1, -1, -1, -1, 0, -1, -1, 0],
    [-1, -1, 0, -1, -1, 4, 0, 5, 0, 0, -1, 0],
    [-1, -1, 0, -1, -1, -1, -1, 0, -1, -1, -1, 0],
    [-1, -1, -1, -1, 6, -1, -1, 7, 0, 8, 0, 0],
    [-1, -1, -1, -1, 0, -1, -1, 0, -1, 0, -1, 0],
    [-1, 9, -1, 10, 0, 0, 0, 0, -1, 0, -1, -1],
    [-1, 0, -1, -1, 0, -1, -1, 0, -1, 0, -1, -1],
    [11, 0, 0, 0, 0, 0, -1, -1, -1, 0, -1, -1],
    [-1, 0, -1, -1, 0, -1, -1, -1, -1, 0, -1, -1],
];

const HEART_GRID: [[CellMarker; 13]; 12] = [
    [-1, -1, 1, 2, 3, -1, -1, -1, 4, 5, 6, -1, -1],
    [-1, 7, 0, 0, 0, 8, -1, 9, 0, 0, 0, 10, -1],
    [-1, 11, 0, 0, 0, 0, -1, 12, 0, 0, 0, 0, -1],
    [13, 0, 0, -1, 14, 0, 15, 0, 0, -1, 16, 0, 17],
    [18, 0, 0, 19, -1, 20, 0, 0, -1, 21, 0, 0, 0],
    [22, 0, 0, 0, -1, 23, 0, 0, -1, 24, 0, 0, 0],
    [-1, 25, 0, 0, 26, -1, -1, -1, 27, 0, 0, 0, -1],
    [-1, -1, 28, 0, 0, 29, -1, 30, 0, 0, 0, -1, -1],
    [-1, -1, -1, 31, 0, 0, 32, 0, 0, 0, -1, -1, -1],
    [-1, -1, -1, -1, 33, 0, 0, 0, 0, -1, -1, -1, -1],
    [-1, -1, -1, -1, -1, 34, 0, 0, -1, -1, -1, -1, -1],
    [-1, -1, -1, -1, -1, -1, 0, -1, -1, -1, -1, -1, -1],
];

/// Names accepted by `Grid::builtin`.
pub const BUILTIN_GRID_NAMES: [&str; 3] = ["small", "large", "heart"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    pub width: usize,
    pub height: usize,
    cells: Vec<CellMarker>,
}

impl Grid {
    pub fn new(rows: Vec<Vec<CellMarker>>) -> Result<Grid, GridError> {
        let width = rows.first().ok_or(GridError::Empty)?.len();

        for (row, cells) in rows.iter().enumerate() {
            if cells.len() != width {
                return Err(GridError::RaggedRow { row, expected: width, actual: cells.len() });
            }
        }

        Ok(Grid {
            width,
            height: rows.len(),
            cells: rows.concat(),
        })
    }

    fn from_const_rows<const W: usize>(rows: &[[CellMarker; W]]) -> Grid {
        Grid {
            width: W,
            height: rows.len(),
            cells: rows.concat(),
        }
    }

    /// Parse a grid written as one row per line, with markers separated by whitespace and/or
    /// commas. Blank lines are ignored.
    pub fn from_template_string(template: &str) -> Result<Grid, GridError> {
        let rows = template
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .enumerate()
            .map(|(row, line)| {
                line.split(|c: char| c == ',' || c.is_whitespace())
                    .filter(|marker| !marker.is_empty())
                    .map(|marker| {
                        marker.parse::<CellMarker>().map_err(|_| GridError::InvalidMarker {
                            row,
                            marker: marker.to_string(),
                        })
                    })
                    .collect::<Result<Vec<_>, _>>()
            })
            .collect::<Result<Vec<_>, _>>()?;

        Grid::new(rows)
    }

    /// The small 6x5 practice grid.
    pub fn small() -> Grid {
        Grid::from_const_rows(&SMALL_GRID)
    }

    /// The larger 11x12 grid.
    pub fn large() -> Grid {
        Grid::from_const_rows(&LARGE_GRID)
    }

    /// The heart-shaped 12x13 grid.
    pub fn heart() -> Grid {
        Grid::from_const_rows(&HEART_GRID)
    }

    pub fn builtin(name: &str) -> Option<Grid> {
        match name {
            "small" => Some(Grid::small()),
            "large" => Some(Grid::large()),
            "heart" => Some(Grid::heart()),
            _ => None,
        }
    }

    pub fn marker(&self, (row, col): GridCoord) -> CellMarker {
        self.cells[row * self.width + col]
    }

    /// Can a letter go in this cell? Cells outside the grid are treated as blocks.
    pub fn is_open(&self, (row, col): GridCoord) -> bool {
        row < self.height && col < self.width && self.marker((row, col)) >= 0
    }

    /// Length of the run of open cells starting at `start` and heading in the given direction.
    fn run_length(&self, start: GridCoord, direction: Direction) -> usize {
        (0..)
            .map(|offset| match direction {
                Direction::Across => (start.0, start.1 + offset),
                Direction::Down => (start.0 + offset, start.1),
            })
            .take_while(|&cell| self.is_open(cell))
            .count()
    }
}

fn vowel_count(word: &str) -> usize {
    word.chars()
        .filter(|c| matches!(c.to_ascii_lowercase(), 'a' | 'e' | 'i' | 'o' | 'u'))
        .count()
}

/// Translate a numbered grid and a word list into a `Problem`.
///
/// Every numbered cell starts an across slot if the cell to its right is open and a down slot if
/// the cell below it is open; each slot runs until the next block or the edge of the grid. A
/// slot's domain is every word of the right length, with duplicates dropped. Across domains are
/// then ordered by vowel count, most first, while down domains keep word-list order. Slots with
/// no words of their length are left out.
///
/// Variables named in `excluded` are removed afterwards, and `prior_knowledge` replaces the
/// domain of any variable it names (names that don't exist are ignored). The result is validated
/// against the grid bounds, so a prior-knowledge word of the wrong length is an error here.
pub fn generate_problem(
    grid: &Grid,
    words: &[String],
    excluded: &[String],
    prior_knowledge: &HashMap<String, Vec<String>>,
) -> Result<Problem, ProblemError> {
    // Bucket the word list by length, dropping repeats.
    let mut words_by_length: HashMap<usize, Vec<&str>> = HashMap::new();
    let mut seen: HashSet<&str> = HashSet::with_capacity(words.len());
    for word in words {
        if seen.insert(word.as_str()) {
            words_by_length.entry(word.chars().count()).or_default().push(word.as_str());
        }
    }

    let mut specs: Vec<VariableSpec> = vec![];

    for row in 0..grid.height {
        for col in 0..grid.width {
            let number = grid.marker((row, col));
            if number <= 0 {
                continue;
            }

            for (direction, next_cell) in
                [(Direction::Across, (row, col + 1)), (Direction::Down, (row + 1, col))]
            {
                if !grid.is_open(next_cell) {
                    continue;
                }

                let length = grid.run_length((row, col), direction);
                let mut domain: Vec<String> = words_by_length
                    .get(&length)
                    .map(|bucket| bucket.iter().map(|word| word.to_string()).collect())
                    .unwrap_or_default();

                if domain.is_empty() {
                    continue;
                }

                if direction == Direction::Across {
                    domain.sort_by_key(|word| Reverse(vowel_count(word)));
                }

                specs.push(VariableSpec {
                    name: format!("{}{}", number, direction.name()),
                    placement: Placement::new(direction, (row, col), length),
                    domain,
                });
            }
        }
    }

    specs.retain(|spec| !excluded.contains(&spec.name));

    for spec in &mut specs {
        if let Some(domain) = prior_knowledge.get(&spec.name) {
            spec.domain = domain.clone();
        }
    }

    let problem = Problem::with_bounds(specs, grid.height, grid.width)?;
    info!(
        "Generated {} variables from a {}x{} grid",
        problem.len(),
        grid.height,
        grid.width
    );

    Ok(problem)
}

/// Turn the given grid and assignment into a rendered string, with `#` for blocks and `.` for
/// open cells that haven't been filled.
pub fn render_grid(grid: &Grid, problem: &Problem, assignment: &Assignment) -> String {
    let mut rows: Vec<Vec<char>> = (0..grid.height)
        .map(|row| {
            (0..grid.width)
                .map(|col| if grid.is_open((row, col)) { '.' } else { '#' })
                .collect()
        })
        .collect();

    for (variable_id, word) in assignment.iter(problem) {
        let cells = problem.variable(variable_id).cell_coords();

        for (&(row, col), &glyph) in cells.iter().zip(word.glyphs.iter()) {
            if let Some(cell) = rows.get_mut(row).and_then(|cells| cells.get_mut(col)) {
                *cell = glyph;
            }
        }
    }

    rows.into_iter()
        .map(|row| row.into_iter().collect::<String>())
        .collect::<Vec<_>>()
        .join("\n")
}
