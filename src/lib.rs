//! Crossword filling as a constraint-satisfaction problem: each across/down slot is a variable
//! whose domain is a list of candidate words, and any two slots sharing a cell must agree on the
//! letter there. The search is plain chronological backtracking, ordered by the MRV and degree
//! heuristics for variables and by a conflict-count heuristic for values.

pub mod assignment;
pub mod backtracking_search;
pub mod consistency;
pub mod constraint_graph;
pub mod geometry;
pub mod grid;
pub mod heuristics;
pub mod problem;
pub mod solution;
pub mod word_list;

/// The expected maximum number of slots appearing in a grid.
pub const MAX_SLOT_COUNT: usize = 256;

/// The expected maximum length for a single slot.
pub const MAX_SLOT_LENGTH: usize = 21;

