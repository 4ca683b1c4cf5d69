//! Ordering heuristics for the search: which variable to branch on next, and in which order to
//! try its words.

use std::cmp::Reverse;
use std::collections::HashSet;

use crate::assignment::Assignment;
use crate::consistency::count_conflicts;
use crate::constraint_graph::ConstraintGraph;
use crate::geometry::{GeometryError, GridCoord};
use crate::problem::{Problem, VariableId, Word, WordId};

/// Choose the unassigned variable with the fewest words in its domain, breaking ties in favor of
/// the one crossing the most other variables (the MRV and degree heuristics). Any remaining tie
/// goes to whichever variable comes first in the problem. Returns `None` once every variable is
/// assigned.
pub fn select_unassigned_variable(
    problem: &Problem,
    assignment: &Assignment,
    constraint_graph: &ConstraintGraph,
) -> Option<VariableId> {
    problem
        .variables()
        .iter()
        .filter(|variable| !assignment.is_assigned(variable.id))
        .min_by_key(|variable| (variable.domain.len(), Reverse(constraint_graph.degree(variable.id))))
        .map(|variable| variable.id)
}

/// A policy for ordering the words we try for a variable.
pub trait ValueOrdering {
    /// Return the ids of the words from the variable's domain that are still worth trying, in the
    /// order they should be tried.
    fn order_values(
        &self,
        problem: &Problem,
        variable_id: VariableId,
        assignment: &Assignment,
    ) -> Result<Vec<WordId>, GeometryError>;
}

/// The words in a variable's domain that no assigned variable is already using, in domain order.
/// The same word can't appear twice in a puzzle.
pub fn remaining_values(
    problem: &Problem,
    variable_id: VariableId,
    assignment: &Assignment,
) -> Vec<WordId> {
    let used: HashSet<&str> =
        assignment.iter(problem).map(|(_, word)| word.string.as_str()).collect();

    problem
        .variable(variable_id)
        .domain
        .iter()
        .enumerate()
        .filter(|(_, word)| !used.contains(word.string.as_str()))
        .map(|(word_id, _)| word_id)
        .collect()
}

/// Orders words by how many crossing letters they'd contradict. Despite the name of the heuristic
/// this is modelled on, words with the *most* conflicts come first; ties keep domain order.
#[derive(Debug, Clone, Copy, Default)]
pub struct LeastConstrainingValue;

impl ValueOrdering for LeastConstrainingValue {
    fn order_values(
        &self,
        problem: &Problem,
        variable_id: VariableId,
        assignment: &Assignment,
    ) -> Result<Vec<WordId>, GeometryError> {
        let domain = &problem.variable(variable_id).domain;

        let mut scored: Vec<(WordId, usize)> = remaining_values(problem, variable_id, assignment)
            .into_iter()
            .map(|word_id| {
                count_conflicts(problem, variable_id, &domain[word_id], assignment)
                    .map(|conflicts| (word_id, conflicts))
            })
            .collect::<Result<_, _>>()?;

        scored.sort_by_key(|&(_, conflicts)| Reverse(conflicts));

        Ok(scored.into_iter().map(|(word_id, _)| word_id).collect())
    }
}

/// How many of the word's letters appear anywhere in the problem's domains, ignoring case.
pub fn frequency_score(problem: &Problem, word: &Word) -> usize {
    let letter_pool = problem.letter_pool();

    word.glyphs
        .iter()
        .filter(|glyph| glyph.to_lowercase().all(|letter| letter_pool.contains(&letter)))
        .count()
}

/// How many of the variable's cells are already covered by an assigned variable.
pub fn overlap_score(problem: &Problem, variable_id: VariableId, assignment: &Assignment) -> usize {
    let assigned_cells: HashSet<GridCoord> = assignment
        .choices()
        .iter()
        .flat_map(|choice| problem.variable(choice.variable_id).cell_coords())
        .collect();

    problem
        .variable(variable_id)
        .cell_coords()
        .iter()
        .filter(|cell| assigned_cells.contains(cell))
        .count()
}

/// Orders words by letter frequency, then by overlap with the filled part of the grid, highest
/// first.
#[derive(Debug, Clone, Copy, Default)]
pub struct CompositeOrdering;

impl ValueOrdering for CompositeOrdering {
    fn order_values(
        &self,
        problem: &Problem,
        variable_id: VariableId,
        assignment: &Assignment,
    ) -> Result<Vec<WordId>, GeometryError> {
        let domain = &problem.variable(variable_id).domain;

        // The overlap score only depends on the variable, not the word.
        let overlap = overlap_score(problem, variable_id, assignment);

        let mut values = remaining_values(problem, variable_id, assignment);
        values.sort_by_cached_key(|&word_id| {
            (Reverse(frequency_score(problem, &domain[word_id])), Reverse(overlap))
        });

        Ok(values)
    }
}

/// The value orderings available to the search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ValueOrderingKind {
    #[default]
    LeastConstrainingValue,
    Composite,
}

impl ValueOrderingKind {
    pub fn ordering(&self) -> &'static dyn ValueOrdering {
        match self {
            ValueOrderingKind::LeastConstrainingValue => &LeastConstrainingValue,
            ValueOrderingKind::Composite => &CompositeOrdering,
        }
    }
}
