//! Checking a candidate word against the words already placed in crossing slots.

use smallvec::SmallVec;

use crate::assignment::Assignment;
use crate::constraint_graph::overlap_positions;
use crate::geometry::GeometryError;
use crate::problem::{Problem, Variable, VariableId, Word};

/// The pair of letters the two words would put in each cell the variables share, as
/// `(letter from word, letter from other_word)`.
pub(crate) fn shared_letters(
    variable: &Variable,
    word: &Word,
    other_variable: &Variable,
    other_word: &Word,
) -> Result<SmallVec<[(char, char); 2]>, GeometryError> {
    overlap_positions(variable, other_variable)
        .into_iter()
        .map(|cell| {
            let idx = variable.letter_index(cell)?;
            let other_idx = other_variable.letter_index(cell)?;
            Ok((word.glyphs[idx], other_word.glyphs[other_idx]))
        })
        .collect()
}

/// Would assigning `candidate` to the given variable agree with every crossing variable that's
/// already assigned? Variables that don't share a cell with this one can't disagree with it.
pub fn is_consistent(
    problem: &Problem,
    variable_id: VariableId,
    candidate: &Word,
    assignment: &Assignment,
) -> Result<bool, GeometryError> {
    let variable = problem.variable(variable_id);

    for (other_id, other_word) in assignment.iter(problem) {
        if other_id == variable_id {
            continue;
        }

        let other_variable = problem.variable(other_id);
        for (letter, other_letter) in shared_letters(variable, candidate, other_variable, other_word)? {
            if letter != other_letter {
                return Ok(false);
            }
        }
    }

    Ok(true)
}

/// Count the cells where `candidate` would disagree with an assigned crossing variable.
pub fn count_conflicts(
    problem: &Problem,
    variable_id: VariableId,
    candidate: &Word,
    assignment: &Assignment,
) -> Result<usize, GeometryError> {
    let variable = problem.variable(variable_id);
    let mut conflicts = 0;

    for (other_id, other_word) in assignment.iter(problem) {
        if other_id == variable_id {
            continue;
        }

        let other_variable = problem.variable(other_id);
        conflicts += shared_letters(variable, candidate, other_variable, other_word)?
            .iter()
            .filter(|(letter, other_letter)| letter != other_letter)
            .count();
    }

    Ok(conflicts)
}
