//! The partial assignment threaded through the search. Choices are pushed as the search branches
//! and popped in reverse order when it backtracks.

use smallvec::SmallVec;

use crate::problem::{Problem, VariableId, Word, WordId};
use crate::MAX_SLOT_COUNT;

/// A struct recording a variable assignment made during the filling process.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Choice {
    pub variable_id: VariableId,
    pub word_id: WordId,
}

/// A mapping from some subset of the problem's variables to a word from each one's domain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assignment {
    /// Choices in the order they were made.
    choices: SmallVec<[Choice; MAX_SLOT_COUNT]>,

    /// The chosen word for each variable, indexed by VariableId.
    word_ids: Vec<Option<WordId>>,
}

impl Assignment {
    /// An empty assignment for the given problem.
    pub fn new(problem: &Problem) -> Assignment {
        Assignment {
            choices: SmallVec::new(),
            word_ids: vec![None; problem.len()],
        }
    }

    pub fn len(&self) -> usize {
        self.choices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.choices.is_empty()
    }

    /// Does every variable in the problem have a word?
    pub fn is_complete(&self) -> bool {
        self.choices.len() == self.word_ids.len()
    }

    pub fn is_assigned(&self, variable_id: VariableId) -> bool {
        self.word_ids[variable_id].is_some()
    }

    pub fn word_id(&self, variable_id: VariableId) -> Option<WordId> {
        self.word_ids[variable_id]
    }

    pub fn word<'a>(&self, problem: &'a Problem, variable_id: VariableId) -> Option<&'a Word> {
        self.word_ids[variable_id].map(|word_id| &problem.variable(variable_id).domain[word_id])
    }

    pub fn choices(&self) -> &[Choice] {
        &self.choices
    }

    /// Iterate over assigned variables and their words, in the order they were chosen.
    pub fn iter<'a>(&'a self, problem: &'a Problem) -> impl Iterator<Item = (VariableId, &'a Word)> {
        self.choices.iter().map(move |choice| {
            (choice.variable_id, &problem.variable(choice.variable_id).domain[choice.word_id])
        })
    }

    /// Is the given string already the value of some assigned variable?
    pub fn uses_word(&self, problem: &Problem, string: &str) -> bool {
        self.iter(problem).any(|(_, word)| word.string == string)
    }

    /// Record a choice. The variable must not already be assigned.
    pub fn push(&mut self, choice: Choice) {
        if self.word_ids[choice.variable_id].is_some() {
            panic!("Variable {} is already assigned", choice.variable_id);
        }

        self.word_ids[choice.variable_id] = Some(choice.word_id);
        self.choices.push(choice);
    }

    /// Undo the most recent choice.
    pub fn pop(&mut self) -> Option<Choice> {
        let choice = self.choices.pop()?;
        self.word_ids[choice.variable_id] = None;
        Some(choice)
    }
}

#[cfg(test)]
mod tests {
    use crate::assignment::{Assignment, Choice};
    use crate::geometry::{Direction, Placement};
    use crate::problem::{Problem, VariableSpec};

    fn two_variable_problem() -> Problem {
        Problem::new(vec![
            VariableSpec::new("1across", Placement::new(Direction::Across, (0, 0), 3), ["AFT", "ALE"]),
            VariableSpec::new("1down", Placement::new(Direction::Down, (0, 0), 3), ["ALE", "AFT"]),
        ])
        .unwrap()
    }

    #[test]
    fn test_push_and_pop_are_symmetric() {
        let problem = two_variable_problem();
        let mut assignment = Assignment::new(&problem);

        assignment.push(Choice { variable_id: 1, word_id: 0 });
        assignment.push(Choice { variable_id: 0, word_id: 0 });
        assert!(assignment.is_complete());
        assert_eq!(assignment.word(&problem, 1).unwrap().string, "ALE");
        assert!(assignment.uses_word(&problem, "AFT"));

        assert_eq!(assignment.pop(), Some(Choice { variable_id: 0, word_id: 0 }));
        assert!(!assignment.is_assigned(0));
        assert!(assignment.is_assigned(1));
        assert!(!assignment.uses_word(&problem, "AFT"));

        assignment.pop();
        assert_eq!(assignment, Assignment::new(&problem));
        assert_eq!(assignment.pop(), None);
    }

    #[test]
    #[should_panic]
    fn test_double_assignment_panics() {
        let problem = two_variable_problem();
        let mut assignment = Assignment::new(&problem);

        assignment.push(Choice { variable_id: 0, word_id: 0 });
        assignment.push(Choice { variable_id: 0, word_id: 1 });
    }
}
