//! The variables and domains making up a crossword CSP, validated once at construction and
//! read-only from then on.

use log::debug;
use smallvec::SmallVec;
use std::collections::{HashMap, HashSet};
use std::fmt::{Debug, Formatter};
use thiserror::Error;

use crate::geometry::{CellCoords, GeometryError, GridCoord, Placement};
use crate::MAX_SLOT_LENGTH;

/// An identifier for a given variable, based on its index in the Problem's `variables` field.
pub type VariableId = usize;

/// An identifier for a given word, based on its index in the owning variable's `domain`.
pub type WordId = usize;

/// A struct representing a word that can be chosen for a given variable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Word {
    pub string: String,
    pub glyphs: SmallVec<[char; MAX_SLOT_LENGTH]>,
}

impl Word {
    pub fn new(string: &str) -> Word {
        Word {
            string: string.to_string(),
            glyphs: string.chars().collect(),
        }
    }

    /// Length in characters, which is what slot lengths are measured in.
    pub fn len(&self) -> usize {
        self.glyphs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.glyphs.is_empty()
    }
}

impl From<&str> for Word {
    fn from(string: &str) -> Word {
        Word::new(string)
    }
}

/// The input to `Problem::new`: a named slot and its candidate words.
#[derive(Debug, Clone)]
pub struct VariableSpec {
    pub name: String,
    pub placement: Placement,
    pub domain: Vec<String>,
}

impl VariableSpec {
    pub fn new<I, S>(name: &str, placement: Placement, domain: I) -> VariableSpec
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        VariableSpec {
            name: name.to_string(),
            placement,
            domain: domain.into_iter().map(Into::into).collect(),
        }
    }
}

/// A single crossword slot.
#[derive(Clone)]
pub struct Variable {
    pub id: VariableId,
    pub name: String,
    pub placement: Placement,
    pub domain: Vec<Word>,
}

impl Debug for Variable {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Variable")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("placement", &self.placement)
            .field("domain", &format!("({} words)", self.domain.len()))
            .finish()
    }
}

impl Variable {
    pub fn length(&self) -> usize {
        self.placement.length
    }

    pub fn cell_coords(&self) -> CellCoords {
        self.placement.cell_coords()
    }

    pub fn letter_index(&self, cell: GridCoord) -> Result<usize, GeometryError> {
        self.placement.letter_index(cell)
    }
}

/// Ways a problem definition can be malformed. These are all caught before any search starts.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProblemError {
    #[error("variable {0} is defined more than once")]
    DuplicateVariable(String),

    #[error("variable {0} has zero length")]
    ZeroLength(String),

    #[error("word {word:?} in the domain of {variable} has {actual} letters, expected {expected}")]
    LengthMismatch {
        variable: String,
        word: String,
        expected: usize,
        actual: usize,
    },

    #[error("word {word:?} appears more than once in the domain of {variable}")]
    DuplicateWord { variable: String, word: String },

    #[error("variable {variable} runs outside the {height}x{width} grid")]
    OutOfBounds {
        variable: String,
        height: usize,
        width: usize,
    },
}

/// A struct representing a whole puzzle: every variable along with its domain, in a fixed order.
pub struct Problem {
    variables: Vec<Variable>,
    ids_by_name: HashMap<String, VariableId>,

    /// Every character (lowercased) appearing in any word of any domain.
    letter_pool: HashSet<char>,
}

impl Debug for Problem {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Problem")
            .field("variables", &self.variables)
            .field("letter_pool", &format!("({} letters)", self.letter_pool.len()))
            .finish()
    }
}

impl Problem {
    /// Build a problem from the given variable definitions, checking that every domain matches
    /// its slot.
    pub fn new(specs: Vec<VariableSpec>) -> Result<Problem, ProblemError> {
        Problem::build(specs, None)
    }

    /// Like `new`, but also check that every slot fits inside a grid of the given size.
    pub fn with_bounds(
        specs: Vec<VariableSpec>,
        height: usize,
        width: usize,
    ) -> Result<Problem, ProblemError> {
        Problem::build(specs, Some((height, width)))
    }

    fn build(
        specs: Vec<VariableSpec>,
        bounds: Option<(usize, usize)>,
    ) -> Result<Problem, ProblemError> {
        let mut variables: Vec<Variable> = Vec::with_capacity(specs.len());
        let mut ids_by_name: HashMap<String, VariableId> = HashMap::with_capacity(specs.len());
        let mut letter_pool: HashSet<char> = HashSet::new();

        for spec in specs {
            if ids_by_name.contains_key(&spec.name) {
                return Err(ProblemError::DuplicateVariable(spec.name));
            }

            let length = spec.placement.length;
            if length == 0 {
                return Err(ProblemError::ZeroLength(spec.name));
            }

            if let Some((height, width)) = bounds {
                if !spec.placement.fits_within(height, width) {
                    return Err(ProblemError::OutOfBounds { variable: spec.name, height, width });
                }
            }

            let mut seen: HashSet<&str> = HashSet::with_capacity(spec.domain.len());
            for word in &spec.domain {
                let actual = word.chars().count();
                if actual != length {
                    return Err(ProblemError::LengthMismatch {
                        variable: spec.name.clone(),
                        word: word.clone(),
                        expected: length,
                        actual,
                    });
                }
                if !seen.insert(word.as_str()) {
                    return Err(ProblemError::DuplicateWord {
                        variable: spec.name.clone(),
                        word: word.clone(),
                    });
                }
            }

            let domain: Vec<Word> = spec.domain.iter().map(|word| Word::new(word)).collect();
            for word in &domain {
                letter_pool.extend(word.string.to_lowercase().chars());
            }

            let id = variables.len();
            ids_by_name.insert(spec.name.clone(), id);
            variables.push(Variable {
                id,
                name: spec.name,
                placement: spec.placement,
                domain,
            });
        }

        debug!(
            "Built problem with {} variables and {} distinct letters",
            variables.len(),
            letter_pool.len()
        );

        Ok(Problem { variables, ids_by_name, letter_pool })
    }

    pub fn variables(&self) -> &[Variable] {
        &self.variables
    }

    pub fn variable(&self, id: VariableId) -> &Variable {
        &self.variables[id]
    }

    pub fn variable_id(&self, name: &str) -> Option<VariableId> {
        self.ids_by_name.get(name).copied()
    }

    pub fn variable_by_name(&self, name: &str) -> Option<&Variable> {
        self.variable_id(name).map(|id| &self.variables[id])
    }

    pub fn len(&self) -> usize {
        self.variables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
    }

    pub fn letter_pool(&self) -> &HashSet<char> {
        &self.letter_pool
    }
}

#[cfg(test)]
mod tests {
    use crate::geometry::{Direction, Placement};
    use crate::problem::{Problem, ProblemError, VariableSpec};

    fn across(name: &str, start: (usize, usize), len: usize, words: &[&str]) -> VariableSpec {
        VariableSpec::new(name, Placement::new(Direction::Across, start, len), words.iter().copied())
    }

    #[test]
    fn test_problem_keeps_variable_order_and_names() {
        let problem = Problem::new(vec![
            across("1across", (0, 0), 3, &["AFT", "ALE"]),
            across("4across", (2, 1), 4, &["HIKE"]),
        ])
        .unwrap();

        assert_eq!(problem.len(), 2);
        assert_eq!(problem.variable_id("4across"), Some(1));
        assert_eq!(problem.variable_by_name("1across").unwrap().domain[1].string, "ALE");
        assert!(problem.variable_by_name("2down").is_none());
    }

    #[test]
    fn test_letter_pool_is_lowercased() {
        let problem = Problem::new(vec![across("1across", (0, 0), 3, &["AFT", "Tie"])]).unwrap();

        let mut letters: Vec<char> = problem.letter_pool().iter().copied().collect();
        letters.sort();
        assert_eq!(letters, vec!['a', 'e', 'f', 'i', 't']);
    }

    #[test]
    fn test_rejects_word_of_wrong_length() {
        let result = Problem::new(vec![across("1across", (0, 0), 3, &["AFT", "LASER"])]);

        assert_eq!(
            result.unwrap_err(),
            ProblemError::LengthMismatch {
                variable: "1across".into(),
                word: "LASER".into(),
                expected: 3,
                actual: 5,
            }
        );
    }

    #[test]
    fn test_rejects_duplicate_names_and_words() {
        let result = Problem::new(vec![
            across("1across", (0, 0), 3, &["AFT"]),
            across("1across", (1, 0), 3, &["ALE"]),
        ]);
        assert_eq!(result.unwrap_err(), ProblemError::DuplicateVariable("1across".into()));

        let result = Problem::new(vec![across("1across", (0, 0), 3, &["AFT", "AFT"])]);
        assert!(matches!(result, Err(ProblemError::DuplicateWord { .. })));
    }

    #[test]
    fn test_rejects_slots_outside_the_grid() {
        let specs = vec![across("1across", (0, 3), 3, &["AFT"])];

        assert!(Problem::new(specs.clone()).is_ok());
        assert_eq!(
            Problem::with_bounds(specs, 5, 5).unwrap_err(),
            ProblemError::OutOfBounds { variable: "1across".into(), height: 5, width: 5 }
        );
    }

    #[test]
    fn test_rejects_zero_length() {
        let result = Problem::new(vec![across("1across", (0, 0), 0, &[])]);
        assert_eq!(result.unwrap_err(), ProblemError::ZeroLength("1across".into()));
    }
}
