//! The finished product of a fill: a record of which word went in each slot, which can be saved,
//! reloaded and checked against the problem it claims to solve.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;
use thiserror::Error;

use crate::assignment::Assignment;
use crate::constraint_graph::overlap_positions;
use crate::geometry::{GeometryError, GridCoord};
use crate::problem::Problem;

#[derive(Debug, Error)]
pub enum SolutionError {
    #[error("can't access solution file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed solution record: {0}")]
    Json(#[from] serde_json::Error),

    #[error("variable {0} has no word")]
    MissingVariable(String),

    #[error("solution fills unknown variable {0}")]
    UnknownVariable(String),

    #[error("word {word:?} for {variable} has {actual} letters, expected {expected}")]
    LengthMismatch {
        variable: String,
        word: String,
        expected: usize,
        actual: usize,
    },

    #[error("{first} and {second} disagree at cell {cell:?}")]
    Conflict {
        first: String,
        second: String,
        cell: GridCoord,
    },

    #[error("word {word:?} is used for both {first} and {second}")]
    DuplicateWord {
        word: String,
        first: String,
        second: String,
    },

    #[error(transparent)]
    Geometry(#[from] GeometryError),
}

/// A mapping from variable name to the word chosen for it. Serialized as a flat JSON object.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Solution {
    pub words: BTreeMap<String, String>,
}

impl Solution {
    pub fn from_assignment(problem: &Problem, assignment: &Assignment) -> Solution {
        Solution {
            words: assignment
                .iter(problem)
                .map(|(variable_id, word)| {
                    (problem.variable(variable_id).name.clone(), word.string.clone())
                })
                .collect(),
        }
    }

    pub fn to_json(&self) -> Result<String, SolutionError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(json: &str) -> Result<Solution, SolutionError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), SolutionError> {
        let path = path.as_ref();
        let io_error = |source| SolutionError::Io { path: path.display().to_string(), source };

        let file = File::create(path).map_err(io_error)?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer(&mut writer, self)?;
        writer.write_all(b"\n").map_err(io_error)?;
        writer.flush().map_err(io_error)?;

        Ok(())
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Solution, SolutionError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| SolutionError::Io {
            path: path.display().to_string(),
            source,
        })?;

        Ok(serde_json::from_reader(BufReader::new(file))?)
    }

    /// Verify that this is a complete fill of the given problem: every variable has a word of the
    /// right length, crossing words agree, and no word is used twice. Words don't have to come
    /// from the domains, so hand-edited solutions can be checked too.
    pub fn check(&self, problem: &Problem) -> Result<(), SolutionError> {
        for name in self.words.keys() {
            if problem.variable_id(name).is_none() {
                return Err(SolutionError::UnknownVariable(name.clone()));
            }
        }

        let mut words = Vec::with_capacity(problem.len());
        let mut users_by_word: HashMap<&str, &str> = HashMap::with_capacity(problem.len());

        for variable in problem.variables() {
            let word = self
                .words
                .get(&variable.name)
                .ok_or_else(|| SolutionError::MissingVariable(variable.name.clone()))?;

            let actual = word.chars().count();
            if actual != variable.length() {
                return Err(SolutionError::LengthMismatch {
                    variable: variable.name.clone(),
                    word: word.clone(),
                    expected: variable.length(),
                    actual,
                });
            }

            if let Some(first) = users_by_word.insert(word.as_str(), variable.name.as_str()) {
                return Err(SolutionError::DuplicateWord {
                    word: word.clone(),
                    first: first.to_string(),
                    second: variable.name.clone(),
                });
            }

            words.push(word.chars().collect::<Vec<char>>());
        }

        let variables = problem.variables();
        for (first_id, first) in variables.iter().enumerate() {
            for (second_id, second) in variables.iter().enumerate().skip(first_id + 1) {
                for cell in overlap_positions(first, second) {
                    let letter = words[first_id][first.letter_index(cell)?];
                    let other_letter = words[second_id][second.letter_index(cell)?];

                    if letter != other_letter {
                        return Err(SolutionError::Conflict {
                            first: first.name.clone(),
                            second: second.name.clone(),
                            cell,
                        });
                    }
                }
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use crate::assignment::{Assignment, Choice};
    use crate::geometry::{Direction, Placement};
    use crate::problem::{Problem, VariableSpec};
    use crate::solution::{Solution, SolutionError};

    fn corner_problem() -> Problem {
        Problem::new(vec![
            VariableSpec::new("1across", Placement::new(Direction::Across, (0, 0), 3), ["AFT", "ALE"]),
            VariableSpec::new("1down", Placement::new(Direction::Down, (0, 0), 3), ["ALE", "AFT"]),
        ])
        .unwrap()
    }

    fn solution_of(pairs: &[(&str, &str)]) -> Solution {
        Solution {
            words: pairs.iter().map(|&(name, word)| (name.to_string(), word.to_string())).collect(),
        }
    }

    #[test]
    fn test_from_assignment() {
        let problem = corner_problem();
        let mut assignment = Assignment::new(&problem);
        assignment.push(Choice { variable_id: 1, word_id: 0 });
        assignment.push(Choice { variable_id: 0, word_id: 0 });

        let solution = Solution::from_assignment(&problem, &assignment);

        assert_eq!(solution, solution_of(&[("1across", "AFT"), ("1down", "ALE")]));
        solution.check(&problem).unwrap();
    }

    #[test]
    fn test_json_is_a_flat_object() {
        let solution = solution_of(&[("1down", "ALE"), ("1across", "AFT")]);
        let json = solution.to_json().unwrap();

        assert_eq!(json, r#"{"1across":"AFT","1down":"ALE"}"#);
        assert_eq!(Solution::from_json(&json).unwrap(), solution);
        assert!(matches!(Solution::from_json("[1, 2]"), Err(SolutionError::Json(_))));
    }

    #[test]
    fn test_save_and_load() {
        let path = std::env::temp_dir().join(format!("fillcsp-solution-{}.json", std::process::id()));
        let solution = solution_of(&[("1across", "AFT"), ("1down", "ALE")]);

        solution.save_to_file(&path).unwrap();
        let loaded = Solution::load_from_file(&path).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(loaded, solution);
        assert!(matches!(
            Solution::load_from_file(&path),
            Err(SolutionError::Io { .. })
        ));
    }

    #[test]
    fn test_check_reports_violations() {
        let problem = corner_problem();

        assert!(matches!(
            solution_of(&[("1across", "AFT")]).check(&problem),
            Err(SolutionError::MissingVariable(name)) if name == "1down"
        ));
        assert!(matches!(
            solution_of(&[("1across", "AFT"), ("1down", "ALE"), ("2down", "TIE")]).check(&problem),
            Err(SolutionError::UnknownVariable(name)) if name == "2down"
        ));
        assert!(matches!(
            solution_of(&[("1across", "AFT"), ("1down", "ALES")]).check(&problem),
            Err(SolutionError::LengthMismatch { expected: 3, actual: 4, .. })
        ));
        assert!(matches!(
            solution_of(&[("1across", "AFT"), ("1down", "AFT")]).check(&problem),
            Err(SolutionError::DuplicateWord { .. })
        ));
        assert!(matches!(
            solution_of(&[("1across", "AFT"), ("1down", "EEL")]).check(&problem),
            Err(SolutionError::Conflict { cell: (0, 0), .. })
        ));

        let empty = Problem::new(vec![]).unwrap();
        assert!(Solution { words: BTreeMap::new() }.check(&empty).is_ok());
    }
}
