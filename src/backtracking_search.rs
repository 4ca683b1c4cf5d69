//! This module implements filling using plain chronological backtracking. At each step we pick a
//! variable with the MRV and degree heuristics, try its words in the order given by the configured
//! `ValueOrdering`, and recurse on every word that agrees with the crossings filled so far. There's
//! no lookahead: a dead end is only discovered when a variable runs out of consistent words.

use instant::{Duration, Instant};
use log::{debug, info, trace};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use thiserror::Error;

use crate::assignment::{Assignment, Choice};
use crate::consistency::is_consistent;
use crate::constraint_graph::ConstraintGraph;
use crate::geometry::GeometryError;
use crate::heuristics::{select_unassigned_variable, ValueOrdering, ValueOrderingKind};
use crate::problem::Problem;
use crate::solution::Solution;

/// Settings for a single fill attempt.
#[derive(Debug, Clone, Default)]
pub struct FillConfig {
    pub value_ordering: ValueOrderingKind,

    /// Give up with `FillFailure::Timeout` once this much time has passed.
    pub timeout: Option<Duration>,

    /// Give up with `FillFailure::Aborted` as soon as this flag is set, e.g. from another thread.
    pub abort: Option<Arc<AtomicBool>>,
}

/// A struct tracking stats about the filling process.
#[derive(Debug, Clone, Default)]
pub struct Statistics {
    /// Number of recursive steps that branched on a variable.
    pub states: u64,

    /// Number of words that were assigned and later taken back.
    pub backtracks: u64,

    /// Number of candidate words checked against the crossings.
    pub consistency_checks: u64,

    pub duration: Duration,
}

/// A struct representing the results of a fill operation.
#[derive(Debug)]
pub struct FillSuccess {
    pub statistics: Statistics,
    pub assignment: Assignment,
}

impl FillSuccess {
    pub fn solution(&self, problem: &Problem) -> Solution {
        Solution::from_assignment(problem, &self.assignment)
    }
}

#[derive(Debug, Error)]
pub enum FillFailure {
    /// Every branch was exhausted, so no assignment of the given domains works.
    #[error("no fill exists for the given words")]
    Unsatisfiable,

    #[error("fill was aborted")]
    Aborted,

    #[error("fill timed out after {0:?}")]
    Timeout(Duration),

    #[error("inconsistent slot geometry: {0}")]
    Geometry(#[from] GeometryError),
}

/// The live state of a single search.
struct Search<'a> {
    problem: &'a Problem,
    constraint_graph: ConstraintGraph,
    value_ordering: &'a dyn ValueOrdering,
    assignment: Assignment,
    statistics: Statistics,
    start: Instant,
    config: &'a FillConfig,
}

impl<'a> Search<'a> {
    /// Bail out if the caller has asked us to stop.
    fn check_interrupts(&self) -> Result<(), FillFailure> {
        if let Some(abort) = &self.config.abort {
            if abort.load(Ordering::Relaxed) {
                return Err(FillFailure::Aborted);
            }
        }

        if let Some(timeout) = self.config.timeout {
            if self.start.elapsed() > timeout {
                return Err(FillFailure::Timeout(timeout));
            }
        }

        Ok(())
    }

    /// Extend the current assignment until it's complete, returning `Ok(true)` if we succeed and
    /// `Ok(false)` if every word for the chosen variable leads to a dead end. On failure the
    /// assignment is left exactly as we found it.
    fn recursive_backtracking(&mut self) -> Result<bool, FillFailure> {
        self.check_interrupts()?;

        // No unassigned variables left means the assignment is complete.
        let Some(variable_id) =
            select_unassigned_variable(self.problem, &self.assignment, &self.constraint_graph)
        else {
            return Ok(true);
        };

        self.statistics.states += 1;

        let variable = self.problem.variable(variable_id);
        let options =
            self.value_ordering.order_values(self.problem, variable_id, &self.assignment)?;

        for word_id in options {
            let word = &variable.domain[word_id];

            self.statistics.consistency_checks += 1;
            if !is_consistent(self.problem, variable_id, word, &self.assignment)? {
                continue;
            }

            trace!("Assigning {} = {}", variable.name, word.string);
            self.assignment.push(Choice { variable_id, word_id });

            if self.recursive_backtracking()? {
                return Ok(true);
            }

            self.assignment.pop();
            self.statistics.backtracks += 1;
            debug!("Backtracking from {} = {}", variable.name, word.string);
        }

        Ok(false)
    }
}

/// Search for a complete, consistent assignment for the given problem. The search is
/// deterministic: the same problem and config always produce the same assignment.
pub fn find_fill(problem: &Problem, config: &FillConfig) -> Result<FillSuccess, FillFailure> {
    let start = Instant::now();

    info!(
        "Starting fill of {} variables with {:?} ordering",
        problem.len(),
        config.value_ordering
    );

    let mut search = Search {
        problem,
        constraint_graph: ConstraintGraph::build(problem),
        value_ordering: config.value_ordering.ordering(),
        assignment: Assignment::new(problem),
        statistics: Statistics::default(),
        start,
        config,
    };

    // An interrupted search unwinds through `?` without popping its choices, but the assignment
    // is thrown away in that case anyway.
    let filled = search.recursive_backtracking()?;
    search.statistics.duration = start.elapsed();

    if !filled {
        info!(
            "No fill found after {} states and {} backtracks",
            search.statistics.states, search.statistics.backtracks
        );
        return Err(FillFailure::Unsatisfiable);
    }

    info!(
        "Found fill after {} states and {} backtracks in {:?}",
        search.statistics.states, search.statistics.backtracks, search.statistics.duration
    );

    Ok(FillSuccess {
        statistics: search.statistics,
        assignment: search.assignment,
    })
}

/// Search with the default config.
pub fn backtracking_search(problem: &Problem) -> Result<FillSuccess, FillFailure> {
    find_fill(problem, &FillConfig::default())
}
