//! The constraint graph: one node per variable, with an edge between any two variables that
//! share a cell. The search only uses it for the degree heuristic.

use bit_set::BitSet;
use log::debug;
use std::fmt::Write;

use crate::geometry::CellCoords;
use crate::problem::{Problem, Variable, VariableId};

/// Return the cells covered by both variables, in the order they appear in `first`. An empty
/// result means there's no constraint between them.
pub fn overlap_positions(first: &Variable, second: &Variable) -> CellCoords {
    let second_cells = second.cell_coords();

    first
        .cell_coords()
        .into_iter()
        .filter(|cell| second_cells.contains(cell))
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConstraintGraph {
    /// Neighbor sets, indexed by VariableId.
    neighbors: Vec<BitSet>,
}

impl ConstraintGraph {
    /// Check every pair of variables for shared cells. This is quadratic in the number of
    /// variables, which is fine for grids with tens of slots.
    pub fn build(problem: &Problem) -> ConstraintGraph {
        let variable_count = problem.len();
        let mut neighbors: Vec<BitSet> =
            (0..variable_count).map(|_| BitSet::with_capacity(variable_count)).collect();

        let variables = problem.variables();
        for (first_id, first) in variables.iter().enumerate() {
            for (second_id, second) in variables.iter().enumerate().skip(first_id + 1) {
                if !overlap_positions(first, second).is_empty() {
                    neighbors[first_id].insert(second_id);
                    neighbors[second_id].insert(first_id);
                }
            }
        }

        let graph = ConstraintGraph { neighbors };
        debug!(
            "Built constraint graph with {} nodes and {} edges",
            variable_count,
            graph.edge_count()
        );

        graph
    }

    pub fn node_count(&self) -> usize {
        self.neighbors.len()
    }

    /// Number of variables sharing at least one cell with this one.
    pub fn degree(&self, variable_id: VariableId) -> usize {
        self.neighbors[variable_id].len()
    }

    pub fn neighbors(&self, variable_id: VariableId) -> impl Iterator<Item = VariableId> + '_ {
        self.neighbors[variable_id].iter()
    }

    pub fn are_adjacent(&self, first: VariableId, second: VariableId) -> bool {
        self.neighbors[first].contains(second)
    }

    pub fn edge_count(&self) -> usize {
        self.neighbors.iter().map(|set| set.len()).sum::<usize>() / 2
    }

    /// Each edge once, as `(lower id, higher id)`.
    pub fn edges(&self) -> impl Iterator<Item = (VariableId, VariableId)> + '_ {
        self.neighbors.iter().enumerate().flat_map(|(first, set)| {
            set.iter().filter(move |&second| second > first).map(move |second| (first, second))
        })
    }

    /// Render the graph in Graphviz DOT format, labelling each node with its variable name and
    /// degree.
    pub fn to_dot(&self, problem: &Problem) -> String {
        let mut dot = String::from("graph constraints {\n");

        for variable in problem.variables() {
            let _ = writeln!(
                dot,
                "    {} [label=\"{} ({})\"];",
                variable.id,
                variable.name,
                self.degree(variable.id)
            );
        }

        for (first, second) in self.edges() {
            let _ = writeln!(dot, "    {first} -- {second};");
        }

        dot.push_str("}\n");
        dot
    }
}

#[cfg(test)]
mod tests {
    use crate::constraint_graph::{overlap_positions, ConstraintGraph};
    use crate::geometry::{Direction, Placement};
    use crate::problem::{Problem, VariableSpec};

    /// ...
    /// .#.
    /// ...
    ///
    /// plus an across slot off in the corner that doesn't touch anything.
    fn ring_problem() -> Problem {
        let slot = |name: &str, direction, start, words: &[&str]| {
            VariableSpec::new(name, Placement::new(direction, start, 3), words.iter().copied())
        };

        Problem::new(vec![
            slot("1across", Direction::Across, (0, 0), &["AFT"]),
            slot("1down", Direction::Down, (0, 0), &["ALE"]),
            slot("2down", Direction::Down, (0, 2), &["TIE"]),
            slot("3across", Direction::Across, (2, 0), &["EEL"]),
            slot("4across", Direction::Across, (4, 4), &["LEE"]),
        ])
        .unwrap()
    }

    #[test]
    fn test_overlap_positions() {
        let problem = ring_problem();
        let variable = |name| problem.variable_by_name(name).unwrap();

        assert_eq!(overlap_positions(variable("1across"), variable("2down")).as_slice(), &[(0, 2)]);
        assert_eq!(overlap_positions(variable("1down"), variable("3across")).as_slice(), &[(2, 0)]);
        assert!(overlap_positions(variable("1across"), variable("3across")).is_empty());
        assert!(overlap_positions(variable("4across"), variable("2down")).is_empty());
    }

    #[test]
    fn test_overlap_positions_for_stacked_slots() {
        let problem = Problem::new(vec![
            VariableSpec::new("1across", Placement::new(Direction::Across, (0, 0), 5), ["LASER"]),
            VariableSpec::new("2across", Placement::new(Direction::Across, (0, 2), 3), ["SER"]),
        ])
        .unwrap();

        assert_eq!(
            overlap_positions(&problem.variables()[0], &problem.variables()[1]).as_slice(),
            &[(0, 2), (0, 3), (0, 4)]
        );
    }

    #[test]
    fn test_build_graph() {
        let problem = ring_problem();
        let graph = ConstraintGraph::build(&problem);

        assert_eq!(graph.node_count(), 5);
        assert_eq!(graph.edge_count(), 4);
        assert_eq!(graph.edges().collect::<Vec<_>>(), vec![(0, 1), (0, 2), (1, 3), (2, 3)]);
        assert_eq!(graph.neighbors(3).collect::<Vec<_>>(), vec![1, 2]);
        assert_eq!(graph.degree(0), 2);
        assert_eq!(graph.degree(4), 0);
        assert!(graph.are_adjacent(2, 0));
        assert!(!graph.are_adjacent(0, 3));
    }

    #[test]
    fn test_to_dot() {
        let problem = ring_problem();
        let dot = ConstraintGraph::build(&problem).to_dot(&problem);

        assert!(dot.starts_with("graph constraints {\n"));
        assert!(dot.contains("    0 [label=\"1across (2)\"];\n"));
        assert!(dot.contains("    4 [label=\"4across (0)\"];\n"));
        assert!(dot.contains("    1 -- 3;\n"));
        assert!(dot.ends_with("}\n"));
    }
}
