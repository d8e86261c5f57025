//
// chromacp-rs is free software: you can redistribute it and/or modify
// it under the terms of the GNU Lesser General Public License  v3
// as published by the Free Software Foundation.
//
// chromacp-rs is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY.
// See the GNU Lesser General Public License  for more details.
//
// You should have received a copy of the GNU Lesser General Public License
// along with chromacp-rs. If not, see http://www.gnu.org/licenses/lgpl-3.0.en.html
//
// Copyright (c)  2022 by X. Gillard
//

//! This module provides the backtracking search driver. There is exactly one
//! driver: the six search variants are the product of a propagation policy
//! and a heuristic mode, and they all share the same base case, the same
//! undo discipline and the same backtrack accounting.

use crate::{
    order_candidates, select_slot, Assignment, Color, DefaultColorDomains, Graph, HeuristicMode,
    InvalidConfig, Node, Palette, PropagationPolicy, SaveAndRestore,
};

/// The complete parameterization of one search run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SearchConfig {
    /// how much propagation runs after each tentative coloring
    pub policy: PropagationPolicy,
    /// how variables and values get ordered
    pub heuristics: HeuristicMode,
}

impl SearchConfig {
    /// Creates a search configuration
    pub fn new(policy: PropagationPolicy, heuristics: HeuristicMode) -> Self {
        Self { policy, heuristics }
    }

    /// All six search variants: each propagation policy with and without
    /// the ordering heuristics
    pub fn all_variants() -> [SearchConfig; 6] {
        [
            Self::new(PropagationPolicy::None, HeuristicMode::Off),
            Self::new(PropagationPolicy::ForwardChecking, HeuristicMode::Off),
            Self::new(
                PropagationPolicy::ForwardCheckingSingletonPropagation,
                HeuristicMode::Off,
            ),
            Self::new(PropagationPolicy::None, HeuristicMode::MrvLcv),
            Self::new(PropagationPolicy::ForwardChecking, HeuristicMode::MrvLcv),
            Self::new(
                PropagationPolicy::ForwardCheckingSingletonPropagation,
                HeuristicMode::MrvLcv,
            ),
        ]
    }
}

/// What a search run produced: possibly a complete coloring, and the number
/// of dead ends hit along the way
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchOutcome {
    /// one color per node when the search succeeded, None when the palette
    /// was exhaustively proven too small
    pub coloring: Option<Vec<Color>>,
    /// how many nodes ran out of candidates (one count per exhausted node,
    /// not per rejected color)
    pub backtracks: usize,
}

impl SearchOutcome {
    /// Returns true iff a complete coloring was found
    pub fn is_success(&self) -> bool {
        self.coloring.is_some()
    }
}

/// Searches for a coloring of the graph using at most `n_colors` colors.
///
/// All six configurations agree on whether a coloring exists; they only
/// differ in the amount of work spent discovering it. An exhausted search
/// is a regular outcome (`coloring: None`), not an error.
pub fn solve(
    graph: &Graph,
    n_colors: usize,
    config: SearchConfig,
) -> Result<SearchOutcome, InvalidConfig> {
    let palette = Palette::new(n_colors)?;
    tracing::debug!(
        policy = ?config.policy,
        heuristics = ?config.heuristics,
        n_colors,
        nodes = graph.node_count(),
        "starting coloring search"
    );

    let mut search = Search {
        graph,
        config,
        domains: DefaultColorDomains::new(graph.node_count(), palette),
        assignment: Assignment::new(graph.node_count()),
        unassigned: graph.nodes().collect(),
        backtracks: 0,
    };

    let solved = search.assign_next();
    let outcome = SearchOutcome {
        coloring: solved.then(|| search.assignment.into_coloring()),
        backtracks: search.backtracks,
    };
    tracing::debug!(
        success = outcome.is_success(),
        backtracks = outcome.backtracks,
        "search finished"
    );
    Ok(outcome)
}

/// Runs the estimator first, then searches with the minimal palette it
/// reports. Returns the palette size along with the outcome; the search
/// itself always succeeds since the estimator proved that size sufficient.
pub fn solve_with_minimal_palette(
    graph: &Graph,
    config: SearchConfig,
) -> (usize, SearchOutcome) {
    let n_colors = crate::estimate_chromatic_number(graph);
    let outcome = solve(graph, n_colors, config)
        .expect("the estimator never reports an empty palette");
    (n_colors, outcome)
}

/// The state threaded through the recursion: the graph and configuration
/// (read only), the domains and assignment (mutated on descent, restored on
/// backtrack), the remaining nodes, and the dead-end counter.
struct Search<'a> {
    graph: &'a Graph,
    config: SearchConfig,
    domains: DefaultColorDomains,
    assignment: Assignment,
    unassigned: Vec<Node>,
    backtracks: usize,
}

impl Search<'_> {
    /// One level of the depth-first search: picks a node, tries its
    /// candidate colors in order, recurses, and undoes every effect of a
    /// failed try. Returns true as soon as every node is assigned.
    fn assign_next(&mut self) -> bool {
        if self.unassigned.is_empty() {
            return true;
        }

        let slot = select_slot(
            self.config.heuristics,
            &self.unassigned,
            &self.domains,
            self.graph,
        );
        let node = self.unassigned[slot];
        let candidates = order_candidates(
            self.config.heuristics,
            node,
            self.graph,
            &self.domains,
            &self.assignment,
        );

        for color in candidates {
            if self.held_by_assigned_neighbor(node, color) {
                continue;
            }
            if !self
                .config
                .policy
                .accepts(self.graph, node, color, &self.assignment, &self.domains)
            {
                continue;
            }

            self.assignment.commit(node, color);
            self.unassigned.remove(slot);
            self.domains.save_state();

            let consistent = self
                .config
                .policy
                .prune(self.graph, node, color, &self.assignment, &mut self.domains)
                .is_ok();
            if consistent && self.assign_next() {
                return true;
            }

            // transactional undo: domains back to the saved level, node
            // back to its slot, commitment withdrawn
            self.domains.restore_state();
            self.unassigned.insert(slot, node);
            self.assignment.uncommit(node);
        }

        self.backtracks += 1;
        tracing::trace!(node = node.index(), "dead end, backtracking");
        false
    }

    /// Returns true iff an already assigned neighbor of `node` holds `color`
    fn held_by_assigned_neighbor(&self, node: Node, color: Color) -> bool {
        self.graph
            .neighbors(node)
            .iter()
            .any(|&m| self.assignment.color_of(m) == Some(color))
    }
}


#[cfg(test)]
mod test_solve_scenarios {
    use super::test_fixtures::*;
    use super::*;

    #[test]
    fn a_4_cycle_takes_two_colors_alternating() {
        let graph = cycle4();
        for config in SearchConfig::all_variants() {
            let outcome = solve(&graph, 2, config).unwrap();
            assert_proper_coloring(&graph, &outcome);

            let coloring = outcome.coloring.unwrap();
            assert_eq!(coloring[0], coloring[2]);
            assert_eq!(coloring[1], coloring[3]);
        }
    }

    #[test]
    fn a_4_cycle_cannot_take_one_color() {
        let graph = cycle4();
        for config in SearchConfig::all_variants() {
            let outcome = solve(&graph, 1, config).unwrap();
            assert!(!outcome.is_success());
            assert!(outcome.backtracks > 0);
        }
    }

    #[test]
    fn the_complete_graph_on_5_nodes_takes_exactly_5_colors() {
        let graph = complete5();
        for config in SearchConfig::all_variants() {
            let failed = solve(&graph, 4, config).unwrap();
            assert!(!failed.is_success());

            let solved = solve(&graph, 5, config).unwrap();
            assert_proper_coloring(&graph, &solved);
        }
    }

    #[test]
    fn the_australia_map_takes_three_colors() {
        let graph = australia();
        for config in SearchConfig::all_variants() {
            let outcome = solve(&graph, 3, config).unwrap();
            assert_proper_coloring(&graph, &outcome);
        }
    }

    #[test]
    fn an_empty_graph_is_trivially_colored() {
        let graph = Graph::new(0, &[]).unwrap();
        let config = SearchConfig::new(PropagationPolicy::None, HeuristicMode::Off);
        let outcome = solve(&graph, 1, config).unwrap();

        assert!(outcome.is_success());
        assert_eq!(Some(vec![]), outcome.coloring);
        assert_eq!(0, outcome.backtracks);
    }

    #[test]
    fn an_edgeless_graph_needs_a_single_color() {
        let graph = Graph::new(3, &[]).unwrap();
        for config in SearchConfig::all_variants() {
            let outcome = solve(&graph, 1, config).unwrap();
            assert_proper_coloring(&graph, &outcome);
            assert_eq!(0, outcome.backtracks);
        }
    }

    #[test]
    fn an_empty_palette_is_rejected_upfront() {
        let graph = cycle4();
        let config = SearchConfig::new(PropagationPolicy::None, HeuristicMode::Off);
        assert_eq!(Err(InvalidConfig::EmptyPalette), solve(&graph, 0, config));
    }
}
