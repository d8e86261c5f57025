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

//! This module provides the variable selection and value ordering rules of
//! the search. The heuristic pair (MRV for the variable, LCV for the value)
//! never changes what is satisfiable, only how much of the tree gets
//! explored before the answer is found.

use std::cmp::Reverse;

use crate::{Assignment, Color, ColorDomains, Graph, Node, StateManager};

/// Whether the search should order variables and values heuristically or
/// stick to the fixed naive order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HeuristicMode {
    /// first remaining node, colors in palette order
    Off,
    /// minimum-remaining-values node, least-constraining-value colors
    MrvLcv,
}

/// Picks the position (within `unassigned`) of the node to color next.
///
/// With heuristics off this is always position 0. With MRV it is the node
/// with the fewest remaining candidates, ties broken by the highest degree
/// (the most constraining variable), remaining ties by position.
pub fn select_slot<T: StateManager>(
    mode: HeuristicMode,
    unassigned: &[Node],
    domains: &ColorDomains<T>,
    graph: &Graph,
) -> usize {
    match mode {
        HeuristicMode::Off => 0,
        HeuristicMode::MrvLcv => unassigned
            .iter()
            .enumerate()
            .min_by_key(|(_, &node)| (domains.size(node), Reverse(graph.degree(node))))
            .map(|(slot, _)| slot)
            .expect("the unassigned list cannot be empty when selecting"),
    }
}

/// Orders the candidate colors of the node.
///
/// With heuristics off the candidates come in palette order. With LCV they
/// come by ascending count of unassigned neighbors whose domain still holds
/// the color (the least constraining color first); the sort is stable so
/// ties keep the palette order of the domain.
pub fn order_candidates<T: StateManager>(
    mode: HeuristicMode,
    node: Node,
    graph: &Graph,
    domains: &ColorDomains<T>,
    assignment: &Assignment,
) -> Vec<Color> {
    let mut candidates = domains.colors(node).collect::<Vec<_>>();
    if mode == HeuristicMode::MrvLcv {
        candidates.sort_by_key(|&color| {
            graph
                .neighbors(node)
                .iter()
                .filter(|&&m| !assignment.is_assigned(m) && domains.contains(m, color))
                .count()
        });
    }
    candidates
}

// #############################################################################
// ### UNIT TESTS ##############################################################
// #############################################################################
#[cfg(test)]
mod test_select_slot {
    use super::*;
    use crate::{DefaultColorDomains, Palette};

    /// a path 0 - 1 - 2 - 3
    fn path4() -> Graph {
        Graph::new(
            4,
            &[
                (Node::new(0), Node::new(1)),
                (Node::new(1), Node::new(2)),
                (Node::new(2), Node::new(3)),
            ],
        )
        .unwrap()
    }

    #[test]
    fn naive_mode_always_picks_the_first_remaining_node() {
        let graph = path4();
        let doms = DefaultColorDomains::new(4, Palette::new(3).unwrap());
        let unassigned = vec![Node::new(2), Node::new(0), Node::new(1)];

        let slot = select_slot(HeuristicMode::Off, &unassigned, &doms, &graph);
        assert_eq!(0, slot);
    }

    #[test]
    fn mrv_picks_the_node_with_the_smallest_domain() {
        let graph = path4();
        let mut doms = DefaultColorDomains::new(4, Palette::new(3).unwrap());
        doms.remove(Node::new(3), Color::new(0)).unwrap();
        doms.remove(Node::new(3), Color::new(1)).unwrap();

        let unassigned = (0..4).map(Node::new).collect::<Vec<_>>();
        let slot = select_slot(HeuristicMode::MrvLcv, &unassigned, &doms, &graph);
        assert_eq!(Node::new(3), unassigned[slot]);
    }

    #[test]
    fn mrv_breaks_domain_ties_on_the_highest_degree() {
        let graph = path4();
        let doms = DefaultColorDomains::new(4, Palette::new(3).unwrap());

        // all domains are full: nodes 1 and 2 have degree 2, the first of
        // them in remaining order must win
        let unassigned = (0..4).map(Node::new).collect::<Vec<_>>();
        let slot = select_slot(HeuristicMode::MrvLcv, &unassigned, &doms, &graph);
        assert_eq!(Node::new(1), unassigned[slot]);
    }

    #[test]
    fn mrv_prefers_a_small_domain_over_a_high_degree() {
        let graph = path4();
        let mut doms = DefaultColorDomains::new(4, Palette::new(3).unwrap());
        doms.remove(Node::new(0), Color::new(2)).unwrap();

        let unassigned = (0..4).map(Node::new).collect::<Vec<_>>();
        let slot = select_slot(HeuristicMode::MrvLcv, &unassigned, &doms, &graph);
        assert_eq!(Node::new(0), unassigned[slot]);
    }
}

#[cfg(test)]
mod test_order_candidates {
    use super::*;
    use crate::{DefaultColorDomains, Palette};

    /// a star centered on node 0 with leaves 1 and 2
    fn star3() -> Graph {
        Graph::new(3, &[(Node::new(0), Node::new(1)), (Node::new(0), Node::new(2))]).unwrap()
    }

    #[test]
    fn naive_mode_keeps_the_palette_order() {
        let graph = star3();
        let mut doms = DefaultColorDomains::new(3, Palette::new(3).unwrap());
        doms.remove(Node::new(0), Color::new(1)).unwrap();
        let asg = Assignment::new(3);

        let order = order_candidates(HeuristicMode::Off, Node::new(0), &graph, &doms, &asg);
        assert_eq!(vec![Color::new(0), Color::new(2)], order);
    }

    #[test]
    fn lcv_puts_the_least_constraining_color_first() {
        let graph = star3();
        let mut doms = DefaultColorDomains::new(3, Palette::new(3).unwrap());
        // color 0 still constrains both leaves, color 1 only one of them,
        // color 2 none
        doms.remove(Node::new(1), Color::new(1)).unwrap();
        doms.remove(Node::new(1), Color::new(2)).unwrap();
        doms.remove(Node::new(2), Color::new(2)).unwrap();
        let asg = Assignment::new(3);

        let order = order_candidates(HeuristicMode::MrvLcv, Node::new(0), &graph, &doms, &asg);
        assert_eq!(vec![Color::new(2), Color::new(1), Color::new(0)], order);
    }

    #[test]
    fn lcv_ignores_assigned_neighbors() {
        let graph = star3();
        let doms = DefaultColorDomains::new(3, Palette::new(2).unwrap());
        let mut asg = Assignment::new(3);
        asg.commit(Node::new(1), Color::new(0));

        // with node 1 committed, only node 2's domain counts and it holds
        // both colors: the stable sort keeps the palette order
        let order = order_candidates(HeuristicMode::MrvLcv, Node::new(0), &graph, &doms, &asg);
        assert_eq!(vec![Color::new(0), Color::new(1)], order);
    }

    #[test]
    fn lcv_breaks_ties_on_the_palette_order() {
        let graph = star3();
        let doms = DefaultColorDomains::new(3, Palette::new(3).unwrap());
        let asg = Assignment::new(3);

        // every color constrains both leaves equally
        let order = order_candidates(HeuristicMode::MrvLcv, Node::new(0), &graph, &doms, &asg);
        assert_eq!(vec![Color::new(0), Color::new(1), Color::new(2)], order);
    }
}
