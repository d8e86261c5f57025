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

//! This module provides the consistency checks and the domain pruning rules
//! applied when a node gets tentatively colored. All pruning happens between
//! a save_state and (on failure) a restore_state of the domains, so every
//! removal performed here is undone when the branch is abandoned.

use std::collections::VecDeque;

use crate::{Assignment, CPResult, Color, ColorDomains, Graph, Node, StateManager};

/// How much constraint propagation the search performs after each tentative
/// coloring
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PropagationPolicy {
    /// plain backtracking: candidates are only checked against the colors
    /// of the already assigned neighbors
    None,
    /// forward checking: the committed color is pruned from the domains of
    /// the unassigned neighbors
    ForwardChecking,
    /// forward checking, then breadth-first propagation of every domain
    /// that shrank to a single candidate
    ForwardCheckingSingletonPropagation,
}

impl PropagationPolicy {
    /// The consistency pre-check run before committing `color` on `node`.
    /// Returns false when committing would immediately wipe out the domain
    /// of an unassigned neighbor, which forward checking detects and avoids
    /// rather than discovers one level deeper.
    pub fn accepts<T: StateManager>(
        self,
        graph: &Graph,
        node: Node,
        color: Color,
        assignment: &Assignment,
        domains: &ColorDomains<T>,
    ) -> bool {
        match self {
            PropagationPolicy::None => true,
            PropagationPolicy::ForwardChecking
            | PropagationPolicy::ForwardCheckingSingletonPropagation => {
                !wipes_out_neighbor(graph, node, color, assignment, domains)
            }
        }
    }

    /// The pruning step run right after `color` was committed on `node`.
    /// An Inconsistency error means the branch is infeasible and must be
    /// backtracked without recursing further.
    pub fn prune<T: StateManager>(
        self,
        graph: &Graph,
        node: Node,
        color: Color,
        assignment: &Assignment,
        domains: &mut ColorDomains<T>,
    ) -> CPResult<()> {
        match self {
            PropagationPolicy::None => Ok(()),
            PropagationPolicy::ForwardChecking => {
                forward_check(graph, node, color, assignment, domains)
            }
            PropagationPolicy::ForwardCheckingSingletonPropagation => {
                forward_check(graph, node, color, assignment, domains)?;
                propagate_singletons(graph, node, assignment, domains)
            }
        }
    }
}

/// Returns true iff some unassigned neighbor of `node` has a domain that
/// already shrank to exactly {color}: committing `color` would leave that
/// neighbor with nothing.
pub fn wipes_out_neighbor<T: StateManager>(
    graph: &Graph,
    node: Node,
    color: Color,
    assignment: &Assignment,
    domains: &ColorDomains<T>,
) -> bool {
    graph.neighbors(node).iter().any(|&m| {
        !assignment.is_assigned(m) && domains.is_singleton(m) && domains.contains(m, color)
    })
}

/// Removes the committed color from the domain of every unassigned neighbor
/// that still holds it
pub fn forward_check<T: StateManager>(
    graph: &Graph,
    node: Node,
    color: Color,
    assignment: &Assignment,
    domains: &mut ColorDomains<T>,
) -> CPResult<()> {
    for &m in graph.neighbors(node) {
        if !assignment.is_assigned(m) {
            domains.remove(m, color)?;
        }
    }
    Ok(())
}

/// Propagates the domains that forward checking reduced to a single
/// candidate: each such neighbor of `node` seeds a FIFO queue, and every
/// processed singleton removes its sole color from its own unassigned
/// neighbors, possibly queueing new singletons. Wiping out any domain fails
/// the whole step.
pub fn propagate_singletons<T: StateManager>(
    graph: &Graph,
    node: Node,
    assignment: &Assignment,
    domains: &mut ColorDomains<T>,
) -> CPResult<()> {
    let mut queue: VecDeque<Node> = graph
        .neighbors(node)
        .iter()
        .copied()
        .filter(|&m| !assignment.is_assigned(m) && domains.is_singleton(m))
        .collect();

    while let Some(current) = queue.pop_front() {
        // a queued node may have been narrowed further in the meantime;
        // only a still-singleton domain has anything to propagate
        let Some(color) = domains.singleton_color(current) else {
            continue;
        };
        for &m in graph.neighbors(current) {
            if !assignment.is_assigned(m) && domains.contains(m, color) {
                domains.remove(m, color)?;
                if domains.is_singleton(m) {
                    queue.push_back(m);
                }
            }
        }
    }
    Ok(())
}


#[cfg(test)]
mod test_forward_check {
    use super::*;
    use crate::{DefaultColorDomains, Palette};

    /// a star centered on node 0 with leaves 1 and 2
    fn star3() -> Graph {
        Graph::new(3, &[(Node::new(0), Node::new(1)), (Node::new(0), Node::new(2))]).unwrap()
    }

    #[test]
    fn the_committed_color_leaves_every_unassigned_neighbor_domain() {
        let graph = star3();
        let mut doms = DefaultColorDomains::new(3, Palette::new(3).unwrap());
        let mut asg = Assignment::new(3);
        asg.commit(Node::new(0), Color::new(1));

        assert_eq!(
            Ok(()),
            forward_check(&graph, Node::new(0), Color::new(1), &asg, &mut doms)
        );
        assert!(!doms.contains(Node::new(1), Color::new(1)));
        assert!(!doms.contains(Node::new(2), Color::new(1)));
        // the committed node's own domain is untouched
        assert!(doms.contains(Node::new(0), Color::new(1)));
    }

    #[test]
    fn an_assigned_neighbor_is_not_pruned() {
        let graph = star3();
        let mut doms = DefaultColorDomains::new(3, Palette::new(3).unwrap());
        let mut asg = Assignment::new(3);
        asg.commit(Node::new(1), Color::new(0));
        asg.commit(Node::new(0), Color::new(1));

        assert_eq!(
            Ok(()),
            forward_check(&graph, Node::new(0), Color::new(1), &asg, &mut doms)
        );
        assert!(doms.contains(Node::new(1), Color::new(1)));
        assert!(!doms.contains(Node::new(2), Color::new(1)));
    }

    #[test]
    fn wiping_out_a_neighbor_raises_an_inconsistency() {
        let graph = star3();
        let mut doms = DefaultColorDomains::new(3, Palette::new(2).unwrap());
        doms.remove(Node::new(1), Color::new(0)).unwrap();
        let mut asg = Assignment::new(3);
        asg.commit(Node::new(0), Color::new(1));

        assert_eq!(
            Err(crate::Inconsistency),
            forward_check(&graph, Node::new(0), Color::new(1), &asg, &mut doms)
        );
    }
}
