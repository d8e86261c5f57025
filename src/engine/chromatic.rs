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

//! This module provides the chromatic-number estimator: a deliberately
//! simple backtracking search, independent from the main engine, whose only
//! job is to discover the smallest palette size admitting a full coloring.
//! That size is what the caller then uses to dimension the domains of the
//! real search.

use std::cmp::Reverse;

use crate::{Graph, Node};

/// Returns the smallest k >= 1 such that the graph admits a proper coloring
/// with k colors.
///
/// Each attempt colors the highest-degree uncolored node first and never
/// tries a color index beyond the maximum degree: a greedy ordering is
/// guaranteed to succeed within max_degree + 1 colors, which also bounds
/// the number of attempts.
pub fn estimate_chromatic_number(graph: &Graph) -> usize {
    let max_colors = graph.max_degree() + 1;
    let mut assigned: Vec<Option<usize>> = vec![None; graph.node_count()];

    let mut n_colors = 1;
    loop {
        tracing::debug!(palette = n_colors, "attempting a full coloring");
        assigned.fill(None);
        if color_all(graph, n_colors.min(max_colors), graph.node_count(), &mut assigned) {
            tracing::debug!(chromatic = n_colors, "minimal palette found");
            return n_colors;
        }
        n_colors += 1;
    }
}

/// Tries to color every remaining node with color indices below
/// `color_limit`, highest-degree node first
fn color_all(
    graph: &Graph,
    color_limit: usize,
    remaining: usize,
    assigned: &mut [Option<usize>],
) -> bool {
    if remaining == 0 {
        return true;
    }

    let node = graph
        .nodes()
        .filter(|&n| assigned[n.index()].is_none())
        .max_by_key(|&n| (graph.degree(n), Reverse(n.index())))
        .expect("some node must remain uncolored");

    for color in 0..color_limit {
        if admissible(graph, node, color, assigned) {
            assigned[node.index()] = Some(color);
            if color_all(graph, color_limit, remaining - 1, assigned) {
                return true;
            }
            assigned[node.index()] = None;
        }
    }
    false
}

/// Returns true iff no already colored neighbor holds the color
fn admissible(graph: &Graph, node: Node, color: usize, assigned: &[Option<usize>]) -> bool {
    graph
        .neighbors(node)
        .iter()
        .all(|&m| assigned[m.index()] != Some(color))
}
