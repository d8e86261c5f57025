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

//! This module provides the definition and implementation of the graph model:
//! an immutable node set together with a symmetric, irreflexive adjacency
//! relation. Every other component of the engine works against this model.

use rustc_hash::{FxHashMap, FxHashSet};

/// This is the kind of error that gets raised when one attempts to build a
/// graph violating the structural contract (symmetric, irreflexive, simple)
#[derive(Debug, Clone, Copy, thiserror::Error, PartialEq, Eq, Hash)]
pub enum InvalidGraph {
    /// an edge connects a node to itself
    #[error("edge ({0:?}, {0:?}) is a self loop")]
    SelfLoop(Node),
    /// an edge references a node that does not belong to the node set
    #[error("node {0:?} does not belong to the node set")]
    UnknownNode(Node),
    /// the same edge was declared twice
    #[error("edge ({0:?}, {1:?}) is declared more than once")]
    DuplicateEdge(Node, Node),
    /// an adjacency list mentions a neighbor whose own list does not
    /// mention the node back
    #[error("adjacency is not symmetric: {0:?} lists {1:?} but not conversely")]
    AsymmetricAdjacency(Node, Node),
}

/// A node of the graph. Nodes are plain indices in the range 0..node_count
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Node(usize);

impl Node {
    /// Creates a node identifier from its index
    pub const fn new(index: usize) -> Self {
        Self(index)
    }
    /// Returns the index of this node
    pub const fn index(self) -> usize {
        self.0
    }
}

/// An immutable undirected simple graph. The structural invariants (symmetric
/// adjacency, no self loop, no duplicate edge) are checked once at
/// construction; afterwards neighbor lookup and degree are plain slice
/// accesses.
#[derive(Debug, Clone, PartialEq)]
pub struct Graph {
    /// The neighbors of each node, sorted by index
    adjacency: Vec<Vec<Node>>,
    /// The number of (undirected) edges
    n_edges: usize,
    /// The highest degree over all nodes (0 for an edgeless graph)
    max_degree: usize,
}

impl Graph {
    /// Creates a graph over `node_count` nodes from an explicit edge list.
    /// Each pair is one undirected edge; both orientations count as the
    /// same edge when checking for duplicates.
    pub fn new(node_count: usize, edges: &[(Node, Node)]) -> Result<Self, InvalidGraph> {
        let mut seen = FxHashSet::default();
        let mut adjacency = vec![vec![]; node_count];

        for &(u, v) in edges {
            if u == v {
                return Err(InvalidGraph::SelfLoop(u));
            }
            if u.0 >= node_count {
                return Err(InvalidGraph::UnknownNode(u));
            }
            if v.0 >= node_count {
                return Err(InvalidGraph::UnknownNode(v));
            }
            let key = (u.min(v), u.max(v));
            if !seen.insert(key) {
                return Err(InvalidGraph::DuplicateEdge(u, v));
            }
            adjacency[u.0].push(v);
            adjacency[v.0].push(u);
        }

        Ok(Self::from_validated(adjacency, seen.len()))
    }

    /// Creates a graph from per-node neighbor lists, the shape in which map
    /// adjacency data usually comes. The lists must be mutually consistent:
    /// whenever u lists v, v must list u.
    pub fn from_adjacency_lists(lists: Vec<Vec<Node>>) -> Result<Self, InvalidGraph> {
        let node_count = lists.len();
        let mut n_edges = 0;

        for (i, neighbors) in lists.iter().enumerate() {
            let u = Node(i);
            let mut local = FxHashSet::default();
            for &v in neighbors {
                if v == u {
                    return Err(InvalidGraph::SelfLoop(u));
                }
                if v.0 >= node_count {
                    return Err(InvalidGraph::UnknownNode(v));
                }
                if !local.insert(v) {
                    return Err(InvalidGraph::DuplicateEdge(u, v));
                }
                if !lists[v.0].contains(&u) {
                    return Err(InvalidGraph::AsymmetricAdjacency(u, v));
                }
                n_edges += 1;
            }
        }

        // every edge was seen once from each endpoint
        Ok(Self::from_validated(lists, n_edges / 2))
    }

    /// Returns the number of nodes in the graph
    pub fn node_count(&self) -> usize {
        self.adjacency.len()
    }
    /// Returns the number of undirected edges in the graph
    pub fn edge_count(&self) -> usize {
        self.n_edges
    }
    /// Iterates over all the nodes of the graph
    pub fn nodes(&self) -> impl Iterator<Item = Node> {
        (0..self.adjacency.len()).map(Node)
    }
    /// Returns the neighbors of the given node, sorted by index
    pub fn neighbors(&self, node: Node) -> &[Node] {
        &self.adjacency[node.0]
    }
    /// Returns the degree of the given node
    pub fn degree(&self, node: Node) -> usize {
        self.adjacency[node.0].len()
    }
    /// Returns the highest degree over all nodes (0 when the graph has no
    /// edge at all)
    pub fn max_degree(&self) -> usize {
        self.max_degree
    }

    fn from_validated(mut adjacency: Vec<Vec<Node>>, n_edges: usize) -> Self {
        for neighbors in adjacency.iter_mut() {
            neighbors.sort_unstable();
        }
        let max_degree = adjacency.iter().map(Vec::len).max().unwrap_or(0);
        Self {
            adjacency,
            n_edges,
            max_degree,
        }
    }
}

/// A convenience layer to assemble a graph from labeled nodes (region names
/// and the like). Nodes are numbered in order of first appearance and
/// duplicate edge declarations are coalesced rather than rejected.
#[derive(Debug, Default)]
pub struct GraphBuilder {
    /// label -> node index
    ids: FxHashMap<String, usize>,
    /// node index -> label
    labels: Vec<String>,
    /// edges, normalized to (lower index, higher index)
    edges: FxHashSet<(usize, usize)>,
}

impl GraphBuilder {
    /// Creates an empty builder
    pub fn new() -> Self {
        Default::default()
    }

    /// Returns the node labeled `label`, interning it if needed
    pub fn node(&mut self, label: &str) -> Node {
        if let Some(&id) = self.ids.get(label) {
            Node(id)
        } else {
            let id = self.labels.len();
            self.ids.insert(label.to_string(), id);
            self.labels.push(label.to_string());
            Node(id)
        }
    }

    /// Declares an undirected edge between the two labeled nodes, interning
    /// them if needed. Declaring the same edge twice is fine; a self loop
    /// is not.
    pub fn edge(&mut self, a: &str, b: &str) -> Result<(), InvalidGraph> {
        let u = self.node(a);
        let v = self.node(b);
        if u == v {
            return Err(InvalidGraph::SelfLoop(u));
        }
        self.edges.insert((u.0.min(v.0), u.0.max(v.0)));
        Ok(())
    }

    /// Consumes the builder and produces the graph along with the label of
    /// each node (indexable by `Node::index`)
    pub fn build(self) -> Result<(Graph, Vec<String>), InvalidGraph> {
        let edges = self
            .edges
            .iter()
            .map(|&(u, v)| (Node(u), Node(v)))
            .collect::<Vec<_>>();
        let graph = Graph::new(self.labels.len(), &edges)?;
        Ok((graph, self.labels))
    }
}



#[cfg(test)]
mod test_graph_builder {
    use super::*;

    #[test]
    fn labels_are_interned_in_first_seen_order() {
        let mut builder = GraphBuilder::new();
        builder.edge("WA", "NT").unwrap();
        builder.edge("NT", "Q").unwrap();
        builder.edge("WA", "SA").unwrap();

        let (graph, labels) = builder.build().unwrap();
        assert_eq!(vec!["WA", "NT", "Q", "SA"], labels);
        assert_eq!(4, graph.node_count());
        assert_eq!(3, graph.edge_count());
    }

    #[test]
    fn duplicate_edge_declarations_are_coalesced() {
        let mut builder = GraphBuilder::new();
        builder.edge("a", "b").unwrap();
        builder.edge("b", "a").unwrap();

        let (graph, _) = builder.build().unwrap();
        assert_eq!(1, graph.edge_count());
    }

    #[test]
    fn a_labeled_self_loop_is_rejected() {
        let mut builder = GraphBuilder::new();
        assert_eq!(
            Err(InvalidGraph::SelfLoop(Node::new(0))),
            builder.edge("a", "a")
        );
    }

    #[test]
    fn an_isolated_node_can_be_declared() {
        let mut builder = GraphBuilder::new();
        builder.edge("a", "b").unwrap();
        builder.node("alone");

        let (graph, labels) = builder.build().unwrap();
        assert_eq!(3, graph.node_count());
        assert_eq!(0, graph.degree(Node::new(2)));
        assert_eq!("alone", labels[2]);
    }
}
