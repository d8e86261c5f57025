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

//! This module provides the definition and implementation of the palette,
//! the per-node color domains and the partial assignment.

use crate::{
    CPResult, Inconsistency, Node, ReversibleSparseSet, SaveAndRestore, StateManager,
    TrailedStateManager,
};

/// This is the kind of error that gets raised when the engine is configured
/// with nonsensical parameters
#[derive(Debug, Clone, Copy, thiserror::Error, PartialEq, Eq, Hash)]
pub enum InvalidConfig {
    /// a coloring needs at least one color to work with
    #[error("the palette must comprise at least one color")]
    EmptyPalette,
}

/// One color of the palette. Colors are plain indices in the range 0..k
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Color(usize);

impl Color {
    /// Creates a color identifier from its index in the palette
    pub const fn new(index: usize) -> Self {
        Self(index)
    }
    /// Returns the index of this color in the palette
    pub const fn index(self) -> usize {
        self.0
    }
}

/// An ordered sequence of k distinct color tokens, fixed for the lifetime of
/// one search. The order of the palette is what makes the non-heuristic
/// search variants deterministic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    n_colors: usize,
}

impl Palette {
    /// Creates a palette of `n_colors` distinct colors
    pub fn new(n_colors: usize) -> Result<Self, InvalidConfig> {
        if n_colors == 0 {
            Err(InvalidConfig::EmptyPalette)
        } else {
            Ok(Self { n_colors })
        }
    }
    /// Returns the number of colors in the palette
    pub fn len(&self) -> usize {
        self.n_colors
    }
    /// Returns true iff the palette holds no color (it never does: the
    /// constructor rejects that case)
    pub fn is_empty(&self) -> bool {
        self.n_colors == 0
    }
    /// Iterates over the colors of the palette, in palette order
    pub fn colors(&self) -> impl Iterator<Item = Color> {
        (0..self.n_colors).map(Color)
    }
}

/// This is the type of domain store you will likely want to use in the
/// engine. Currently, this is the only available implementation of the
/// backing state but it *might* possibly change in the future.
pub type DefaultColorDomains = ColorDomains<TrailedStateManager>;

/// The candidate colors still open for each node, backed by one reversible
/// sparse set per node. All pruning goes through `remove` and is undone by
/// the save/restore discipline: a failed branch leaves the domains exactly
/// as they were when the state was last saved.
#[derive(Debug, Clone)]
pub struct ColorDomains<T: StateManager> {
    /// The state manager in charge of saving/restoring the domain states
    state: T,
    /// The domain of each node
    domains: Vec<ReversibleSparseSet>,
    /// The size of the palette the domains started from
    n_colors: usize,
}

impl<T: StateManager + Default> ColorDomains<T> {
    /// Creates one full-palette domain per node
    pub fn new(n_nodes: usize, palette: Palette) -> Self {
        Self::with_state(T::default(), n_nodes, palette)
    }
}

impl<T: StateManager> ColorDomains<T> {
    /// Creates one full-palette domain per node on top of the given state
    /// manager
    pub fn with_state(mut state: T, n_nodes: usize, palette: Palette) -> Self {
        let n_colors = palette.len();
        let domains = (0..n_nodes)
            .map(|_| state.manage_sparse_set(n_colors))
            .collect();
        Self {
            state,
            domains,
            n_colors,
        }
    }

    /// Returns the number of nodes whose domain is tracked
    pub fn node_count(&self) -> usize {
        self.domains.len()
    }
    /// Returns the number of candidate colors left for the given node
    pub fn size(&self, node: Node) -> usize {
        self.state.sparse_set_size(self.domains[node.index()])
    }
    /// Returns true iff the given color is still a candidate for the node
    pub fn contains(&self, node: Node, color: Color) -> bool {
        self.state
            .sparse_set_contains(self.domains[node.index()], color.index())
    }
    /// Returns true iff a single candidate color remains for the node
    pub fn is_singleton(&self, node: Node) -> bool {
        self.size(node) == 1
    }
    /// Returns the sole remaining candidate of the node, if there is
    /// exactly one
    pub fn singleton_color(&self, node: Node) -> Option<Color> {
        if self.is_singleton(node) {
            self.colors(node).next()
        } else {
            None
        }
    }

    /// Removes the given color from the domain of the node. Removing an
    /// absent color is a no-op; an Inconsistency error is returned exactly
    /// when the removal empties the domain.
    pub fn remove(&mut self, node: Node, color: Color) -> CPResult<()> {
        let dom = self.domains[node.index()];
        if self.state.sparse_set_remove(dom, color.index()) && self.state.sparse_set_is_empty(dom) {
            Err(Inconsistency)
        } else {
            Ok(())
        }
    }

    /// Iterates over the remaining candidates of the node in ascending
    /// palette order. This is the iteration order all ordering rules are
    /// defined against.
    pub fn colors(&self, node: Node) -> impl Iterator<Item = Color> + '_ {
        let dom = self.domains[node.index()];
        (0..self.n_colors)
            .filter(move |&c| self.state.sparse_set_contains(dom, c))
            .map(Color)
    }
}

impl<T: StateManager> SaveAndRestore for ColorDomains<T> {
    fn save_state(&mut self) {
        self.state.save_state()
    }

    fn restore_state(&mut self) {
        self.state.restore_state()
    }
}

/// The partial node -> color function built up during the search. Committing
/// a node never prunes any domain: pruning is the business of propagation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assignment {
    /// The color committed for each node (None while unassigned)
    colors: Vec<Option<Color>>,
    /// How many nodes are committed right now
    n_assigned: usize,
}

impl Assignment {
    /// Creates an empty assignment over `n_nodes` nodes
    pub fn new(n_nodes: usize) -> Self {
        Self {
            colors: vec![None; n_nodes],
            n_assigned: 0,
        }
    }

    /// Returns the color committed for the node, if any
    pub fn color_of(&self, node: Node) -> Option<Color> {
        self.colors[node.index()]
    }
    /// Returns true iff the node has a committed color
    pub fn is_assigned(&self, node: Node) -> bool {
        self.colors[node.index()].is_some()
    }
    /// Returns the number of committed nodes
    pub fn assigned_count(&self) -> usize {
        self.n_assigned
    }
    /// Returns true iff every node has a committed color
    pub fn is_complete(&self) -> bool {
        self.n_assigned == self.colors.len()
    }

    /// Commits a color for the node
    pub fn commit(&mut self, node: Node, color: Color) {
        debug_assert!(self.colors[node.index()].is_none());
        self.colors[node.index()] = Some(color);
        self.n_assigned += 1;
    }
    /// Withdraws the committed color of the node
    pub fn uncommit(&mut self, node: Node) {
        debug_assert!(self.colors[node.index()].is_some());
        self.colors[node.index()] = None;
        self.n_assigned -= 1;
    }

    /// Consumes the assignment and returns the complete coloring, indexable
    /// by node index. Only meaningful when the assignment is complete.
    pub fn into_coloring(self) -> Vec<Color> {
        self.colors.into_iter().flatten().collect()
    }
}
