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

//! This crate aims to provide a fast, lean and clean implementation of a
//! graph coloring constraint solver in rust.
//!
//! Given an undirected simple graph (a map of regions and their borders,
//! say), it finds an assignment of colors to nodes such that no two
//! adjacent nodes share a color, reports the number of backtracks that the
//! search incurred, and estimates the chromatic number (the smallest
//! workable palette) to begin with.
//!
//! # Example
//! ```
//! use chromacp_rs::prelude::*;
//!
//! let mut builder = GraphBuilder::new();
//! builder.edge("WA", "NT").unwrap();
//! builder.edge("NT", "SA").unwrap();
//! builder.edge("SA", "WA").unwrap();
//! let (graph, labels) = builder.build().unwrap();
//!
//! let n_colors = estimate_chromatic_number(&graph);
//! assert_eq!(3, n_colors);
//!
//! let config = SearchConfig::new(
//!     PropagationPolicy::ForwardChecking,
//!     HeuristicMode::MrvLcv,
//! );
//! let outcome = solve(&graph, n_colors, config).unwrap();
//! let coloring = outcome.coloring.expect("three colors suffice");
//! for (node, color) in coloring.iter().enumerate() {
//!     println!("{} -> color #{}", labels[node], color.index());
//! }
//! ```

pub mod engine;
pub mod graph;
pub mod state;

pub use engine::*;
pub use graph::*;
pub use state::*;

/// A convenience module to quickly import everything which is required to
/// work with the solver
pub mod prelude {
    pub use crate::engine::*;
    pub use crate::graph::*;
    pub use crate::state::*;
}
