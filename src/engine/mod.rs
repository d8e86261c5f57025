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

//! This module provides the coloring engine itself: the color domains and
//! the partial assignment, the ordering heuristics, the consistency and
//! propagation rules, the backtracking search driver and the
//! chromatic-number estimator.

/// This is the kind of error that gets raised whenever a domain is wiped out
/// by propagation. It is pure control flow: it tells the search driver that
/// the current branch is infeasible and never reaches the caller.
#[derive(Debug, Clone, Copy, thiserror::Error, PartialEq, Eq, Hash)]
#[error("inconsistency")]
pub struct Inconsistency;

/// The result of a propagation operation. (Note: all propagation operations
/// can fail, in which case they raise an Inconsistency error)
pub type CPResult<T> = Result<T, Inconsistency>;

mod chromatic;
mod domain;
mod heuristics;
mod propagation;
mod search;

pub use chromatic::*;
pub use domain::*;
pub use heuristics::*;
pub use propagation::*;
pub use search::*;
