// Copyright 2025 Stoolap Contributors
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Ranking Functions
//!
//! Rank assigners over a partition already sorted in window order:
//!
//! - [`RowNumberFunction`] - ROW_NUMBER()
//! - [`RankFunction`] - RANK()
//! - [`DenseRankFunction`] - DENSE_RANK()

mod rank;
mod row_number;

pub use rank::{DenseRankFunction, RankFunction};
pub use row_number::RowNumberFunction;

use super::{RankingFunction, WindowFunction};

/// Create the rank assigner for a ranking window function
///
/// Returns `None` for aggregate functions.
pub fn create_ranking(function: &WindowFunction) -> Option<Box<dyn RankingFunction>> {
    match function {
        WindowFunction::RowNumber => Some(Box::new(RowNumberFunction)),
        WindowFunction::Rank => Some(Box::new(RankFunction)),
        WindowFunction::DenseRank => Some(Box::new(DenseRankFunction)),
        WindowFunction::Sum(_)
        | WindowFunction::Mean(_)
        | WindowFunction::Min(_)
        | WindowFunction::Max(_)
        | WindowFunction::Count(_) => None,
    }
}
