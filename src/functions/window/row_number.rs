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

//! ROW_NUMBER window function

use crate::functions::{FunctionInfo, FunctionType, RankingFunction};

/// ROW_NUMBER window function
///
/// Returns the 1-based position of each row in window order. Ties on the
/// ORDER BY keys were already broken by the sorter, so numbers are always
/// distinct and contiguous.
#[derive(Default)]
pub struct RowNumberFunction;

impl RankingFunction for RowNumberFunction {
    fn name(&self) -> &str {
        "ROW_NUMBER"
    }

    fn info(&self) -> FunctionInfo {
        FunctionInfo::new(
            "ROW_NUMBER",
            FunctionType::Ranking,
            "Returns the sequential row number within the partition",
        )
    }

    fn assign(&self, sorted: &[usize], _is_peer: &dyn Fn(usize, usize) -> bool) -> Vec<i64> {
        (1..=sorted.len() as i64).collect()
    }
}
