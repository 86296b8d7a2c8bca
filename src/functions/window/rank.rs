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

//! RANK and DENSE_RANK window functions

use crate::functions::{FunctionInfo, FunctionType, RankingFunction};

/// RANK window function
///
/// Returns the rank of the current row within the partition, with gaps.
/// Peer rows (equal on every ORDER BY key) receive the same rank, and the
/// next rank is the row number (leaving gaps).
///
/// Example: If two rows tie for rank 1, the next row gets rank 3 (not 2).
#[derive(Default)]
pub struct RankFunction;

impl RankingFunction for RankFunction {
    fn name(&self) -> &str {
        "RANK"
    }

    fn info(&self) -> FunctionInfo {
        FunctionInfo::new(
            "RANK",
            FunctionType::Ranking,
            "Returns the rank of the current row within the partition, with gaps for ties",
        )
    }

    fn assign(&self, sorted: &[usize], is_peer: &dyn Fn(usize, usize) -> bool) -> Vec<i64> {
        let mut ranks = Vec::with_capacity(sorted.len());
        let mut rank = 1i64;
        for (pos, &row) in sorted.iter().enumerate() {
            if pos > 0 && !is_peer(sorted[pos - 1], row) {
                rank = pos as i64 + 1;
            }
            ranks.push(rank);
        }
        ranks
    }
}

/// DENSE_RANK window function
///
/// Returns the rank of the current row within the partition, without gaps.
/// Peer rows receive the same rank, and the next rank is incremented by 1.
///
/// Example: If two rows tie for rank 1, the next row gets rank 2.
#[derive(Default)]
pub struct DenseRankFunction;

impl RankingFunction for DenseRankFunction {
    fn name(&self) -> &str {
        "DENSE_RANK"
    }

    fn info(&self) -> FunctionInfo {
        FunctionInfo::new(
            "DENSE_RANK",
            FunctionType::Ranking,
            "Returns the rank of the current row within the partition, without gaps for ties",
        )
    }

    fn assign(&self, sorted: &[usize], is_peer: &dyn Fn(usize, usize) -> bool) -> Vec<i64> {
        let mut ranks = Vec::with_capacity(sorted.len());
        let mut rank = 1i64;
        for (pos, &row) in sorted.iter().enumerate() {
            if pos > 0 && !is_peer(sorted[pos - 1], row) {
                rank += 1;
            }
            ranks.push(rank);
        }
        ranks
    }
}
