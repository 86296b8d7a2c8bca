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

//! Window Executor
//!
//! This module provides the window evaluation engine.
//!
//! # Architecture
//!
//! ```text
//! Table
//!   ↓
//! PartitionKeyExtractor + partition_rows   (PARTITION BY)
//!   ↓
//! RowComparator + sort_partition           (ORDER BY, per partition)
//!   ↓
//! RankingFunction | AggregateFunction      (per partition)
//!   ↓
//! ResultMaterializer                       (back to row positions)
//!   ↓
//! Column
//! ```
//!
//! # Components
//!
//! - [`WindowExecutor`] - Orchestrates validation, partitioning and evaluation
//! - [`ExecutionContext`] - Parallel settings and cancellation
//! - [`ParallelConfig`] - Thresholds for the rayon-backed phases

pub mod context;
pub mod materialize;
pub mod ordering;
pub mod parallel;
pub mod partition;
pub mod window;

pub use context::{CancellationHandle, ExecutionContext, ExecutionContextBuilder};
pub use materialize::ResultMaterializer;
pub use ordering::{sort_partition, OrderByColumn, OrderSpec, RowComparator};
pub use parallel::{
    ParallelConfig, DEFAULT_PARALLEL_CHUNK_SIZE, DEFAULT_PARALLEL_MIN_PARTITIONS,
    DEFAULT_PARALLEL_PARTITION_THRESHOLD,
};
pub use partition::{
    partition_rows, partition_rows_parallel, Partition, PartitionKey, PartitionKeyExtractor,
};
pub use window::{WindowExecutor, WindowSpec};
