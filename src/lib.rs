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

//! # partwin - Partitioned window functions over in-memory tables
//!
//! partwin evaluates SQL-style window functions: rows are grouped by a
//! PARTITION BY key, ordered within each partition by any number of ORDER BY
//! keys, and every row receives a value computed from its own partition.
//!
//! ## Key Features
//!
//! - **Ranking** - ROW_NUMBER, RANK, DENSE_RANK over multi-key orderings
//! - **Aggregates** - SUM, AVG, MIN, MAX, COUNT broadcast to every row of a partition
//! - **Deterministic ties** - rows equal on every ORDER BY key keep their original order
//! - **NULLs last** - NULL sort keys come last under both ASC and DESC
//! - **Parallel evaluation** - rayon-backed partitioning and per-partition work,
//!   with output independent of the worker count
//! - **Cancellation** - cooperative, checked between partitions
//!
//! ## Quick Start
//!
//! ```rust
//! use partwin::api::{col, row_number, Window};
//! use partwin::{row, Table};
//!
//! let table = Table::from_rows(
//!     &["letter", "num"],
//!     vec![row!["a", 3], row!["b", 1], row!["a", 1], row!["a", 2]],
//! )?;
//!
//! let w = Window::new().partition_by("letter");
//! let out = table.with_window_columns(&[
//!     row_number().over(&w.clone().order_by("num", false)?)?,
//!     col("num").sum().over(&w)?.alias("letter_sum"),
//! ])?;
//!
//! assert_eq!(out.row(0).unwrap(), row!["a", 3, 3, 6]);
//! assert_eq!(out.row(1).unwrap(), row!["b", 1, 1, 1]);
//! # Ok::<(), partwin::Error>(())
//! ```
//!
//! ## Modules
//!
//! - [`api`] - Window builder ([`api::Window`], [`api::col`], [`api::row_number`])
//! - [`core`] - Core types ([`DataType`], [`Value`], [`Row`], [`Table`], [`Error`])
//! - [`functions`] - Ranking and aggregate window functions
//! - [`executor`] - Partitioning, ordering and parallel evaluation

pub mod api;
pub mod core;
pub mod executor;
pub mod functions;

// Re-export main types for convenience
pub use core::{
    Column, DataType, Error, Result, Row, Schema, SchemaColumn, SortDirection, Table, Value,
};

// Re-export function types
pub use functions::{
    AggregateFunction, CountFunction, DenseRankFunction, FunctionInfo, FunctionType,
    MaxFunction, MeanFunction, MinFunction, RankFunction, RankingFunction, RowNumberFunction,
    SumFunction, WindowFunction,
};

// Re-export executor types
pub use executor::{
    CancellationHandle, ExecutionContext, ExecutionContextBuilder, OrderByColumn, OrderSpec,
    ParallelConfig, WindowExecutor, WindowSpec,
};

// Re-export API types
pub use api::{col, dense_rank, rank, row_number, ColumnRef, Window, WindowExpr};
