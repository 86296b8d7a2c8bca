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

//! Public window API
//!
//! A dataframe-style surface over the window engine: build a [`Window`],
//! bind a function to it with [`WindowFunction::over`], and add the results
//! to a table with [`Table::with_window_columns`](crate::core::Table::with_window_columns).
//!
//! ```
//! use partwin::api::{col, rank, Window};
//! use partwin::{row, Table};
//!
//! let table = Table::from_rows(
//!     &["category", "group", "value"],
//!     vec![row!["A", 1, 15], row!["A", 1, 25], row!["A", 2, 35], row!["B", 1, 55]],
//! )?;
//!
//! let w = Window::new().partition_by(("category", "group"));
//! let out = table.with_window_columns(&[
//!     col("value").mean().over(&w)?.alias("avg"),
//!     rank().over(&w.clone().order_by("value", true)?)?,
//! ])?;
//! assert_eq!(out.column("avg")?.values()[0], partwin::Value::float(20.0));
//! # Ok::<(), partwin::Error>(())
//! ```
//!
//! [`WindowFunction::over`]: crate::functions::WindowFunction::over

mod params;
mod window;

pub use params::{IntoColumns, IntoDirections, ToColumnName};
pub use window::{col, dense_rank, rank, row_number, ColumnRef, Window, WindowExpr};
