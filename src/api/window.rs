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

//! Window builder API
//!
//! Describe a window, bind a function to a column, and apply it:
//!
//! ```
//! use partwin::api::{col, row_number, Window};
//! use partwin::{Column, Table};
//!
//! let table = Table::new(vec![
//!     Column::from_values("category", ["A", "B", "A"]),
//!     Column::from_values("sales", [100i64, 50, 200]),
//! ])?;
//!
//! let by_category = Window::new().partition_by("category");
//! let ranked = by_category.clone().order_by("sales", true)?;
//!
//! let out = table.with_window_columns(&[
//!     row_number().over(&ranked)?.alias("rn"),
//!     col("sales").sum().over(&by_category)?.alias("total"),
//! ])?;
//! assert_eq!(out.column_names(), vec!["category", "sales", "rn", "total"]);
//! # Ok::<(), partwin::Error>(())
//! ```

use std::fmt;

use crate::core::{Column, Error, Result, Table};
use crate::executor::{ExecutionContext, OrderSpec, WindowExecutor, WindowSpec};
use crate::functions::WindowFunction;

use super::params::{IntoColumns, IntoDirections};

/// Window definition builder: PARTITION BY and ORDER BY
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Window {
    spec: WindowSpec,
}

impl Window {
    /// A window over the whole table with no ordering
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the PARTITION BY columns
    pub fn partition_by(mut self, columns: impl IntoColumns) -> Self {
        self.spec.partition_by = columns.into_columns();
        self
    }

    /// Set the ORDER BY columns
    ///
    /// `descending` is a single flag for every column or one flag per
    /// column; a list of the wrong length is a configuration error.
    pub fn order_by(
        mut self,
        columns: impl IntoColumns,
        descending: impl IntoDirections,
    ) -> Result<Self> {
        let columns = columns.into_columns();
        let descending = descending.into_directions(columns.len());
        self.spec.order_by = OrderSpec::from_columns(&columns, &descending)?;
        Ok(self)
    }

    pub fn spec(&self) -> &WindowSpec {
        &self.spec
    }

    pub fn into_spec(self) -> WindowSpec {
        self.spec
    }
}

impl From<Window> for WindowSpec {
    fn from(window: Window) -> Self {
        window.spec
    }
}

/// Reference to an input column, used to build aggregate functions
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ColumnRef {
    name: String,
}

/// Refer to a column by name
pub fn col(name: impl Into<String>) -> ColumnRef {
    ColumnRef { name: name.into() }
}

impl ColumnRef {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// SUM of the column over the window
    pub fn sum(&self) -> WindowFunction {
        WindowFunction::Sum(self.name.clone())
    }

    /// Arithmetic mean of the column over the window
    pub fn mean(&self) -> WindowFunction {
        WindowFunction::Mean(self.name.clone())
    }

    pub fn min(&self) -> WindowFunction {
        WindowFunction::Min(self.name.clone())
    }

    pub fn max(&self) -> WindowFunction {
        WindowFunction::Max(self.name.clone())
    }

    /// Number of non-NULL values over the window
    pub fn count(&self) -> WindowFunction {
        WindowFunction::Count(self.name.clone())
    }
}

/// ROW_NUMBER()
pub fn row_number() -> WindowFunction {
    WindowFunction::RowNumber
}

/// RANK()
pub fn rank() -> WindowFunction {
    WindowFunction::Rank
}

/// DENSE_RANK()
pub fn dense_rank() -> WindowFunction {
    WindowFunction::DenseRank
}

impl WindowFunction {
    /// Apply the function over a window
    ///
    /// Ranking functions need the window to have an ORDER BY.
    pub fn over(self, window: &Window) -> Result<WindowExpr> {
        WindowExpr::new(self, window.spec().clone())
    }
}

/// A window function applied over a window, producing a named column
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowExpr {
    function: WindowFunction,
    spec: WindowSpec,
    name: String,
}

impl WindowExpr {
    /// Bind `function` to `spec`, named by the default rule
    pub fn new(function: WindowFunction, spec: WindowSpec) -> Result<Self> {
        if function.requires_order_by() && spec.order_by.is_empty() {
            return Err(Error::configuration(format!(
                "{} requires an ORDER BY clause",
                function.name()
            )));
        }
        let name = function.default_output_name();
        Ok(Self {
            function,
            spec,
            name,
        })
    }

    /// Name the output column
    pub fn alias(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn function(&self) -> &WindowFunction {
        &self.function
    }

    pub fn spec(&self) -> &WindowSpec {
        &self.spec
    }

    /// Name of the output column
    pub fn output_name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for WindowExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} OVER ({}) AS {}", self.function, self.spec, self.name)
    }
}

impl Table {
    /// Evaluate window expressions and add one column per expression
    ///
    /// Uses a default [`ExecutionContext`].
    pub fn with_window_columns(&self, exprs: &[WindowExpr]) -> Result<Table> {
        self.with_window_columns_ctx(exprs, &ExecutionContext::new())
    }

    /// Like [`with_window_columns`](Self::with_window_columns) under an
    /// explicit context (parallelism, cancellation)
    pub fn with_window_columns_ctx(
        &self,
        exprs: &[WindowExpr],
        ctx: &ExecutionContext,
    ) -> Result<Table> {
        WindowExecutor::new(ctx.clone()).execute_all(self, exprs)
    }

    /// Evaluate a single window expression into a column
    pub fn window_column(&self, expr: &WindowExpr) -> Result<Column> {
        WindowExecutor::default().execute_expr(self, expr)
    }
}
