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

//! Window Function System
//!
//! This module provides the functions that can be evaluated over a window:
//!
//! - [`WindowFunction`] - Closed set of supported functions bound to their input column
//! - [`RankingFunction`] - Rank assigners over a sorted partition (ROW_NUMBER, RANK, DENSE_RANK)
//! - [`AggregateFunction`] - Whole-partition reductions (SUM, AVG, MIN, MAX, COUNT)
//!
//! Adding a function means adding a [`WindowFunction`] variant; every match
//! over it is exhaustive, so the compiler points at each dispatch site.

pub mod aggregate;
pub mod window;

use std::fmt;

use crate::core::{DataType, Error, Result, Value};

/// Function type classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FunctionType {
    /// Ranking function (assigns positions along the window order)
    Ranking,
    /// Aggregate function (one value for the whole partition)
    Aggregate,
}

/// Function information
#[derive(Debug, Clone)]
pub struct FunctionInfo {
    /// Function name
    pub name: String,
    /// Function type
    pub function_type: FunctionType,
    /// Description
    pub description: String,
}

impl FunctionInfo {
    /// Create a new function info
    pub fn new(
        name: impl Into<String>,
        function_type: FunctionType,
        description: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            function_type,
            description: description.into(),
        }
    }

    /// Get the function name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the function type
    pub fn function_type(&self) -> FunctionType {
        self.function_type
    }

    /// Get the description
    pub fn description(&self) -> &str {
        &self.description
    }
}

/// A window function bound to its input column
///
/// Ranking variants take no input column and require a non-empty ORDER BY.
/// Aggregate variants reduce the whole partition; they accept an ORDER BY
/// but ignore it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum WindowFunction {
    /// ROW_NUMBER()
    RowNumber,
    /// RANK()
    Rank,
    /// DENSE_RANK()
    DenseRank,
    /// SUM(column)
    Sum(String),
    /// AVG(column)
    Mean(String),
    /// MIN(column)
    Min(String),
    /// MAX(column)
    Max(String),
    /// COUNT(column)
    Count(String),
}

impl WindowFunction {
    /// SQL name of the function
    pub fn name(&self) -> &'static str {
        match self {
            WindowFunction::RowNumber => "ROW_NUMBER",
            WindowFunction::Rank => "RANK",
            WindowFunction::DenseRank => "DENSE_RANK",
            WindowFunction::Sum(_) => "SUM",
            WindowFunction::Mean(_) => "AVG",
            WindowFunction::Min(_) => "MIN",
            WindowFunction::Max(_) => "MAX",
            WindowFunction::Count(_) => "COUNT",
        }
    }

    pub fn function_type(&self) -> FunctionType {
        match self {
            WindowFunction::RowNumber | WindowFunction::Rank | WindowFunction::DenseRank => {
                FunctionType::Ranking
            }
            WindowFunction::Sum(_)
            | WindowFunction::Mean(_)
            | WindowFunction::Min(_)
            | WindowFunction::Max(_)
            | WindowFunction::Count(_) => FunctionType::Aggregate,
        }
    }

    /// The column an aggregate reads, `None` for ranking functions
    pub fn target_column(&self) -> Option<&str> {
        match self {
            WindowFunction::RowNumber | WindowFunction::Rank | WindowFunction::DenseRank => None,
            WindowFunction::Sum(c)
            | WindowFunction::Mean(c)
            | WindowFunction::Min(c)
            | WindowFunction::Max(c)
            | WindowFunction::Count(c) => Some(c),
        }
    }

    /// Whether the function needs a non-empty ORDER BY
    pub fn requires_order_by(&self) -> bool {
        self.function_type() == FunctionType::Ranking
    }

    /// Output column name used when the expression has no alias
    pub fn default_output_name(&self) -> String {
        match self.target_column() {
            Some(column) => column.to_string(),
            None => self.name().to_lowercase(),
        }
    }

    /// Check that the input column type supports this function
    pub fn validate_input_type(&self, column: &str, data_type: DataType) -> Result<()> {
        let supported = match self {
            WindowFunction::Sum(_) | WindowFunction::Mean(_) => {
                data_type.is_numeric() || data_type == DataType::Null
            }
            WindowFunction::RowNumber
            | WindowFunction::Rank
            | WindowFunction::DenseRank
            | WindowFunction::Min(_)
            | WindowFunction::Max(_)
            | WindowFunction::Count(_) => true,
        };
        if supported {
            Ok(())
        } else {
            Err(Error::type_mismatch(self.name(), column, data_type))
        }
    }

    /// Data type of the output column given the input column type
    pub fn output_type(&self, input: DataType) -> DataType {
        match self {
            WindowFunction::RowNumber
            | WindowFunction::Rank
            | WindowFunction::DenseRank
            | WindowFunction::Count(_) => DataType::Integer,
            WindowFunction::Mean(_) => DataType::Float,
            WindowFunction::Sum(_) | WindowFunction::Min(_) | WindowFunction::Max(_) => input,
        }
    }
}

impl fmt::Display for WindowFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.target_column() {
            Some(column) => write!(f, "{}({})", self.name(), column),
            None => write!(f, "{}()", self.name()),
        }
    }
}

/// Trait for aggregate functions
///
/// One instance reduces one partition: `accumulate` is called once per row
/// (in ascending row order), then `result` produces the value broadcast to
/// every row of the partition.
pub trait AggregateFunction: Send + Sync {
    /// Get the function name
    fn name(&self) -> &str;

    /// Get function information
    fn info(&self) -> FunctionInfo;

    /// Accumulate a value into the aggregate
    fn accumulate(&mut self, value: &Value);

    /// Get the final result
    fn result(&self) -> Result<Value>;

    /// Create a fresh accumulator of the same kind
    fn clone_box(&self) -> Box<dyn AggregateFunction>;
}

/// Trait for rank assigners
///
/// A ranking function maps a partition already sorted in window order to one
/// rank per position. It never sorts; ties on the ORDER BY keys are reported
/// through `is_peer`.
pub trait RankingFunction: Send + Sync {
    /// Get the function name
    fn name(&self) -> &str;

    /// Get function information
    fn info(&self) -> FunctionInfo;

    /// Assign ranks to `sorted` (row indices in window order)
    ///
    /// `is_peer(a, b)` returns true when rows `a` and `b` compare equal on
    /// every ORDER BY key. The returned vector is parallel to `sorted`.
    fn assign(&self, sorted: &[usize], is_peer: &dyn Fn(usize, usize) -> bool) -> Vec<i64>;
}

// Re-export main types
pub use aggregate::{CountFunction, MaxFunction, MeanFunction, MinFunction, SumFunction};
pub use window::{DenseRankFunction, RankFunction, RowNumberFunction};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_function_classification() {
        assert_eq!(WindowFunction::RowNumber.function_type(), FunctionType::Ranking);
        assert_eq!(
            WindowFunction::Sum("v".into()).function_type(),
            FunctionType::Aggregate
        );
        assert!(WindowFunction::Rank.requires_order_by());
        assert!(!WindowFunction::Max("v".into()).requires_order_by());
        assert_eq!(WindowFunction::DenseRank.target_column(), None);
        assert_eq!(WindowFunction::Mean("v".into()).target_column(), Some("v"));
    }

    #[test]
    fn test_default_output_name() {
        assert_eq!(WindowFunction::RowNumber.default_output_name(), "row_number");
        assert_eq!(WindowFunction::DenseRank.default_output_name(), "dense_rank");
        assert_eq!(
            WindowFunction::Sum("sales".into()).default_output_name(),
            "sales"
        );
    }

    #[test]
    fn test_validate_input_type() {
        let sum = WindowFunction::Sum("name".into());
        assert!(sum.validate_input_type("name", DataType::Integer).is_ok());
        assert!(sum.validate_input_type("name", DataType::Float).is_ok());
        assert!(sum.validate_input_type("name", DataType::Null).is_ok());
        assert_eq!(
            sum.validate_input_type("name", DataType::Text),
            Err(Error::type_mismatch("SUM", "name", DataType::Text))
        );
        assert!(WindowFunction::Mean("b".into())
            .validate_input_type("b", DataType::Boolean)
            .is_err());
        assert!(WindowFunction::Mean("m".into())
            .validate_input_type("m", DataType::Mixed)
            .is_err());

        // MIN/MAX/COUNT work on any orderable domain
        assert!(WindowFunction::Min("name".into())
            .validate_input_type("name", DataType::Text)
            .is_ok());
        assert!(WindowFunction::Count("m".into())
            .validate_input_type("m", DataType::Mixed)
            .is_ok());
    }

    #[test]
    fn test_output_type() {
        assert_eq!(
            WindowFunction::RowNumber.output_type(DataType::Null),
            DataType::Integer
        );
        assert_eq!(
            WindowFunction::Mean("v".into()).output_type(DataType::Integer),
            DataType::Float
        );
        assert_eq!(
            WindowFunction::Sum("v".into()).output_type(DataType::Integer),
            DataType::Integer
        );
        assert_eq!(
            WindowFunction::Max("v".into()).output_type(DataType::Text),
            DataType::Text
        );
    }

    #[test]
    fn test_display() {
        assert_eq!(WindowFunction::RowNumber.to_string(), "ROW_NUMBER()");
        assert_eq!(WindowFunction::Mean("value".into()).to_string(), "AVG(value)");
    }
}
