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

//! Error types for partwin
//!
//! This module defines all error types produced while building tables,
//! describing windows and evaluating window functions.

use thiserror::Error;

use super::types::DataType;

/// Result type alias for partwin operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for window evaluation
///
/// Caller mistakes (configuration, unresolved columns, type mismatches) are
/// reported before any partitioning work starts. `InternalInvariantViolation`
/// signals a defect in the engine itself and is never recoverable.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    // =========================================================================
    // Window specification errors
    // =========================================================================
    /// Invalid window specification (e.g. ORDER BY columns/directions mismatch)
    #[error("configuration error: {0}")]
    Configuration(String),

    /// Column reference does not exist in the table schema
    #[error("column '{0}' not found")]
    UnresolvedColumn(String),

    /// Function applied to a column whose type does not support it
    #[error("type mismatch: {function} is not supported for column '{column}' of type {data_type}")]
    TypeMismatch {
        function: String,
        column: String,
        data_type: DataType,
    },

    // =========================================================================
    // Table construction errors
    // =========================================================================
    /// Two columns share the same name
    #[error("duplicate column '{0}'")]
    DuplicateColumn(String),

    /// A column's length differs from the table's row count
    #[error("column '{column}' has {got} values, expected {expected}")]
    ColumnLengthMismatch {
        column: String,
        expected: usize,
        got: usize,
    },

    /// A row has a different number of values than the table has columns
    #[error("row has {got} values, expected {expected}")]
    RowArityMismatch { expected: usize, got: usize },

    // =========================================================================
    // Evaluation errors
    // =========================================================================
    /// Integer aggregate result does not fit in 64 bits
    #[error("numeric overflow computing {0}")]
    NumericOverflow(String),

    /// Evaluation was cancelled between partitions
    #[error("query cancelled")]
    QueryCancelled,

    /// Internal error for unexpected runtime conditions (thread pool setup etc.)
    #[error("{0}")]
    Internal(String),

    /// Engine invariant broken: a row was dropped or produced twice.
    /// Indicates a partitioner or sorter bug, not a user error.
    #[error("internal invariant violation: {0}")]
    InternalInvariantViolation(String),
}

impl Error {
    /// Create a new Configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Error::Configuration(message.into())
    }

    /// Create a new UnresolvedColumn error
    pub fn unresolved_column(column: impl Into<String>) -> Self {
        Error::UnresolvedColumn(column.into())
    }

    /// Create a new TypeMismatch error
    pub fn type_mismatch(
        function: impl Into<String>,
        column: impl Into<String>,
        data_type: DataType,
    ) -> Self {
        Error::TypeMismatch {
            function: function.into(),
            column: column.into(),
            data_type,
        }
    }

    /// Create a new ColumnLengthMismatch error
    pub fn column_length_mismatch(column: impl Into<String>, expected: usize, got: usize) -> Self {
        Error::ColumnLengthMismatch {
            column: column.into(),
            expected,
            got,
        }
    }

    /// Create a new Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Error::Internal(message.into())
    }

    /// Create a new InternalInvariantViolation error
    pub fn invariant_violation(message: impl Into<String>) -> Self {
        Error::InternalInvariantViolation(message.into())
    }

    /// Check if this is a "not found" type error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::UnresolvedColumn(_))
    }

    /// Check if this error was caused by the caller's input
    pub fn is_user_error(&self) -> bool {
        matches!(
            self,
            Error::Configuration(_)
                | Error::UnresolvedColumn(_)
                | Error::TypeMismatch { .. }
                | Error::DuplicateColumn(_)
                | Error::ColumnLengthMismatch { .. }
                | Error::RowArityMismatch { .. }
        )
    }

    /// Check if this error indicates an engine defect that must abort evaluation
    pub fn is_fatal(&self) -> bool {
        matches!(self, Error::InternalInvariantViolation(_))
    }
}
