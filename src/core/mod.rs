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

//! Core types and definitions for partwin
//!
//! This module contains the fundamental types used throughout the engine:
//!
//! - [`DataType`] - Column data types (INTEGER, TEXT, FLOAT, etc.)
//! - [`SortDirection`] - ORDER BY direction
//! - [`Value`] - Runtime values with type information, equality and total ordering
//! - [`Row`] - A record of values, used for row-wise table construction
//! - [`Column`] / [`Table`] - The materialized table window functions run over
//! - [`Schema`] - Table schema definition
//! - [`Error`] - Error types for all operations

pub mod error;
pub mod row;
pub mod schema;
pub mod table;
pub mod types;
pub mod value;

// Re-export main types for convenience
pub use error::{Error, Result};
pub use row::Row;
pub use schema::{Schema, SchemaColumn};
pub use table::{Column, Table};
pub use types::{DataType, SortDirection};
pub use value::Value;

#[cfg(test)]
mod integration_tests {
    use super::*;

    /// Rows built record-wise come back out unchanged
    #[test]
    fn test_table_row_round_trip() {
        let rows = vec![
            crate::row!["A", 100],
            crate::row!["B", None::<i64>],
            crate::row!["A", 50],
        ];
        let table = Table::from_rows(&["category", "sales"], rows.clone()).unwrap();

        for (i, row) in rows.iter().enumerate() {
            assert_eq!(&table.row(i).unwrap(), row);
        }
        assert_eq!(
            table.schema().get_column_by_name("sales").unwrap().data_type,
            DataType::Integer
        );
    }

    /// Value equality and ordering agree on every pair that compares equal
    #[test]
    fn test_value_eq_consistent_with_ord() {
        let values = vec![
            Value::integer(1),
            Value::float(1.0),
            Value::float(f64::NAN),
            Value::float(-0.0),
            Value::integer(0),
            Value::text("a"),
            Value::boolean(true),
            Value::null(DataType::Integer),
            Value::null_unknown(),
        ];
        for a in &values {
            for b in &values {
                assert_eq!(
                    a == b,
                    a.cmp(b) == std::cmp::Ordering::Equal,
                    "{:?} vs {:?}",
                    a,
                    b
                );
            }
        }
    }
}
