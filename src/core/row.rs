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

//! Row type - a collection of values used for row-wise table construction
//!
//! The window engine never carries rows around: a row is identified by its
//! position in the table and its values are looked up column by column.
//! `Row` exists so callers can build a [`Table`](super::Table) from record-shaped
//! data and read a row back out for display or assertions.

use std::fmt;
use std::ops::{Deref, Index};

use super::value::Value;

/// An ordered collection of column values
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Row {
    values: Vec<Value>,
}

impl Row {
    /// Create a new empty row
    #[inline]
    pub fn new() -> Self {
        Self { values: Vec::new() }
    }

    /// Create a row from a vector of values
    #[inline]
    pub fn from_values(values: Vec<Value>) -> Self {
        Self { values }
    }

    /// Get the number of values in the row
    #[inline]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Check if the row is empty
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Get a value by column index
    #[inline]
    pub fn get(&self, index: usize) -> Option<&Value> {
        self.values.get(index)
    }

    /// Append a value
    pub fn push(&mut self, value: Value) {
        self.values.push(value);
    }

    /// Consume the row and return its values
    pub fn into_values(self) -> Vec<Value> {
        self.values
    }
}

impl Deref for Row {
    type Target = [Value];

    fn deref(&self) -> &Self::Target {
        &self.values
    }
}

impl Index<usize> for Row {
    type Output = Value;

    fn index(&self, index: usize) -> &Self::Output {
        &self.values[index]
    }
}

impl From<Vec<Value>> for Row {
    fn from(values: Vec<Value>) -> Self {
        Self::from_values(values)
    }
}

impl FromIterator<Value> for Row {
    fn from_iter<I: IntoIterator<Item = Value>>(iter: I) -> Self {
        Self::from_values(iter.into_iter().collect())
    }
}

impl fmt::Display for Row {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(")?;
        for (i, value) in self.values.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", value)?;
        }
        write!(f, ")")
    }
}

/// Build a [`Row`] from heterogeneous literals: `row!["A", 1, 2.5]`
#[macro_export]
macro_rules! row {
    ($($value:expr),* $(,)?) => {
        $crate::core::Row::from_values(vec![$($crate::core::Value::from($value)),*])
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_basics() {
        let mut row = Row::new();
        assert!(row.is_empty());
        row.push(Value::integer(1));
        row.push(Value::text("a"));
        assert_eq!(row.len(), 2);
        assert_eq!(row[0], Value::integer(1));
        assert_eq!(row.get(1), Some(&Value::text("a")));
        assert_eq!(row.get(2), None);
    }

    #[test]
    fn test_row_macro_and_display() {
        let row = crate::row!["A", 1, 2.5, true, None::<i64>];
        assert_eq!(row.len(), 5);
        assert_eq!(row.to_string(), "(A, 1, 2.5, true, NULL)");
        assert_eq!(row.into_values()[1], Value::integer(1));
    }
}
