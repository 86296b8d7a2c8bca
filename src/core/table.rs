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

//! In-memory columnar table
//!
//! The window engine consumes a materialized [`Table`]: a row count plus
//! named [`Column`]s whose values are aligned by row index. Columns are
//! reference counted so appending window output columns never copies the
//! source data.

use std::sync::Arc;

use super::error::{Error, Result};
use super::row::Row;
use super::schema::{Schema, SchemaColumn};
use super::types::DataType;
use super::value::Value;

/// A named column of values aligned with row index
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    name: String,
    data_type: DataType,
    values: Arc<[Value]>,
}

impl Column {
    /// Create a column, inferring its data type from the non-null values
    pub fn new(name: impl Into<String>, values: Vec<Value>) -> Self {
        let data_type = infer_data_type(&values);
        Self {
            name: name.into(),
            data_type,
            values: Arc::from(values),
        }
    }

    /// Create a column with an explicit data type
    pub fn with_type(name: impl Into<String>, data_type: DataType, values: Vec<Value>) -> Self {
        Self {
            name: name.into(),
            data_type,
            values: Arc::from(values),
        }
    }

    /// Create a column from anything convertible into values
    pub fn from_values<I, V>(name: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        Self::new(name, values.into_iter().map(Into::into).collect())
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn data_type(&self) -> DataType {
        self.data_type
    }

    /// All values, indexed by row
    #[inline]
    pub fn values(&self) -> &[Value] {
        &self.values
    }

    /// Value at a row index
    #[inline]
    pub fn get(&self, row: usize) -> Option<&Value> {
        self.values.get(row)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Whether any value is NULL
    pub fn has_nulls(&self) -> bool {
        self.values.iter().any(Value::is_null)
    }

    /// Same values under a different name
    pub fn renamed(&self, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            data_type: self.data_type,
            values: Arc::clone(&self.values),
        }
    }
}

/// Infer a column type by unifying the types of its non-null values
fn infer_data_type(values: &[Value]) -> DataType {
    values
        .iter()
        .filter(|v| !v.is_null())
        .fold(DataType::Null, |acc, v| acc.unify(v.data_type()))
}

/// A materialized table: equal-length named columns
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    schema: Schema,
    columns: Vec<Column>,
    row_count: usize,
}

impl Table {
    /// Create a table from columns
    ///
    /// All columns must have the same length and distinct names.
    pub fn new(columns: Vec<Column>) -> Result<Self> {
        let row_count = columns.first().map(Column::len).unwrap_or(0);
        for col in &columns {
            if col.len() != row_count {
                return Err(Error::column_length_mismatch(
                    col.name(),
                    row_count,
                    col.len(),
                ));
            }
        }

        let schema = Schema::new(
            columns
                .iter()
                .enumerate()
                .map(|(i, c)| SchemaColumn::new(i, c.name(), c.data_type(), c.has_nulls()))
                .collect(),
        )?;

        Ok(Self {
            schema,
            columns,
            row_count,
        })
    }

    /// Create an empty table with no columns and no rows
    pub fn empty() -> Self {
        Self {
            schema: Schema::default(),
            columns: Vec::new(),
            row_count: 0,
        }
    }

    /// Create a table from record-shaped rows
    ///
    /// Every row must have exactly one value per column name, so rows
    /// without column names are rejected.
    pub fn from_rows<S: AsRef<str>>(column_names: &[S], rows: Vec<Row>) -> Result<Self> {
        let width = column_names.len();
        if width == 0 {
            if let Some(row) = rows.first() {
                return Err(Error::RowArityMismatch {
                    expected: 0,
                    got: row.len(),
                });
            }
        }
        let mut column_values: Vec<Vec<Value>> =
            (0..width).map(|_| Vec::with_capacity(rows.len())).collect();

        for row in rows {
            if row.len() != width {
                return Err(Error::RowArityMismatch {
                    expected: width,
                    got: row.len(),
                });
            }
            for (values, value) in column_values.iter_mut().zip(row.into_values()) {
                values.push(value);
            }
        }

        let columns = column_names
            .iter()
            .zip(column_values)
            .map(|(name, values)| Column::new(name.as_ref(), values))
            .collect();
        Self::new(columns)
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// Number of rows
    #[inline]
    pub fn row_count(&self) -> usize {
        self.row_count
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.schema.column_names()
    }

    /// Look up a column by name, failing with `UnresolvedColumn`
    pub fn column(&self, name: &str) -> Result<&Column> {
        let idx = self.schema.resolve(name)?;
        Ok(&self.columns[idx])
    }

    /// Column at a schema position
    pub fn column_at(&self, index: usize) -> Option<&Column> {
        self.columns.get(index)
    }

    /// Read one row back out (for display and assertions)
    pub fn row(&self, index: usize) -> Option<Row> {
        if index >= self.row_count {
            return None;
        }
        Some(
            self.columns
                .iter()
                .map(|c| c.values()[index].clone())
                .collect(),
        )
    }

    /// Return a new table with `column` added
    ///
    /// A column with the same name is replaced in place; otherwise the
    /// column is appended.
    pub fn with_column(&self, column: Column) -> Result<Self> {
        if !self.columns.is_empty() && column.len() != self.row_count {
            return Err(Error::column_length_mismatch(
                column.name(),
                self.row_count,
                column.len(),
            ));
        }
        let mut columns = self.columns.clone();
        match self.schema.get_column_index(column.name()) {
            Some(idx) => columns[idx] = column,
            None => columns.push(column),
        }
        Self::new(columns)
    }

    /// Return a new table holding only the named columns, in the given order
    pub fn select<S: AsRef<str>>(&self, names: &[S]) -> Result<Self> {
        let columns = names
            .iter()
            .map(|n| self.column(n.as_ref()).cloned())
            .collect::<Result<Vec<_>>>()?;
        Self::new(columns)
    }
}
