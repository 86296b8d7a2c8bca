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

//! Schema types - column definitions for in-memory tables

use std::fmt;

use rustc_hash::FxHashMap;

use super::error::{Error, Result};
use super::types::DataType;

/// A column definition in a table schema
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaColumn {
    /// Column position (0-based)
    pub id: usize,

    /// Column name
    pub name: String,

    /// Data type of the column
    pub data_type: DataType,

    /// Whether the column contains NULL values
    pub nullable: bool,
}

impl SchemaColumn {
    /// Create a new column definition
    pub fn new(id: usize, name: impl Into<String>, data_type: DataType, nullable: bool) -> Self {
        Self {
            id,
            name: name.into(),
            data_type,
            nullable,
        }
    }
}

impl fmt::Display for SchemaColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.name, self.data_type)?;
        if !self.nullable {
            write!(f, " NOT NULL")?;
        }
        Ok(())
    }
}

/// Table schema definition
///
/// Column lookup is by exact name; names are unique within a schema.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Schema {
    columns: Vec<SchemaColumn>,
    column_index_map: FxHashMap<String, usize>,
}

impl Schema {
    /// Create a schema, rejecting duplicate column names
    pub fn new(columns: Vec<SchemaColumn>) -> Result<Self> {
        let mut column_index_map =
            FxHashMap::with_capacity_and_hasher(columns.len(), Default::default());
        for (i, col) in columns.iter().enumerate() {
            if column_index_map.insert(col.name.clone(), i).is_some() {
                return Err(Error::DuplicateColumn(col.name.clone()));
            }
        }
        Ok(Self {
            columns,
            column_index_map,
        })
    }

    /// Get the number of columns
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Check if the schema has any columns
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// All column definitions in order
    pub fn columns(&self) -> &[SchemaColumn] {
        &self.columns
    }

    /// Get a column by index
    pub fn get_column(&self, index: usize) -> Option<&SchemaColumn> {
        self.columns.get(index)
    }

    /// Get the column index by name
    #[inline]
    pub fn get_column_index(&self, name: &str) -> Option<usize> {
        self.column_index_map.get(name).copied()
    }

    /// Get a column by name
    pub fn get_column_by_name(&self, name: &str) -> Option<&SchemaColumn> {
        self.get_column_index(name).map(|idx| &self.columns[idx])
    }

    /// Resolve a column name to its index, failing with `UnresolvedColumn`
    pub fn resolve(&self, name: &str) -> Result<usize> {
        self.get_column_index(name)
            .ok_or_else(|| Error::unresolved_column(name))
    }

    /// Check if a column exists by name
    pub fn has_column(&self, name: &str) -> bool {
        self.column_index_map.contains_key(name)
    }

    /// Get all column names
    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    /// Append a column definition
    pub fn add_column(
        &mut self,
        name: impl Into<String>,
        data_type: DataType,
        nullable: bool,
    ) -> Result<()> {
        let name = name.into();
        if self.has_column(&name) {
            return Err(Error::DuplicateColumn(name));
        }
        let id = self.columns.len();
        self.column_index_map.insert(name.clone(), id);
        self.columns
            .push(SchemaColumn::new(id, name, data_type, nullable));
        Ok(())
    }
}

impl fmt::Display for Schema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(")?;
        for (i, col) in self.columns.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", col)?;
        }
        write!(f, ")")
    }
}
