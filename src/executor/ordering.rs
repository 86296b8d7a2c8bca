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

//! Ordering - ORDER BY comparison and per-partition sorting

use std::cmp::Ordering;
use std::fmt;

use smallvec::SmallVec;

use crate::core::{Column, Error, Result, SortDirection, Table};

use super::partition::Partition;

/// One ORDER BY key
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct OrderByColumn {
    pub column: String,
    pub direction: SortDirection,
}

impl OrderByColumn {
    pub fn new(column: impl Into<String>, direction: SortDirection) -> Self {
        Self {
            column: column.into(),
            direction,
        }
    }

    /// Ascending key
    pub fn asc(column: impl Into<String>) -> Self {
        Self::new(column, SortDirection::Ascending)
    }

    /// Descending key
    pub fn desc(column: impl Into<String>) -> Self {
        Self::new(column, SortDirection::Descending)
    }
}

impl fmt::Display for OrderByColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.column, self.direction)
    }
}

/// Ordered list of ORDER BY keys; the first key is most significant
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct OrderSpec {
    columns: Vec<OrderByColumn>,
}

impl OrderSpec {
    pub fn new(columns: Vec<OrderByColumn>) -> Self {
        Self { columns }
    }

    /// An empty ORDER BY
    pub fn empty() -> Self {
        Self::default()
    }

    /// Pair column names with per-column descending flags
    ///
    /// The two lists must have the same length.
    pub fn from_columns<S: AsRef<str>>(columns: &[S], descending: &[bool]) -> Result<Self> {
        if columns.len() != descending.len() {
            return Err(Error::configuration(format!(
                "{} order by columns but {} sort directions",
                columns.len(),
                descending.len()
            )));
        }
        Ok(columns
            .iter()
            .zip(descending)
            .map(|(col, &desc)| OrderByColumn::new(col.as_ref(), SortDirection::from_desc(desc)))
            .collect())
    }

    pub fn columns(&self) -> &[OrderByColumn] {
        &self.columns
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, OrderByColumn> {
        self.columns.iter()
    }
}

impl FromIterator<OrderByColumn> for OrderSpec {
    fn from_iter<I: IntoIterator<Item = OrderByColumn>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl fmt::Display for OrderSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, col) in self.columns.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", col)?;
        }
        Ok(())
    }
}

/// Compares rows by ORDER BY keys, breaking ties on original position
///
/// Per key, NULLs sort after every non-NULL value under both ASC and DESC.
/// Non-NULL values use the total [`Value`](crate::core::Value) ordering,
/// reversed for DESC. Because the final tie-break is the row index, two
/// distinct rows never compare equal under [`compare`](Self::compare).
#[derive(Debug, Clone)]
pub struct RowComparator<'a> {
    keys: SmallVec<[(&'a Column, SortDirection); 4]>,
}

impl<'a> RowComparator<'a> {
    /// Resolve the ORDER BY columns against the table
    pub fn new(table: &'a Table, order_by: &OrderSpec) -> Result<Self> {
        let keys = order_by
            .iter()
            .map(|key| table.column(&key.column).map(|col| (col, key.direction)))
            .collect::<Result<SmallVec<_>>>()?;
        Ok(Self { keys })
    }

    /// Compare two rows on the ORDER BY keys only
    pub fn compare_keys(&self, a: usize, b: usize) -> Ordering {
        for (column, direction) in &self.keys {
            let values = column.values();
            let (va, vb) = (&values[a], &values[b]);
            let ord = match (va.is_null(), vb.is_null()) {
                (true, true) => Ordering::Equal,
                (true, false) => Ordering::Greater,
                (false, true) => Ordering::Less,
                (false, false) => {
                    let ord = va.cmp(vb);
                    if direction.is_descending() {
                        ord.reverse()
                    } else {
                        ord
                    }
                }
            };
            if ord != Ordering::Equal {
                return ord;
            }
        }
        Ordering::Equal
    }

    /// Compare two rows: ORDER BY keys, then ascending original position
    #[inline]
    pub fn compare(&self, a: usize, b: usize) -> Ordering {
        self.compare_keys(a, b).then_with(|| a.cmp(&b))
    }

    /// True when the rows tie on every ORDER BY key
    #[inline]
    pub fn is_peer(&self, a: usize, b: usize) -> bool {
        self.compare_keys(a, b) == Ordering::Equal
    }

    /// Number of ORDER BY keys
    pub fn key_len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

/// Return the partition's rows in window order
///
/// The partition is left untouched. `sort_unstable_by` is safe here since
/// the comparator never reports two distinct rows as equal.
pub fn sort_partition(partition: &Partition, comparator: &RowComparator<'_>) -> Vec<usize> {
    let mut rows = partition.rows.clone();
    // Rows are already ascending, which is the order of an empty ORDER BY
    if !comparator.is_empty() {
        rows.sort_unstable_by(|&a, &b| comparator.compare(a, b));
    }
    rows
}
