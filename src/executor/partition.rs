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

//! Partitioning - grouping rows by their PARTITION BY key
//!
//! Partitions are listed in discovery order (the order in which each key
//! first appears in the table) and every partition lists its rows in
//! ascending original position. Both the sequential and the chunked parallel
//! build produce exactly this layout, so downstream results never depend on
//! which one ran.

use rayon::prelude::*;
use rustc_hash::FxHashMap;
use smallvec::SmallVec;

use crate::core::{Column, Result, Table, Value};

/// Partition key: one value per PARTITION BY column
///
/// SmallVec avoids a heap allocation for up to 4 partition columns.
pub type PartitionKey = SmallVec<[Value; 4]>;

/// A group of rows sharing one partition key
#[derive(Debug, Clone, PartialEq)]
pub struct Partition {
    /// The shared key
    pub key: PartitionKey,
    /// Original row positions, ascending
    pub rows: Vec<usize>,
}

impl Partition {
    fn new(key: PartitionKey) -> Self {
        Self {
            key,
            rows: Vec::new(),
        }
    }

    /// Number of rows in the partition
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Computes the partition key of a row
///
/// Column names are resolved once at construction; `extract` is then a pure
/// lookup by row index.
#[derive(Debug, Clone)]
pub struct PartitionKeyExtractor<'a> {
    columns: SmallVec<[&'a Column; 4]>,
}

impl<'a> PartitionKeyExtractor<'a> {
    /// Resolve the PARTITION BY columns against the table
    ///
    /// Fails with `UnresolvedColumn` for a name the table does not have.
    pub fn new<S: AsRef<str>>(table: &'a Table, partition_by: &[S]) -> Result<Self> {
        let columns = partition_by
            .iter()
            .map(|name| table.column(name.as_ref()))
            .collect::<Result<SmallVec<_>>>()?;
        Ok(Self { columns })
    }

    /// Extract the key for a row
    #[inline]
    pub fn extract(&self, row: usize) -> PartitionKey {
        self.columns
            .iter()
            .map(|col| col.values()[row].clone())
            .collect()
    }

    /// Number of key columns
    pub fn key_len(&self) -> usize {
        self.columns.len()
    }

    /// True when there is no PARTITION BY (the whole table is one partition)
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

/// Group rows `0..row_count` by partition key
///
/// With no PARTITION BY columns every row lands in a single partition; a
/// table with no rows has no partitions at all.
pub fn partition_rows(extractor: &PartitionKeyExtractor<'_>, row_count: usize) -> Vec<Partition> {
    if row_count == 0 {
        return Vec::new();
    }
    if extractor.is_empty() {
        return vec![Partition {
            key: PartitionKey::new(),
            rows: (0..row_count).collect(),
        }];
    }
    build_partitions(extractor, 0, row_count)
}

/// Group rows by partition key using chunk-local maps merged in chunk order
///
/// Produces the same partitions, in the same order with the same row order,
/// as [`partition_rows`].
pub fn partition_rows_parallel(
    extractor: &PartitionKeyExtractor<'_>,
    row_count: usize,
    chunk_size: usize,
) -> Vec<Partition> {
    if row_count == 0 || extractor.is_empty() {
        return partition_rows(extractor, row_count);
    }

    let chunk_size = chunk_size.max(1);
    let chunk_count = row_count.div_ceil(chunk_size);

    // Chunk-local grouping; collect keeps chunk order
    let partials: Vec<Vec<Partition>> = (0..chunk_count)
        .into_par_iter()
        .map(|chunk| {
            let start = chunk * chunk_size;
            let end = (start + chunk_size).min(row_count);
            build_partitions(extractor, start, end)
        })
        .collect();

    // Merge by key. Chunks cover ascending row ranges, so appending keeps
    // each partition's rows ascending and keeps discovery order.
    let mut index: FxHashMap<PartitionKey, usize> = FxHashMap::default();
    let mut partitions: Vec<Partition> = Vec::new();
    for partial in partials {
        for part in partial {
            match index.get(&part.key) {
                Some(&slot) => partitions[slot].rows.extend(part.rows),
                None => {
                    index.insert(part.key.clone(), partitions.len());
                    partitions.push(part);
                }
            }
        }
    }
    partitions
}

/// Single-pass grouping of rows `start..end`
fn build_partitions(extractor: &PartitionKeyExtractor<'_>, start: usize, end: usize) -> Vec<Partition> {
    let mut index: FxHashMap<PartitionKey, usize> = FxHashMap::default();
    let mut partitions: Vec<Partition> = Vec::new();
    for row in start..end {
        let key = extractor.extract(row);
        let slot = *index.entry(key).or_insert_with_key(|key| {
            partitions.push(Partition::new(key.clone()));
            partitions.len() - 1
        });
        partitions[slot].rows.push(row);
    }
    partitions
}
