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

//! Parallel Window Evaluation
//!
//! Window evaluation has two phases that can use rayon:
//!
//! - **Parallel partitioning**: rows are split into chunks, each chunk builds
//!   a local key -> rows map, and the partial maps are merged in chunk order
//! - **Parallel evaluation**: partitions are independent once built, so the
//!   sort/rank or aggregate step runs concurrently across partitions
//!
//! # Thresholds
//!
//! Parallelization has overhead, so we only use it when beneficial:
//! - Partitioning: 50,000+ rows
//! - Evaluation: 4+ partitions
//!
//! Output never depends on which path runs or on the worker count.

use rayon::{ThreadPool, ThreadPoolBuilder};

use crate::core::{Error, Result};

// Default thresholds for parallel execution - single source of truth
pub const DEFAULT_PARALLEL_PARTITION_THRESHOLD: usize = 50_000;
pub const DEFAULT_PARALLEL_MIN_PARTITIONS: usize = 4;
pub const DEFAULT_PARALLEL_CHUNK_SIZE: usize = 2048;

/// Configuration for parallel execution
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParallelConfig {
    /// Whether parallel execution is enabled
    pub enabled: bool,
    /// Worker threads for a dedicated pool; `None` uses rayon's global pool
    pub num_threads: Option<usize>,
    /// Minimum rows to trigger chunked parallel partitioning
    pub min_rows_for_parallel_partition: usize,
    /// Minimum partitions to evaluate partitions concurrently
    pub min_partitions_for_parallel: usize,
    /// Chunk size for parallel partitioning (rows per task)
    pub chunk_size: usize,
}

impl Default for ParallelConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            num_threads: None,
            min_rows_for_parallel_partition: DEFAULT_PARALLEL_PARTITION_THRESHOLD,
            min_partitions_for_parallel: DEFAULT_PARALLEL_MIN_PARTITIONS,
            chunk_size: DEFAULT_PARALLEL_CHUNK_SIZE,
        }
    }
}

impl ParallelConfig {
    /// Create a new parallel config with custom settings
    pub fn new(
        enabled: bool,
        num_threads: Option<usize>,
        min_rows_for_parallel_partition: usize,
        min_partitions_for_parallel: usize,
        chunk_size: usize,
    ) -> Self {
        Self {
            enabled,
            num_threads,
            min_rows_for_parallel_partition,
            min_partitions_for_parallel,
            chunk_size,
        }
    }

    /// Create a config with parallel execution disabled
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Default::default()
        }
    }

    /// Create a config that parallelizes every phase regardless of size
    pub fn always() -> Self {
        Self {
            enabled: true,
            min_rows_for_parallel_partition: 0,
            min_partitions_for_parallel: 0,
            ..Default::default()
        }
    }

    /// Run on a dedicated pool with `num_threads` workers
    pub fn with_num_threads(mut self, num_threads: usize) -> Self {
        self.num_threads = Some(num_threads);
        self
    }

    /// Reject settings that cannot run
    pub fn validate(&self) -> Result<()> {
        if self.num_threads == Some(0) {
            return Err(Error::configuration("num_threads must be at least 1"));
        }
        if self.chunk_size == 0 {
            return Err(Error::configuration("chunk_size must be at least 1"));
        }
        Ok(())
    }

    /// Check if parallel partitioning should be used for the given row count
    #[inline]
    pub fn should_parallel_partition(&self, row_count: usize) -> bool {
        self.enabled && row_count >= self.min_rows_for_parallel_partition
    }

    /// Check if partitions should be evaluated concurrently
    #[inline]
    pub fn should_parallel_evaluate(&self, partition_count: usize) -> bool {
        self.enabled && partition_count > 1 && partition_count >= self.min_partitions_for_parallel
    }

    /// Build the dedicated thread pool, if one is configured
    ///
    /// [`ExecutionContext::thread_pool`](super::ExecutionContext::thread_pool)
    /// caches the result; evaluation never calls this directly.
    pub fn build_thread_pool(&self) -> Result<Option<ThreadPool>> {
        self.validate()?;
        match self.num_threads {
            Some(n) if self.enabled => ThreadPoolBuilder::new()
                .num_threads(n)
                .thread_name(|i| format!("partwin-worker-{}", i))
                .build()
                .map(Some)
                .map_err(|e| Error::internal(format!("failed to build thread pool: {}", e))),
            _ => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ParallelConfig::default();
        assert!(config.enabled);
        assert_eq!(config.num_threads, None);
        assert_eq!(config.chunk_size, DEFAULT_PARALLEL_CHUNK_SIZE);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_thresholds() {
        let config = ParallelConfig::default();
        assert!(!config.should_parallel_partition(1_000));
        assert!(config.should_parallel_partition(DEFAULT_PARALLEL_PARTITION_THRESHOLD));
        assert!(!config.should_parallel_evaluate(3));
        assert!(config.should_parallel_evaluate(4));

        let disabled = ParallelConfig::disabled();
        assert!(!disabled.should_parallel_partition(usize::MAX));
        assert!(!disabled.should_parallel_evaluate(usize::MAX));

        let always = ParallelConfig::always();
        assert!(always.should_parallel_partition(0));
        assert!(always.should_parallel_evaluate(2));
        // A single partition has nothing to spread out
        assert!(!always.should_parallel_evaluate(1));
    }

    #[test]
    fn test_zero_threads_rejected() {
        let config = ParallelConfig::default().with_num_threads(0);
        assert!(matches!(config.validate(), Err(Error::Configuration(_))));
        assert!(matches!(
            config.build_thread_pool(),
            Err(Error::Configuration(_))
        ));
    }

    #[test]
    fn test_zero_chunk_size_rejected() {
        let config = ParallelConfig {
            chunk_size: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_build_thread_pool() {
        assert!(ParallelConfig::default().build_thread_pool().unwrap().is_none());

        let pool = ParallelConfig::default()
            .with_num_threads(2)
            .build_thread_pool()
            .unwrap()
            .unwrap();
        assert_eq!(pool.current_num_threads(), 2);

        // Disabled parallelism never spins up workers
        let none = ParallelConfig::disabled()
            .with_num_threads(2)
            .build_thread_pool()
            .unwrap();
        assert!(none.is_none());
    }
}
