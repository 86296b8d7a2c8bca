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

//! Execution Context
//!
//! This module provides the execution context for window evaluation:
//! parallelism settings and cooperative cancellation.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, OnceLock};

use rayon::ThreadPool;

use crate::core::{Error, Result};

use super::parallel::ParallelConfig;

/// Execution context for window evaluation
///
/// Cloning is cheap and clones share the cancellation flag, so a context
/// handed to a worker can be cancelled from the caller's side. Clones also
/// share the dedicated worker pool, which is built on first use.
#[derive(Debug, Clone)]
pub struct ExecutionContext {
    /// Parallel execution settings
    parallel: ParallelConfig,
    /// Whether the evaluation has been cancelled
    cancelled: Arc<AtomicBool>,
    /// Dedicated pool for `parallel.num_threads`, built lazily
    pool: Arc<OnceLock<Arc<ThreadPool>>>,
}

impl Default for ExecutionContext {
    fn default() -> Self {
        Self::new()
    }
}

impl ExecutionContext {
    /// Create a new execution context with default settings
    pub fn new() -> Self {
        Self {
            parallel: ParallelConfig::default(),
            cancelled: Arc::new(AtomicBool::new(false)),
            pool: Arc::new(OnceLock::new()),
        }
    }

    /// Create a context with the given parallel settings
    pub fn with_parallel_config(parallel: ParallelConfig) -> Self {
        Self {
            parallel,
            ..Self::new()
        }
    }

    /// Create a context that evaluates everything on the calling thread
    pub fn sequential() -> Self {
        Self::with_parallel_config(ParallelConfig::disabled())
    }

    /// Get the parallel settings
    pub fn parallel_config(&self) -> &ParallelConfig {
        &self.parallel
    }

    /// Replace the parallel settings
    ///
    /// Drops this context's handle on the cached pool; the next evaluation
    /// builds one for the new settings.
    pub fn set_parallel_config(&mut self, parallel: ParallelConfig) {
        self.parallel = parallel;
        self.pool = Arc::new(OnceLock::new());
    }

    /// The dedicated worker pool, if `num_threads` is configured
    ///
    /// Built once and reused by every evaluation under this context and its
    /// clones. Invalid settings fail with `Configuration` on every call.
    pub fn thread_pool(&self) -> Result<Option<Arc<ThreadPool>>> {
        self.parallel.validate()?;
        if let Some(pool) = self.pool.get() {
            return Ok(Some(Arc::clone(pool)));
        }
        let Some(pool) = self.parallel.build_thread_pool()? else {
            return Ok(None);
        };
        // A concurrent first use may have won the race; keep its pool
        let pool = self.pool.get_or_init(|| Arc::new(pool));
        Ok(Some(Arc::clone(pool)))
    }

    /// Check if the evaluation has been cancelled
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Relaxed)
    }

    /// Cancel the evaluation
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Relaxed);
    }

    /// Get a cancellation handle that can be used from another thread
    pub fn cancellation_handle(&self) -> CancellationHandle {
        CancellationHandle {
            cancelled: self.cancelled.clone(),
        }
    }

    /// Check for cancellation and return an error if cancelled
    pub fn check_cancelled(&self) -> Result<()> {
        if self.is_cancelled() {
            Err(Error::QueryCancelled)
        } else {
            Ok(())
        }
    }
}

/// Handle for cancelling an evaluation from another thread
#[derive(Debug, Clone)]
pub struct CancellationHandle {
    cancelled: Arc<AtomicBool>,
}

impl CancellationHandle {
    /// Cancel the evaluation
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Relaxed);
    }

    /// Check if the evaluation has been cancelled
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Relaxed)
    }
}

/// Builder for ExecutionContext
pub struct ExecutionContextBuilder {
    ctx: ExecutionContext,
}

impl ExecutionContextBuilder {
    /// Create a new builder
    pub fn new() -> Self {
        Self {
            ctx: ExecutionContext::new(),
        }
    }

    /// Set the full parallel configuration
    pub fn parallel_config(mut self, parallel: ParallelConfig) -> Self {
        self.ctx.parallel = parallel;
        self
    }

    /// Enable or disable parallel execution
    pub fn parallel(mut self, enabled: bool) -> Self {
        self.ctx.parallel.enabled = enabled;
        self
    }

    /// Run on a dedicated pool with this many workers
    pub fn num_threads(mut self, num_threads: usize) -> Self {
        self.ctx.parallel.num_threads = Some(num_threads);
        self
    }

    /// Set the partitioning chunk size
    pub fn chunk_size(mut self, chunk_size: usize) -> Self {
        self.ctx.parallel.chunk_size = chunk_size;
        self
    }

    /// Build the execution context
    pub fn build(self) -> ExecutionContext {
        self.ctx
    }
}

impl Default for ExecutionContextBuilder {
    fn default() -> Self {
        Self::new()
    }
}
