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

//! Window function execution
//!
//! Evaluates one window function over a table:
//!
//! 1. Validation: every referenced column resolves, ranking functions have
//!    an ORDER BY, aggregate inputs have a supported type. Nothing is
//!    partitioned until the whole request is known to be valid.
//! 2. Partitioning by the PARTITION BY key (chunked in parallel for large
//!    tables).
//! 3. Per partition: sort + rank, or aggregate once and broadcast. Partitions
//!    are independent, so this step runs on rayon when there are enough of
//!    them. Cancellation is checked before each partition.
//! 4. Results are scattered into their row slots sequentially, in partition
//!    order.
//!
//! Output is identical for any worker count.

use std::fmt;

use log::{debug, error, trace, warn};
use rayon::prelude::*;

use crate::api::WindowExpr;
use crate::core::{Column, DataType, Error, Result, Table, Value};
use crate::functions::aggregate::create_aggregate;
use crate::functions::window::create_ranking;
use crate::functions::{AggregateFunction, RankingFunction, WindowFunction};

use super::context::ExecutionContext;
use super::materialize::ResultMaterializer;
use super::ordering::{sort_partition, OrderSpec, RowComparator};
use super::partition::{
    partition_rows, partition_rows_parallel, Partition, PartitionKeyExtractor,
};

/// PARTITION BY and ORDER BY of a window
///
/// An empty `partition_by` makes the whole table a single partition.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct WindowSpec {
    pub partition_by: Vec<String>,
    pub order_by: OrderSpec,
}

impl WindowSpec {
    pub fn new(partition_by: Vec<String>, order_by: OrderSpec) -> Self {
        Self {
            partition_by,
            order_by,
        }
    }
}

impl fmt::Display for WindowSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.partition_by.is_empty() {
            write!(f, "PARTITION BY {}", self.partition_by.join(", "))?;
            if !self.order_by.is_empty() {
                write!(f, " ")?;
            }
        }
        if !self.order_by.is_empty() {
            write!(f, "ORDER BY {}", self.order_by)?;
        }
        Ok(())
    }
}

/// How a partition is turned into output values
enum Evaluation<'t> {
    Ranking(Box<dyn RankingFunction>),
    Aggregate {
        input: &'t Column,
        prototype: Box<dyn AggregateFunction>,
    },
}

/// A validated window request with all columns resolved
struct WindowPlan<'t> {
    function: &'t WindowFunction,
    extractor: PartitionKeyExtractor<'t>,
    comparator: RowComparator<'t>,
    evaluation: Evaluation<'t>,
    output_type: DataType,
}

/// Output of one partition, waiting to be scattered
enum PartitionOutput<'p> {
    /// One value per row, parallel to `rows` (window order)
    Ranked { rows: Vec<usize>, values: Vec<Value> },
    /// One value shared by every row of the partition
    Broadcast { rows: &'p [usize], value: Value },
}

impl<'t> WindowPlan<'t> {
    fn prepare(table: &'t Table, function: &'t WindowFunction, spec: &WindowSpec) -> Result<Self> {
        if function.requires_order_by() && spec.order_by.is_empty() {
            return Err(Error::configuration(format!(
                "{} requires an ORDER BY clause",
                function.name()
            )));
        }

        let extractor = PartitionKeyExtractor::new(table, &spec.partition_by)?;
        let comparator = RowComparator::new(table, &spec.order_by)?;

        let (evaluation, output_type) = match function.target_column() {
            Some(name) => {
                let input = table.column(name)?;
                function.validate_input_type(name, input.data_type())?;
                let prototype = create_aggregate(function).ok_or_else(|| {
                    Error::internal(format!("{} is not an aggregate", function.name()))
                })?;
                (
                    Evaluation::Aggregate { input, prototype },
                    function.output_type(input.data_type()),
                )
            }
            None => {
                let ranking = create_ranking(function).ok_or_else(|| {
                    Error::internal(format!("{} is not a ranking function", function.name()))
                })?;
                (
                    Evaluation::Ranking(ranking),
                    function.output_type(DataType::Null),
                )
            }
        };

        let info = match &evaluation {
            Evaluation::Ranking(ranking) => ranking.info(),
            Evaluation::Aggregate { prototype, .. } => prototype.info(),
        };
        debug!(
            "{}: {} ({:?}) -> {}",
            function,
            info.description(),
            info.function_type(),
            output_type
        );

        Ok(Self {
            function,
            extractor,
            comparator,
            evaluation,
            output_type,
        })
    }

    fn evaluate_partition<'p>(&self, partition: &'p Partition) -> Result<PartitionOutput<'p>> {
        trace!(
            "{}: partition {:?} with {} rows",
            self.function,
            partition.key.as_slice(),
            partition.len()
        );

        match &self.evaluation {
            Evaluation::Ranking(ranking) => {
                let rows = sort_partition(partition, &self.comparator);
                let is_peer = |a: usize, b: usize| self.comparator.is_peer(a, b);
                let ranks = ranking.assign(&rows, &is_peer);
                let values = ranks.into_iter().map(Value::Integer).collect();
                Ok(PartitionOutput::Ranked { rows, values })
            }
            Evaluation::Aggregate { input, prototype } => {
                let mut aggregate = prototype.clone_box();
                let values = input.values();
                for &row in &partition.rows {
                    aggregate.accumulate(&values[row]);
                }
                // Cells carry the column's type: an integer-only partition of a
                // FLOAT column still yields FLOAT
                let value = match (aggregate.result()?, self.output_type) {
                    (Value::Null(_), output_type) => Value::null(output_type),
                    (Value::Integer(i), DataType::Float) => Value::Float(i as f64),
                    (value, _) => value,
                };
                Ok(PartitionOutput::Broadcast {
                    rows: &partition.rows,
                    value,
                })
            }
        }
    }
}

/// Evaluates window functions over tables
pub struct WindowExecutor {
    ctx: ExecutionContext,
}

impl Default for WindowExecutor {
    fn default() -> Self {
        Self::new(ExecutionContext::new())
    }
}

impl WindowExecutor {
    /// Create an executor bound to an execution context
    pub fn new(ctx: ExecutionContext) -> Self {
        Self { ctx }
    }

    /// Get the execution context
    pub fn context(&self) -> &ExecutionContext {
        &self.ctx
    }

    /// Evaluate `function` over `spec`, naming the output by the default rule
    pub fn execute(
        &self,
        table: &Table,
        function: &WindowFunction,
        spec: &WindowSpec,
    ) -> Result<Column> {
        let name = function.default_output_name();
        self.with_pool(|| self.evaluate(table, function, spec, &name))
    }

    /// Evaluate a window expression; the output column takes its name
    pub fn execute_expr(&self, table: &Table, expr: &WindowExpr) -> Result<Column> {
        self.with_pool(|| self.evaluate(table, expr.function(), expr.spec(), expr.output_name()))
    }

    /// Evaluate several expressions against `table` and add their outputs
    ///
    /// Every expression sees the input table only. An output named like an
    /// existing column replaces it; otherwise it is appended.
    pub fn execute_all(&self, table: &Table, exprs: &[WindowExpr]) -> Result<Table> {
        self.with_pool(|| {
            let mut output = table.clone();
            for expr in exprs {
                let column =
                    self.evaluate(table, expr.function(), expr.spec(), expr.output_name())?;
                output = output.with_column(column)?;
            }
            Ok(output)
        })
    }

    /// Run `op` on the context's dedicated pool, or on the current one
    fn with_pool<R, F>(&self, op: F) -> Result<R>
    where
        F: FnOnce() -> Result<R> + Send,
        R: Send,
    {
        match self.ctx.thread_pool()? {
            Some(pool) => {
                trace!("running on dedicated pool of {} threads", pool.current_num_threads());
                pool.install(op)
            }
            None => op(),
        }
    }

    fn evaluate(
        &self,
        table: &Table,
        function: &WindowFunction,
        spec: &WindowSpec,
        output_name: &str,
    ) -> Result<Column> {
        let plan = WindowPlan::prepare(table, function, spec)?;
        let row_count = table.row_count();
        let config = self.ctx.parallel_config();

        self.check_cancelled()?;

        let partitions = if config.should_parallel_partition(row_count) {
            debug!(
                "{}: parallel partitioning of {} rows in chunks of {}",
                function, row_count, config.chunk_size
            );
            partition_rows_parallel(&plan.extractor, row_count, config.chunk_size)
        } else {
            partition_rows(&plan.extractor, row_count)
        };

        let parallel = config.should_parallel_evaluate(partitions.len());
        debug!(
            "{}: {} rows in {} partitions ({})",
            function,
            row_count,
            partitions.len(),
            if parallel { "parallel" } else { "sequential" }
        );

        let outputs: Vec<PartitionOutput<'_>> = if parallel {
            partitions
                .par_iter()
                .map(|partition| {
                    self.check_cancelled()?;
                    plan.evaluate_partition(partition)
                })
                .collect::<Result<_>>()?
        } else {
            partitions
                .iter()
                .map(|partition| {
                    self.check_cancelled()?;
                    plan.evaluate_partition(partition)
                })
                .collect::<Result<_>>()?
        };

        let mut materializer = ResultMaterializer::new(row_count);
        for output in outputs {
            let scattered = match output {
                PartitionOutput::Ranked { rows, values } => materializer.scatter(&rows, values),
                PartitionOutput::Broadcast { rows, value } => materializer.broadcast(rows, &value),
            };
            scattered.map_err(|e| log_fatal(function, e))?;
        }
        let values = materializer.finish().map_err(|e| log_fatal(function, e))?;

        Ok(Column::with_type(output_name, plan.output_type, values))
    }

    fn check_cancelled(&self) -> Result<()> {
        let result = self.ctx.check_cancelled();
        if result.is_err() {
            warn!("window evaluation cancelled");
        }
        result
    }
}

fn log_fatal(function: &WindowFunction, err: Error) -> Error {
    if err.is_fatal() {
        error!("{}: {}", function, err);
    }
    err
}
