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

//! SUM aggregate function

use crate::core::{Error, Result, Value};
use crate::functions::{AggregateFunction, FunctionInfo, FunctionType};

/// Sum state - tracks whether we have integers or floats
///
/// Integer sums are carried in 128 bits so intermediate overflow cannot
/// happen; only the final result must fit in an i64.
#[derive(Default, Clone, Copy)]
enum SumState {
    #[default]
    Empty,
    Integer(i128),
    Float(f64),
}

/// SUM aggregate function
///
/// Returns the sum of all non-NULL values in the partition.
/// Returns INTEGER for integer inputs, FLOAT once any float is seen, and
/// NULL when the partition has no non-NULL value.
#[derive(Default)]
pub struct SumFunction {
    state: SumState,
}

impl AggregateFunction for SumFunction {
    fn name(&self) -> &str {
        "SUM"
    }

    fn info(&self) -> FunctionInfo {
        FunctionInfo::new(
            "SUM",
            FunctionType::Aggregate,
            "Returns the sum of all non-NULL values in the partition",
        )
    }

    fn accumulate(&mut self, value: &Value) {
        self.state = match (self.state, value) {
            (SumState::Empty, Value::Integer(i)) => SumState::Integer(*i as i128),
            (SumState::Integer(sum), Value::Integer(i)) => SumState::Integer(sum + *i as i128),
            (SumState::Float(sum), Value::Integer(i)) => SumState::Float(sum + *i as f64),
            (SumState::Empty, Value::Float(f)) => SumState::Float(*f),
            (SumState::Integer(sum), Value::Float(f)) => SumState::Float(sum as f64 + f),
            (SumState::Float(sum), Value::Float(f)) => SumState::Float(sum + f),
            // NULLs are skipped; other domains are rejected before evaluation
            (state, _) => state,
        };
    }

    fn result(&self) -> Result<Value> {
        match self.state {
            SumState::Empty => Ok(Value::null_unknown()),
            SumState::Integer(sum) => i64::try_from(sum)
                .map(Value::Integer)
                .map_err(|_| Error::NumericOverflow("SUM".to_string())),
            SumState::Float(sum) => Ok(Value::Float(sum)),
        }
    }

    fn clone_box(&self) -> Box<dyn AggregateFunction> {
        Box::new(SumFunction::default())
    }
}
