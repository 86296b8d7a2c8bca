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

//! AVG aggregate function

use crate::core::{Result, Value};
use crate::functions::{AggregateFunction, FunctionInfo, FunctionType};

/// AVG aggregate function
///
/// Returns the arithmetic mean of all non-NULL values in the partition.
/// Always returns a FLOAT. Integer inputs are summed exactly before the
/// final division.
#[derive(Default)]
pub struct MeanFunction {
    int_sum: i128,
    float_sum: f64,
    count: i64,
}

impl AggregateFunction for MeanFunction {
    fn name(&self) -> &str {
        "AVG"
    }

    fn info(&self) -> FunctionInfo {
        FunctionInfo::new(
            "AVG",
            FunctionType::Aggregate,
            "Returns the average of all non-NULL values in the partition",
        )
    }

    fn accumulate(&mut self, value: &Value) {
        match value {
            Value::Integer(i) => self.int_sum += *i as i128,
            Value::Float(f) => self.float_sum += f,
            _ => return,
        }
        self.count += 1;
    }

    fn result(&self) -> Result<Value> {
        if self.count == 0 {
            return Ok(Value::null_unknown());
        }
        let total = self.int_sum as f64 + self.float_sum;
        Ok(Value::Float(total / self.count as f64))
    }

    fn clone_box(&self) -> Box<dyn AggregateFunction> {
        Box::new(MeanFunction::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mean_integers() {
        let mut avg = MeanFunction::default();
        avg.accumulate(&Value::Integer(55));
        avg.accumulate(&Value::Integer(65));
        assert_eq!(avg.result().unwrap(), Value::Float(60.0));
    }

    #[test]
    fn test_mean_mixed() {
        let mut avg = MeanFunction::default();
        avg.accumulate(&Value::Integer(1));
        avg.accumulate(&Value::Float(2.0));
        avg.accumulate(&Value::null_unknown());
        assert_eq!(avg.result().unwrap(), Value::Float(1.5));
    }

    #[test]
    fn test_mean_large_integers_do_not_overflow() {
        let mut avg = MeanFunction::default();
        avg.accumulate(&Value::Integer(i64::MAX));
        avg.accumulate(&Value::Integer(i64::MAX));
        assert_eq!(avg.result().unwrap(), Value::Float(i64::MAX as f64));
    }

    #[test]
    fn test_mean_empty() {
        let mut avg = MeanFunction::default();
        assert!(avg.result().unwrap().is_null());
        avg.accumulate(&Value::null_unknown());
        assert!(avg.result().unwrap().is_null());
        avg.accumulate(&Value::Integer(4));
        assert!(avg.clone_box().result().unwrap().is_null());
    }
}
