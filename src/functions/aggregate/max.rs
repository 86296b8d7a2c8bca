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

//! MAX aggregate function

use crate::core::{Result, Value};
use crate::functions::{AggregateFunction, FunctionInfo, FunctionType};

/// MAX aggregate function
///
/// Returns the maximum of all non-NULL values in the partition under the total
/// value ordering, so it works with any orderable type (numbers, strings,
/// timestamps, booleans). NaN counts as the greatest number.
#[derive(Default)]
pub struct MaxFunction {
    max_value: Option<Value>,
}

impl AggregateFunction for MaxFunction {
    fn name(&self) -> &str {
        "MAX"
    }

    fn info(&self) -> FunctionInfo {
        FunctionInfo::new(
            "MAX",
            FunctionType::Aggregate,
            "Returns the maximum value of all non-NULL values in the partition",
        )
    }

    fn accumulate(&mut self, value: &Value) {
        if value.is_null() {
            return;
        }
        let replace = match &self.max_value {
            Some(current) => value > current,
            None => true,
        };
        if replace {
            self.max_value = Some(value.clone());
        }
    }

    fn result(&self) -> Result<Value> {
        Ok(self.max_value.clone().unwrap_or_else(Value::null_unknown))
    }

    fn clone_box(&self) -> Box<dyn AggregateFunction> {
        Box::new(MaxFunction::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    #[test]
    fn test_max_numbers() {
        let mut max = MaxFunction::default();
        max.accumulate(&Value::Integer(5));
        max.accumulate(&Value::Float(5.5));
        max.accumulate(&Value::null_unknown());
        max.accumulate(&Value::Integer(-3));
        assert_eq!(max.result().unwrap(), Value::Float(5.5));
    }

    #[test]
    fn test_max_nan_is_greatest() {
        let mut max = MaxFunction::default();
        max.accumulate(&Value::Float(f64::INFINITY));
        max.accumulate(&Value::Float(f64::NAN));
        assert!(matches!(max.result().unwrap(), Value::Float(f) if f.is_nan()));
    }

    #[test]
    fn test_max_timestamps() {
        let t1 = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let t2 = Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap();
        let mut max = MaxFunction::default();
        max.accumulate(&Value::timestamp(t2));
        max.accumulate(&Value::timestamp(t1));
        assert_eq!(max.result().unwrap(), Value::timestamp(t2));
    }

    #[test]
    fn test_max_empty() {
        let max = MaxFunction::default();
        assert!(max.result().unwrap().is_null());
    }
}
