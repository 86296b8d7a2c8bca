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

//! MIN aggregate function

use crate::core::{Result, Value};
use crate::functions::{AggregateFunction, FunctionInfo, FunctionType};

/// MIN aggregate function
///
/// Returns the minimum of all non-NULL values in the partition under the total
/// value ordering, so it works with any orderable type (numbers, strings,
/// timestamps, booleans). NaN counts as the greatest number.
#[derive(Default)]
pub struct MinFunction {
    min_value: Option<Value>,
}

impl AggregateFunction for MinFunction {
    fn name(&self) -> &str {
        "MIN"
    }

    fn info(&self) -> FunctionInfo {
        FunctionInfo::new(
            "MIN",
            FunctionType::Aggregate,
            "Returns the minimum value of all non-NULL values in the partition",
        )
    }

    fn accumulate(&mut self, value: &Value) {
        if value.is_null() {
            return;
        }
        let replace = match &self.min_value {
            Some(current) => value < current,
            None => true,
        };
        if replace {
            self.min_value = Some(value.clone());
        }
    }

    fn result(&self) -> Result<Value> {
        Ok(self.min_value.clone().unwrap_or_else(Value::null_unknown))
    }

    fn clone_box(&self) -> Box<dyn AggregateFunction> {
        Box::new(MinFunction::default())
    }
}
