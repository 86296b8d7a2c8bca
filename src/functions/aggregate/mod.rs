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

//! Aggregate Functions
//!
//! Whole-partition reductions evaluated once per partition and broadcast to
//! every row of it:
//!
//! - [`CountFunction`] - COUNT(column)
//! - [`SumFunction`] - SUM(column)
//! - [`MeanFunction`] - AVG(column)
//! - [`MinFunction`] - MIN(column)
//! - [`MaxFunction`] - MAX(column)
//!
//! All of them skip NULL inputs.

mod count;
mod max;
mod mean;
mod min;
mod sum;

pub use count::CountFunction;
pub use max::MaxFunction;
pub use mean::MeanFunction;
pub use min::MinFunction;
pub use sum::SumFunction;

use super::{AggregateFunction, WindowFunction};

/// Create a fresh accumulator for an aggregate window function
///
/// Returns `None` for ranking functions.
pub fn create_aggregate(function: &WindowFunction) -> Option<Box<dyn AggregateFunction>> {
    match function {
        WindowFunction::Sum(_) => Some(Box::new(SumFunction::default())),
        WindowFunction::Mean(_) => Some(Box::new(MeanFunction::default())),
        WindowFunction::Min(_) => Some(Box::new(MinFunction::default())),
        WindowFunction::Max(_) => Some(Box::new(MaxFunction::default())),
        WindowFunction::Count(_) => Some(Box::new(CountFunction::default())),
        WindowFunction::RowNumber | WindowFunction::Rank | WindowFunction::DenseRank => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Value;

    #[test]
    fn test_create_aggregate() {
        let agg = create_aggregate(&WindowFunction::Mean("v".into())).unwrap();
        assert_eq!(agg.name(), "AVG");
        assert!(create_aggregate(&WindowFunction::RowNumber).is_none());
    }

    #[test]
    fn test_clone_box_starts_fresh() {
        let mut sum = create_aggregate(&WindowFunction::Sum("v".into())).unwrap();
        sum.accumulate(&Value::integer(10));
        let fresh = sum.clone_box();
        assert!(fresh.result().unwrap().is_null());
        assert_eq!(sum.result().unwrap(), Value::integer(10));
    }

    #[test]
    fn test_aggregates_agree_on_shared_input() {
        let input = [
            Value::integer(15),
            Value::null_unknown(),
            Value::integer(25),
            Value::integer(35),
        ];
        let eval = |f: WindowFunction| {
            let mut agg = create_aggregate(&f).unwrap();
            for v in &input {
                agg.accumulate(v);
            }
            agg.result().unwrap()
        };
        assert_eq!(eval(WindowFunction::Sum("v".into())), Value::integer(75));
        assert_eq!(eval(WindowFunction::Mean("v".into())), Value::float(25.0));
        assert_eq!(eval(WindowFunction::Min("v".into())), Value::integer(15));
        assert_eq!(eval(WindowFunction::Max("v".into())), Value::integer(35));
        assert_eq!(eval(WindowFunction::Count("v".into())), Value::integer(3));
    }
}
