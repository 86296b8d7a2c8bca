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

//! Result materialization - scattering per-partition results into row slots

use crate::core::{Error, Result, Value};

/// Collects window output into a dense column aligned with row positions
///
/// Every slot must be written exactly once. A second write, an
/// out-of-range row or an unwritten slot at the end means rows were
/// dropped or duplicated upstream and is reported as
/// `InternalInvariantViolation`.
#[derive(Debug)]
pub struct ResultMaterializer {
    slots: Vec<Option<Value>>,
    written: usize,
}

impl ResultMaterializer {
    /// Create a materializer for `row_count` rows
    pub fn new(row_count: usize) -> Self {
        Self {
            slots: vec![None; row_count],
            written: 0,
        }
    }

    /// Number of slots written so far
    pub fn written(&self) -> usize {
        self.written
    }

    /// Write `values[i]` into the slot of `rows[i]`
    pub fn scatter(&mut self, rows: &[usize], values: Vec<Value>) -> Result<()> {
        if rows.len() != values.len() {
            return Err(Error::invariant_violation(format!(
                "{} rows but {} values to scatter",
                rows.len(),
                values.len()
            )));
        }
        for (&row, value) in rows.iter().zip(values) {
            self.write(row, value)?;
        }
        Ok(())
    }

    /// Write the same value into the slot of every row in `rows`
    pub fn broadcast(&mut self, rows: &[usize], value: &Value) -> Result<()> {
        for &row in rows {
            self.write(row, value.clone())?;
        }
        Ok(())
    }

    fn write(&mut self, row: usize, value: Value) -> Result<()> {
        let row_count = self.slots.len();
        let slot = self.slots.get_mut(row).ok_or_else(|| {
            Error::invariant_violation(format!("row {} out of range for {} rows", row, row_count))
        })?;
        if slot.is_some() {
            return Err(Error::invariant_violation(format!(
                "row {} produced more than once",
                row
            )));
        }
        *slot = Some(value);
        self.written += 1;
        Ok(())
    }

    /// Return the dense output, failing if any row was never written
    pub fn finish(self) -> Result<Vec<Value>> {
        self.slots
            .into_iter()
            .enumerate()
            .map(|(row, slot)| {
                slot.ok_or_else(|| Error::invariant_violation(format!("row {} has no output", row)))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scatter_and_finish() {
        let mut m = ResultMaterializer::new(4);
        m.scatter(&[3, 1], vec![Value::integer(1), Value::integer(2)])
            .unwrap();
        m.broadcast(&[0, 2], &Value::text("x")).unwrap();
        assert_eq!(m.written(), 4);
        assert_eq!(
            m.finish().unwrap(),
            vec![
                Value::text("x"),
                Value::integer(2),
                Value::text("x"),
                Value::integer(1)
            ]
        );
    }

    #[test]
    fn test_double_write_is_invariant_violation() {
        let mut m = ResultMaterializer::new(2);
        m.broadcast(&[0], &Value::integer(1)).unwrap();
        let err = m.scatter(&[0], vec![Value::integer(2)]).unwrap_err();
        assert!(err.is_fatal());
    }

    #[test]
    fn test_out_of_range_is_invariant_violation() {
        let mut m = ResultMaterializer::new(2);
        let err = m.broadcast(&[2], &Value::integer(1)).unwrap_err();
        assert!(matches!(err, Error::InternalInvariantViolation(_)));
    }

    #[test]
    fn test_missing_row_is_invariant_violation() {
        let mut m = ResultMaterializer::new(3);
        m.scatter(&[0, 2], vec![Value::integer(1), Value::integer(1)])
            .unwrap();
        assert_eq!(
            m.finish(),
            Err(Error::invariant_violation("row 1 has no output"))
        );
    }

    #[test]
    fn test_length_mismatch() {
        let mut m = ResultMaterializer::new(2);
        assert!(m.scatter(&[0, 1], vec![Value::integer(1)]).is_err());
    }

    #[test]
    fn test_empty() {
        assert!(ResultMaterializer::new(0).finish().unwrap().is_empty());
    }
}
