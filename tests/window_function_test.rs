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

//! Window Function Tests
//!
//! ROW_NUMBER and partition aggregates through the public builder API:
//! single and composite PARTITION BY, ASC/DESC and multi-key ORDER BY.

use std::collections::HashMap;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use partwin::api::{col, row_number, Window};
use partwin::{row, Column, DataType, Table, Value};

fn sales_table() -> Table {
    Table::new(vec![
        Column::from_values("category", ["A", "A", "A", "B", "B", "B", "C", "C"]),
        Column::from_values("sales", [100i64, 200, 50, 500, 100, 300, 250, 150]),
    ])
    .expect("Failed to create table")
}

fn ints(column: &Column) -> Vec<i64> {
    column
        .values()
        .iter()
        .map(|v| v.as_int64().expect("expected an integer"))
        .collect()
}

fn texts(column: &Column) -> Vec<String> {
    column
        .values()
        .iter()
        .map(|v| v.as_str().expect("expected text").to_string())
        .collect()
}

// =============================================================================
// ROW_NUMBER Tests
// =============================================================================

#[test]
fn test_row_number_ascending() {
    let table = sales_table();
    let window = Window::new()
        .partition_by("category")
        .order_by("sales", false)
        .unwrap();

    let result = table
        .with_window_columns(&[row_number().over(&window).unwrap().alias("row_number_sales")])
        .expect("Failed to evaluate window");

    // Input columns are untouched
    assert_eq!(result.column("sales").unwrap(), table.column("sales").unwrap());
    assert_eq!(
        ints(result.column("row_number_sales").unwrap()),
        vec![2, 3, 1, 3, 1, 2, 2, 1]
    );
}

#[test]
fn test_row_number_descending() {
    let table = sales_table();
    let window = Window::new()
        .partition_by("category")
        .order_by("sales", true)
        .unwrap();

    let result = table
        .with_window_columns(&[row_number().over(&window).unwrap().alias("row_number_sales")])
        .expect("Failed to evaluate window");

    assert_eq!(
        ints(result.column("row_number_sales").unwrap()),
        vec![2, 1, 3, 1, 3, 2, 1, 2]
    );
}

#[test]
fn test_row_number_without_partition() {
    let table = sales_table();
    let window = Window::new().order_by("sales", false).unwrap();

    let result = table
        .with_window_columns(&[row_number().over(&window).unwrap()])
        .unwrap();

    // 50, 100(row 0), 100(row 4), 150, 200, 250, 300, 500
    assert_eq!(
        ints(result.column("row_number").unwrap()),
        vec![2, 5, 1, 8, 3, 7, 6, 4]
    );
}

#[test]
fn test_row_number_ties_keep_input_order() {
    let table = Table::from_rows(
        &["k", "v"],
        vec![
            row!["A", 5],
            row!["A", 5],
            row!["B", 1],
            row!["A", 5],
            row!["A", 4],
        ],
    )
    .unwrap();

    for desc in [false, true] {
        let window = Window::new().partition_by("k").order_by("v", desc).unwrap();
        let out = table
            .with_window_columns(&[row_number().over(&window).unwrap()])
            .unwrap();
        let expected = if desc {
            vec![1, 2, 1, 3, 4]
        } else {
            vec![2, 3, 1, 4, 1]
        };
        assert_eq!(ints(out.column("row_number").unwrap()), expected, "desc={}", desc);
    }
}

// =============================================================================
// Multiple partitions with random data
// =============================================================================

#[test]
fn test_multiple_window_partitions() {
    // 900 rows: 100 distinct values for each of A1..C3
    let mut rng = StdRng::seed_from_u64(42);
    let mut all_numbers: Vec<i64> = (1..=1000).collect();
    all_numbers.shuffle(&mut rng);

    let mut rows = Vec::new();
    let mut next = 0;
    for letter in ["A", "B", "C"] {
        for num in ["1", "2", "3"] {
            for &value in &all_numbers[next..next + 100] {
                rows.push(row![letter, num, value]);
            }
            next += 100;
        }
    }
    // Interleave the groups so partitions are not contiguous
    rows.shuffle(&mut rng);
    let table = Table::from_rows(&["letter", "num", "value"], rows).unwrap();

    let letter_window = Window::new()
        .partition_by("letter")
        .order_by("value", false)
        .unwrap();
    let num_window = Window::new()
        .partition_by("num")
        .order_by("value", false)
        .unwrap();
    let combined_window = Window::new()
        .partition_by(["letter", "num"])
        .order_by("value", false)
        .unwrap();

    let result = table
        .with_window_columns(&[
            col("value").sum().over(&letter_window).unwrap().alias("letter_sum"),
            col("value").sum().over(&num_window).unwrap().alias("num_sum"),
            col("value").sum().over(&combined_window).unwrap().alias("combined_sum"),
            row_number().over(&letter_window).unwrap().alias("letter_row_number"),
            row_number().over(&num_window).unwrap().alias("num_row_number"),
            row_number()
                .over(&combined_window)
                .unwrap()
                .alias("combined_row_number"),
        ])
        .unwrap();
    assert_eq!(result.row_count(), 900);

    let letters = texts(result.column("letter").unwrap());
    let nums = texts(result.column("num").unwrap());
    let values = ints(result.column("value").unwrap());

    let check = |key_of: &dyn Fn(usize) -> String, sum_col: &str, rn_col: &str| {
        let mut groups: HashMap<String, Vec<i64>> = HashMap::new();
        for i in 0..values.len() {
            groups.entry(key_of(i)).or_default().push(values[i]);
        }
        let sums = ints(result.column(sum_col).unwrap());
        let row_numbers = ints(result.column(rn_col).unwrap());
        for i in 0..values.len() {
            let group = &groups[&key_of(i)];
            assert_eq!(sums[i], group.iter().sum::<i64>(), "{} row {}", sum_col, i);
            // Values are distinct, so the row number is 1 + the count of smaller values
            let expected_rank = group.iter().filter(|&&v| v < values[i]).count() as i64 + 1;
            assert_eq!(row_numbers[i], expected_rank, "{} row {}", rn_col, i);
        }
    };

    check(&|i| letters[i].clone(), "letter_sum", "letter_row_number");
    check(&|i| nums[i].clone(), "num_sum", "num_row_number");
    check(
        &|i| format!("{}{}", letters[i], nums[i]),
        "combined_sum",
        "combined_row_number",
    );
}

// =============================================================================
// Aggregates over composite and single keys
// =============================================================================

#[test]
fn test_multi_window_agg_functions() {
    let table = Table::from_rows(
        &["category", "group", "value"],
        vec![
            row!["A", 1, 15],
            row!["A", 1, 25],
            row!["A", 2, 35],
            row!["A", 2, 45],
            row!["B", 1, 55],
            row!["B", 1, 65],
            row!["B", 2, 75],
            row!["B", 2, 85],
        ],
    )
    .unwrap();

    let multi = Window::new()
        .partition_by(["category", "group"])
        .order_by("value", false)
        .unwrap();
    let single = Window::new()
        .partition_by("category")
        .order_by("value", false)
        .unwrap();

    let result = table
        .with_window_columns(&[
            col("value").sum().over(&multi).unwrap().alias("sum_multi"),
            col("value").mean().over(&multi).unwrap().alias("avg_multi"),
            col("value").min().over(&single).unwrap().alias("min_single"),
            col("value").max().over(&single).unwrap().alias("max_single"),
            row_number().over(&multi).unwrap().alias("multi_row_number"),
            row_number().over(&single).unwrap().alias("single_row_number"),
        ])
        .unwrap();

    assert_eq!(
        ints(result.column("sum_multi").unwrap()),
        vec![40, 40, 80, 80, 120, 120, 160, 160]
    );
    let avg: Vec<f64> = result
        .column("avg_multi")
        .unwrap()
        .values()
        .iter()
        .map(|v| v.as_float64().unwrap())
        .collect();
    let expected_avg = [20.0, 20.0, 40.0, 40.0, 60.0, 60.0, 80.0, 80.0];
    for (actual, expected) in avg.iter().zip(expected_avg) {
        assert!((actual - expected).abs() < 1e-10);
    }
    assert_eq!(
        ints(result.column("min_single").unwrap()),
        vec![15, 15, 15, 15, 55, 55, 55, 55]
    );
    assert_eq!(
        ints(result.column("max_single").unwrap()),
        vec![45, 45, 45, 45, 85, 85, 85, 85]
    );
    assert_eq!(
        ints(result.column("multi_row_number").unwrap()),
        vec![1, 2, 1, 2, 1, 2, 1, 2]
    );
    assert_eq!(
        ints(result.column("single_row_number").unwrap()),
        vec![1, 2, 3, 4, 1, 2, 3, 4]
    );
}

#[test]
fn test_aggregate_ignores_order_by() {
    let table = sales_table();
    let ordered = Window::new()
        .partition_by("category")
        .order_by("sales", true)
        .unwrap();
    let unordered = Window::new().partition_by("category");

    let result = table
        .with_window_columns(&[
            col("sales").sum().over(&ordered).unwrap().alias("a"),
            col("sales").sum().over(&unordered).unwrap().alias("b"),
        ])
        .unwrap();
    assert_eq!(result.column("a").unwrap().values(), result.column("b").unwrap().values());
    assert_eq!(
        ints(result.column("a").unwrap()),
        vec![350, 350, 350, 900, 900, 900, 400, 400]
    );
}

#[test]
fn test_count_and_nulls_in_aggregates() {
    let table = Table::new(vec![
        Column::from_values("k", ["A", "A", "A", "B"]),
        Column::new(
            "v",
            vec![
                Value::integer(10),
                Value::null_unknown(),
                Value::integer(20),
                Value::null_unknown(),
            ],
        ),
    ])
    .unwrap();
    let w = Window::new().partition_by("k");

    let result = table
        .with_window_columns(&[
            col("v").count().over(&w).unwrap().alias("n"),
            col("v").sum().over(&w).unwrap().alias("total"),
            col("v").mean().over(&w).unwrap().alias("avg"),
        ])
        .unwrap();

    assert_eq!(ints(result.column("n").unwrap()), vec![2, 2, 2, 0]);
    let total = result.column("total").unwrap().values();
    assert_eq!(total[0], Value::integer(30));
    assert!(total[3].is_null());
    let avg = result.column("avg").unwrap().values();
    assert_eq!(avg[1], Value::float(15.0));
    assert!(avg[3].is_null());
}

#[test]
fn test_float_sum() {
    let table = Table::new(vec![
        Column::from_values("k", ["x", "y", "x"]),
        Column::from_values("v", [1.5f64, 2.0, 2.25]),
    ])
    .unwrap();
    let w = Window::new().partition_by("k");
    let result = table
        .with_window_columns(&[col("v").sum().over(&w).unwrap().alias("s")])
        .unwrap();
    assert_eq!(
        result.column("s").unwrap().values(),
        &[Value::float(3.75), Value::float(2.0), Value::float(3.75)]
    );
}

// =============================================================================
// Multi-key ORDER BY
// =============================================================================

#[test]
fn test_multi_ordering_combinations() {
    let mut rng = StdRng::seed_from_u64(42);
    let all_points: Vec<(i64, i64)> = (0..10).flat_map(|x| (0..10).map(move |y| (x, y))).collect();

    let mut rows = Vec::new();
    for group in ["A", "B", "C"] {
        let mut points = all_points.clone();
        points.shuffle(&mut rng);
        for &(x, y) in &points[..10] {
            rows.push(row![group, x, y]);
        }
    }
    let table = Table::from_rows(&["group", "x", "y"], rows).unwrap();

    let groups = texts(table.column("group").unwrap());
    let xs = ints(table.column("x").unwrap());
    let ys = ints(table.column("y").unwrap());

    for (primary, secondary) in [("x", "y"), ("y", "x")] {
        for primary_desc in [false, true] {
            for secondary_desc in [false, true] {
                let window = Window::new()
                    .partition_by("group")
                    .order_by([primary, secondary], [primary_desc, secondary_desc])
                    .unwrap();
                let out = table
                    .with_window_columns(&[row_number().over(&window).unwrap().alias("rn")])
                    .unwrap();
                let row_numbers = ints(out.column("rn").unwrap());

                // Reference: sort each group's points by signed keys
                let key = |i: usize| {
                    let (p, s) = if primary == "x" {
                        (xs[i], ys[i])
                    } else {
                        (ys[i], xs[i])
                    };
                    (
                        if primary_desc { -p } else { p },
                        if secondary_desc { -s } else { s },
                        i,
                    )
                };
                for group in ["A", "B", "C"] {
                    let mut members: Vec<usize> =
                        (0..groups.len()).filter(|&i| groups[i] == group).collect();
                    members.sort_by_key(|&i| key(i));
                    for (pos, &i) in members.iter().enumerate() {
                        assert_eq!(
                            row_numbers[i],
                            pos as i64 + 1,
                            "group {} order {} {} / {} {}",
                            group,
                            primary,
                            if primary_desc { "desc" } else { "asc" },
                            secondary,
                            if secondary_desc { "desc" } else { "asc" }
                        );
                    }
                }
            }
        }
    }
}

#[test]
fn test_aggregate_cells_match_float_column_type() {
    // Partition A holds only integer cells of a FLOAT column
    let table = Table::new(vec![
        Column::from_values("k", ["A", "A", "B"]),
        Column::new(
            "v",
            vec![Value::integer(1), Value::integer(2), Value::float(0.5)],
        ),
    ])
    .expect("Failed to create table");
    assert_eq!(table.column("v").unwrap().data_type(), DataType::Float);

    let window = Window::new().partition_by("k");
    let out = table
        .with_window_columns(&[
            col("v").sum().over(&window).unwrap().alias("total"),
            col("v").min().over(&window).unwrap().alias("lowest"),
        ])
        .unwrap();

    for name in ["total", "lowest"] {
        let column = out.column(name).unwrap();
        assert_eq!(column.data_type(), DataType::Float);
        for value in column.values() {
            assert_eq!(value.data_type(), DataType::Float, "{} cell {:?}", name, value);
        }
    }
    let totals: Vec<f64> = out
        .column("total")
        .unwrap()
        .values()
        .iter()
        .map(|v| v.as_float64().unwrap())
        .collect();
    assert_eq!(totals, vec![3.0, 3.0, 0.5]);
}

#[test]
fn test_integer_column_sum_stays_integer() {
    let table = Table::new(vec![Column::from_values("v", [1i64, 2, 3])]).unwrap();
    let out = table
        .with_window_columns(&[col("v").sum().over(&Window::new()).unwrap().alias("total")])
        .unwrap();
    let total = out.column("total").unwrap();
    assert_eq!(total.data_type(), DataType::Integer);
    assert_eq!(total.values()[0], Value::integer(6));
    assert_eq!(total.values()[0].data_type(), DataType::Integer);
}
