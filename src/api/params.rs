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

//! Argument conversion for the window builder
//!
//! `partition_by` and `order_by` accept a single column or a list of columns,
//! and `order_by` accepts a single descending flag or one flag per column.
//!
//! # Examples
//!
//! ```
//! use partwin::api::Window;
//!
//! // Single column, single flag
//! let w = Window::new().partition_by("category").order_by("sales", true)?;
//!
//! // Lists, one flag for every column
//! let w = Window::new().partition_by(["a", "b"]).order_by(vec!["x", "y"], false)?;
//!
//! // Tuples, one flag per column
//! let w = Window::new().order_by(("x", "y"), (false, true))?;
//! # Ok::<(), partwin::Error>(())
//! ```

/// Trait for types that name a single column
pub trait ToColumnName {
    /// Convert self into a column name
    fn to_column_name(&self) -> String;
}

impl ToColumnName for &str {
    fn to_column_name(&self) -> String {
        (*self).to_string()
    }
}

impl ToColumnName for String {
    fn to_column_name(&self) -> String {
        self.clone()
    }
}

impl ToColumnName for &String {
    fn to_column_name(&self) -> String {
        (*self).clone()
    }
}

/// Trait for column list arguments
pub trait IntoColumns {
    /// Convert self into column names, in order
    fn into_columns(self) -> Vec<String>;
}

impl IntoColumns for () {
    fn into_columns(self) -> Vec<String> {
        Vec::new()
    }
}

impl IntoColumns for &str {
    fn into_columns(self) -> Vec<String> {
        vec![self.to_string()]
    }
}

impl IntoColumns for String {
    fn into_columns(self) -> Vec<String> {
        vec![self]
    }
}

impl<T: ToColumnName> IntoColumns for Vec<T> {
    fn into_columns(self) -> Vec<String> {
        self.iter().map(ToColumnName::to_column_name).collect()
    }
}

impl<T: ToColumnName> IntoColumns for &[T] {
    fn into_columns(self) -> Vec<String> {
        self.iter().map(ToColumnName::to_column_name).collect()
    }
}

impl<T: ToColumnName, const N: usize> IntoColumns for [T; N] {
    fn into_columns(self) -> Vec<String> {
        self.iter().map(ToColumnName::to_column_name).collect()
    }
}

// Tuple implementations for 1-8 columns
macro_rules! impl_columns_for_tuple {
    ($($idx:tt: $T:ident),+) => {
        impl<$($T: ToColumnName),+> IntoColumns for ($($T,)+) {
            fn into_columns(self) -> Vec<String> {
                vec![$(self.$idx.to_column_name()),+]
            }
        }
    };
}

impl_columns_for_tuple!(0: T0);
impl_columns_for_tuple!(0: T0, 1: T1);
impl_columns_for_tuple!(0: T0, 1: T1, 2: T2);
impl_columns_for_tuple!(0: T0, 1: T1, 2: T2, 3: T3);
impl_columns_for_tuple!(0: T0, 1: T1, 2: T2, 3: T3, 4: T4);
impl_columns_for_tuple!(0: T0, 1: T1, 2: T2, 3: T3, 4: T4, 5: T5);
impl_columns_for_tuple!(0: T0, 1: T1, 2: T2, 3: T3, 4: T4, 5: T5, 6: T6);
impl_columns_for_tuple!(0: T0, 1: T1, 2: T2, 3: T3, 4: T4, 5: T5, 6: T6, 7: T7);

/// Trait for sort direction arguments (`true` = descending)
pub trait IntoDirections {
    /// Expand into one flag per column
    ///
    /// A single flag applies to all `column_count` columns; a list is taken
    /// as-is and its length is checked by the caller.
    fn into_directions(self, column_count: usize) -> Vec<bool>;
}

impl IntoDirections for bool {
    fn into_directions(self, column_count: usize) -> Vec<bool> {
        vec![self; column_count]
    }
}

impl IntoDirections for Vec<bool> {
    fn into_directions(self, _column_count: usize) -> Vec<bool> {
        self
    }
}

impl IntoDirections for &[bool] {
    fn into_directions(self, _column_count: usize) -> Vec<bool> {
        self.to_vec()
    }
}

impl<const N: usize> IntoDirections for [bool; N] {
    fn into_directions(self, _column_count: usize) -> Vec<bool> {
        self.to_vec()
    }
}

macro_rules! impl_directions_for_tuple {
    ($($idx:tt => $B:ty),+) => {
        impl IntoDirections for ($($B,)+) {
            fn into_directions(self, _column_count: usize) -> Vec<bool> {
                vec![$(self.$idx),+]
            }
        }
    };
}

impl_directions_for_tuple!(0 => bool, 1 => bool);
impl_directions_for_tuple!(0 => bool, 1 => bool, 2 => bool);
impl_directions_for_tuple!(0 => bool, 1 => bool, 2 => bool, 3 => bool);
