/*
MIT License
Copyright (c) 2021 Germán Molina
Permission is hereby granted, free of charge, to any person obtaining a copy
of this software and associated documentation files (the "Software"), to deal
in the Software without restriction, including without limitation the rights
to use, copy, modify, merge, publish, distribute, sublicense, and/or sell
copies of the Software, and to permit persons to whom the Software is
furnished to do so, subject to the following conditions:
The above copyright notice and this permission notice shall be included in all
copies or substantial portions of the Software.
THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE
SOFTWARE.
*/

use crate::simd::Intrinsic;
use serde::{Deserialize, Serialize};

/// A trait that defines the `zero()` and `one()` values of a type
pub trait OneZero {
    /// Returns the zero value (i.e., the value of a default element)
    fn zero() -> Self;

    /// Returns the one value
    fn one() -> Self;
}

macro_rules! one_zero {
    ( $( $t : ty ),* ) => {
        $(
            impl OneZero for $t {
                fn zero() -> Self {
                    0 as $t
                }
                fn one() -> Self {
                    1 as $t
                }
            }
        )*
    };
}

one_zero!(f32, f64, i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

/// Define the basic algebraic requirements for T
pub trait Numberish:
    Copy
    + Clone
    + OneZero
    + PartialEq
    + Sized
    + std::fmt::Display
    + std::fmt::Debug
    + std::ops::Add<Output = Self>
    + std::ops::Sub<Output = Self>
    + std::ops::AddAssign
    + std::ops::SubAssign
    + std::ops::Mul<Output = Self>
    + std::ops::MulAssign
    + std::ops::Div<Output = Self>
    + std::ops::DivAssign
    + Sync
    + Send
    + Serialize
    + Intrinsic
{
    /// Checks whether the element is in its default (i.e., zero) state
    fn is_default(self) -> bool {
        self == Self::zero()
    }

    /// Checks whether the element is not-a-number. Only floating point
    /// types can ever return `true`.
    #[allow(clippy::eq_op)]
    fn is_nan(self) -> bool {
        self != self
    }
}
impl<
        T: OneZero
            + Copy
            + Clone
            + PartialEq
            + Sized
            + std::fmt::Display
            + std::fmt::Debug
            + std::ops::Add<Output = Self>
            + std::ops::Sub<Output = Self>
            + std::ops::AddAssign
            + std::ops::SubAssign
            + std::ops::Mul<Output = Self>
            + std::ops::MulAssign
            + std::ops::Div<Output = Self>
            + std::ops::DivAssign
            + Sync
            + Send
            + Serialize
            + Intrinsic,
    > Numberish for T
{
}

/// The physical layout of a matrix
pub trait StorageOrder:
    Copy + Clone + Default + PartialEq + Eq + std::fmt::Debug + Send + Sync + 'static
{
    /// `true` if the elements of a row are contiguous in memory
    const ROW_MAJOR: bool;

    /// The number of contiguous runs (i.e., rows for row-major
    /// and columns for column-major matrices)
    fn major(nrows: usize, ncols: usize) -> usize {
        if Self::ROW_MAJOR {
            nrows
        } else {
            ncols
        }
    }

    /// The length of each contiguous run
    fn minor(nrows: usize, ncols: usize) -> usize {
        if Self::ROW_MAJOR {
            ncols
        } else {
            nrows
        }
    }

    /// Index of element `nrow,ncol` when each run is `spacing` elements apart
    fn index(nrow: usize, ncol: usize, spacing: usize) -> usize {
        if Self::ROW_MAJOR {
            nrow * spacing + ncol
        } else {
            ncol * spacing + nrow
        }
    }
}

/// Rows are stored contiguously
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RowMajor;

impl StorageOrder for RowMajor {
    const ROW_MAJOR: bool = true;
}

/// Columns are stored contiguously
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnMajor;

impl StorageOrder for ColumnMajor {
    const ROW_MAJOR: bool = false;
}
