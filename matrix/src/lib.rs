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

#![deny(missing_docs)]

//! Storage containers and element capabilities for row views.
//!
//! It is built generically (i.e., `DynamicMatrix<T: Numberish>` where `Numberish` is a
//! basic numeric Trait) so that the same containers can hold `f64`, `i32`, `u8` or
//! any structure to which numeric operations apply. The containers expose their rows
//! through the [`RowStorage`] and [`RowStorageMut`] contracts, which is all that a
//! row view needs from them.

/// The kind of floating point number used in the
/// library... the `"float"` feature means it becomes `f32`
/// and `f64` is used otherwise.
#[cfg(feature = "float")]
pub type Float = f32;

/// The kind of floating point number used in the
/// library... the `"float"` feature means it becomes `f32`
/// and `f64` is used otherwise.
#[cfg(not(feature = "float"))]
pub type Float = f64;

/// Element capabilities (numeric requirements and storage orders)
pub mod traits;
pub use traits::{ColumnMajor, Numberish, OneZero, RowMajor, StorageOrder};

/// Lane widths and non-temporal stores
pub mod simd;
pub use simd::Intrinsic;

/// The contract a container must satisfy to be viewed by rows
pub mod storage;
pub use storage::{ContiguousRows, RowStorage, RowStorageMut};

mod error;
pub use error::MatrixError;

/// Dense, resizable matrices
pub mod dynamic_matrix;
pub use dynamic_matrix::DynamicMatrix;

/// Dense, resizable vectors
pub mod dynamic_vector;
pub use dynamic_vector::DynamicVector;

/// Dense vectors with a size known at compile time
pub mod static_vector;
pub use static_vector::StaticVector;

/// Sparse vectors
pub mod compressed_vector;
pub use compressed_vector::CompressedVector;

/// Sparse matrices in compressed-row form
pub mod compressed_matrix;
pub use compressed_matrix::CompressedMatrix;

/// A shorthand for `DynamicMatrix<Float>`; i.e., a normal row-major
/// matrix. Note that `Float` is defined as `f32` if the feature `float`
/// is utilized; otherwise, it defauts to `f64`.
pub type Matrix = DynamicMatrix<Float>;

/// A shorthand for `DynamicVector<Float>`.
pub type Vector = DynamicVector<Float>;
