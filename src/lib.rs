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

//! Views of single rows of dense and sparse matrices that can be read,
//! written and combined with vectors as if they were vectors themselves.
//!
//! A row view ([`DenseRow`]) borrows a matrix; it does not copy it. Writing
//! an expression into a row (e.g., `row = row * matrix`) checks the sizes
//! first, then evaluates the expression into a temporary if it might read
//! from the matrix being written, and finally writes it with the fastest
//! loop available for the layout of the matrix and the type of its
//! elements (see [`dispatch`]).
//!
//! ```
//! use rowview::matrix::DynamicMatrix;
//! use rowview::{row, row_mut};
//!
//! let mut a: DynamicMatrix<f64> = DynamicMatrix::from_data(2, 2, vec![1., 2., 3., 4.]);
//! let r = row_mut(&mut a, 0).unwrap();
//! r.assign(r * r.matrix()).unwrap();
//! assert_eq!(row(&a, 0).unwrap().to_vector().as_slice(), &[7., 10.]);
//! ```
//!
//! Out-of-bounds element access through [`DenseRow::get`] and
//! [`DenseRow::set`] panics. Debug builds check in the view; release
//! builds rely on the matrix, and the containers of [`matrix`] panic
//! rather than touch another row. [`DenseRow::try_get`] and
//! [`DenseRow::try_set`] return an error instead. Division of a row by
//! zero is only detected in debug builds.

pub use matrix;
pub use matrix::Float;

mod error;
pub use error::ViewError;

/// Expressions that can be written into rows
pub mod expr;
pub use expr::{dot, Materialize, RowMatProd, VecAdd, VecDiv, VecMul, VecScale, VecSub, VectorExpr};

/// Row views
pub mod row;
pub use row::{row, row_mut, DenseRow, ReadOnly, ReadWrite, RowIter, RowIterMut};

/// The loops that write into rows
pub mod dispatch;
pub use dispatch::{Op, Strategy};

mod alias;

/// The types that result from combining vectors, rows and matrices
pub mod type_traits;
pub use type_traits::{AddResult, AddType, IsRow, MulResult, MulType, SubResult, SubType};
