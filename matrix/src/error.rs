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

use thiserror::Error;

/// Errors reported by the containers of this crate
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MatrixError {
    /// An element outside of the container was requested
    #[error("Row or Column out of bounds: element ({row}, {col}) requested from a {nrows}x{ncols} container")]
    OutOfBounds {
        /// The requested row
        row: usize,
        /// The requested column
        col: usize,
        /// Rows in the container
        nrows: usize,
        /// Columns in the container
        ncols: usize,
    },

    /// The operands of an operation are of incompatible sizes
    #[error("Size mismatch when {operation}: expected {expected} elements, found {found}")]
    SizeMismatch {
        /// What was being done
        operation: &'static str,
        /// The size the operation needed
        expected: usize,
        /// The size it got
        found: usize,
    },

    /// Sparse entries were given out of order
    #[error("Index {index} was appended after index {last}; sparse entries must be strictly increasing")]
    UnsortedIndex {
        /// The offending index
        index: usize,
        /// The last index stored
        last: usize,
    },
}
