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

/// The hard failures of row views. Each of them is detected before any
/// element is written.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ViewError {
    /// A row at or beyond the number of rows was requested
    #[error("Invalid row access index: row {index} requested from a matrix with {rows} rows")]
    InvalidIndex {
        /// The requested row
        index: usize,
        /// Rows in the matrix
        rows: usize,
    },

    /// The right-hand side of an assignment has a different length
    #[error("Vector sizes do not match: expected {expected} elements, found {found}")]
    SizeMismatch {
        /// The length of the destination
        expected: usize,
        /// The length of the source
        found: usize,
    },

    /// An element beyond the end of the row was requested through a
    /// checked accessor
    #[error("Invalid element access index: element {index} requested from a row of {size} elements")]
    OutOfBounds {
        /// The requested element
        index: usize,
        /// The length of the row
        size: usize,
    },
}
