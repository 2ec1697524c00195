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

//! A row view does not own any data: everything it reads and writes goes
//! through these traits. Indices passed to `capacity`, `non_zeros` and
//! `reset` address a row in row-major storage and a column in column-major
//! storage (i.e., one contiguous run of elements).

use crate::traits::{Numberish, RowMajor, StorageOrder};
use std::cell::Cell;

/// A container whose elements can be read row by row.
pub trait RowStorage {
    /// The type of the elements
    type Elem: Numberish;

    /// The physical layout
    type Order: StorageOrder;

    /// Whether the rows of this container can take part in bulk
    /// (i.e., lane-wise) loops
    const VECTORIZABLE: bool;

    /// Number of rows
    fn rows(&self) -> usize;

    /// Number of columns
    fn columns(&self) -> usize;

    /// Reads element `i,j`. Callers are expected to stay within
    /// bounds; implementations may panic otherwise.
    fn at(&self, i: usize, j: usize) -> Self::Elem;

    /// The number of elements allocated for the `i`th contiguous run
    fn capacity(&self, i: usize) -> usize;

    /// The number of non-default elements in the `i`th contiguous run
    fn non_zeros(&self, i: usize) -> usize;
}

/// A container whose elements can be written through a shared reference.
///
/// Writes use interior mutability, so a right-hand side that reads the
/// container may coexist with a view that writes into it. Containers
/// implementing this trait are therefore not `Sync`.
pub trait RowStorageMut: RowStorage {
    /// Writes element `i,j`. Callers are expected to stay within
    /// bounds; implementations must panic otherwise, never write
    /// elsewhere.
    fn store(&self, i: usize, j: usize, v: Self::Elem);

    /// The cell holding element `i,j`, with the same bounds rules as
    /// [`RowStorageMut::store`]
    fn cell(&self, i: usize, j: usize) -> &Cell<Self::Elem>;

    /// Sets every element of the `i`th contiguous run to zero
    fn reset(&self, i: usize);

    /// The elements of row `i`, if they are contiguous
    fn cells(&self, i: usize) -> Option<&[Cell<Self::Elem>]>;
}

/// A row-major container whose rows can be accessed as slices.
pub trait ContiguousRows: RowStorageMut<Order = RowMajor> {
    /// The elements of row `i`
    fn row_cells(&self, i: usize) -> &[Cell<Self::Elem>];

    /// A pointer to the first element of row `i`. The next `columns()`
    /// elements belong to the same row.
    fn row_ptr(&self, i: usize) -> *const Self::Elem {
        self.row_cells(i).as_ptr().cast::<Self::Elem>()
    }
}
