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

//! Views of a single row of a matrix.
//!
//! A [`DenseRow`] borrows a matrix and remembers the index of one of its
//! rows; it does not own or copy any element. Views are obtained through
//! [`row`] (read-only) and [`row_mut`] (which requires exclusive access
//! to the matrix for as long as the view, and its copies, live).
//!
//! ```
//! use rowview::matrix::{DynamicMatrix, DynamicVector};
//! use rowview::row_mut;
//!
//! let mut a: DynamicMatrix<f64> = DynamicMatrix::new(0., 4, 3);
//! let r = row_mut(&mut a, 1).unwrap();
//! r.assign(&DynamicVector::from(vec![1., 2., 3.])).unwrap();
//! r.assign_add(&DynamicVector::new(1., 3)).unwrap();
//! assert_eq!(r.to_vector().as_slice(), &[2., 3., 4.]);
//! ```

use crate::alias::address_of;
use crate::error::ViewError;
use crate::expr::VectorExpr;
use matrix::{ContiguousRows, DynamicVector, Numberish, RowStorage, RowStorageMut, StorageOrder};
use std::marker::PhantomData;

mod assign;
mod iter;
mod ops;
pub use iter::{RowIter, RowIterMut};

/// Marks views through which elements can only be read
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReadOnly;

/// Marks views through which elements can be read and written
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReadWrite;

/// A view of row `index` of a matrix of type `C`.
///
/// Copying a view is cheap and shares the matrix and the row; it never
/// copies elements. `A` is either [`ReadOnly`] or [`ReadWrite`].
pub struct DenseRow<'a, C: RowStorage, A = ReadWrite> {
    matrix: &'a C,
    row: usize,
    access: PhantomData<A>,
}

impl<C: RowStorage, A> Clone for DenseRow<'_, C, A> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<C: RowStorage, A> Copy for DenseRow<'_, C, A> {}

impl<C: RowStorage, A> std::fmt::Debug for DenseRow<'_, C, A> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DenseRow")
            .field("row", &self.row)
            .field("elements", &self.iter().collect::<Vec<_>>())
            .finish()
    }
}

impl<C: RowStorage, A> std::fmt::Display for DenseRow<'_, C, A> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "(")?;
        for (j, v) in self.iter().enumerate() {
            if j > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", v)?;
        }
        write!(f, ")")
    }
}

/// Returns a read-only view of row `index` of `matrix`
pub fn row<C: RowStorage>(matrix: &C, index: usize) -> Result<DenseRow<'_, C, ReadOnly>, ViewError> {
    DenseRow::new(matrix, index)
}

/// Returns a view of row `index` of `matrix` through which the row can be
/// written. The matrix stays borrowed for as long as the view (or any
/// view derived from it) is alive.
pub fn row_mut<C: RowStorageMut>(
    matrix: &mut C,
    index: usize,
) -> Result<DenseRow<'_, C, ReadWrite>, ViewError> {
    DenseRow::new(&*matrix, index)
}

impl<'a, C: RowStorage, A> DenseRow<'a, C, A> {
    fn new(matrix: &'a C, index: usize) -> Result<Self, ViewError> {
        let rows = matrix.rows();
        if index >= rows {
            return Err(ViewError::InvalidIndex { index, rows });
        }
        log::trace!(target: "rowview", "viewing row {} of a matrix with {} rows", index, rows);
        Ok(Self {
            matrix,
            row: index,
            access: PhantomData,
        })
    }

    /// The index of the row within its matrix
    pub fn index(&self) -> usize {
        self.row
    }

    /// The number of elements (i.e., columns of the matrix)
    pub fn size(&self) -> usize {
        self.matrix.columns()
    }

    /// The matrix this row belongs to
    pub fn matrix(&self) -> &'a C {
        self.matrix
    }

    /// The number of elements the row can hold. Rows of column-major
    /// matrices have no slack.
    pub fn capacity(&self) -> usize {
        if <C::Order as StorageOrder>::ROW_MAJOR {
            self.matrix.capacity(self.row)
        } else {
            self.size()
        }
    }

    /// The number of elements that are not zero
    pub fn non_zeros(&self) -> usize {
        if <C::Order as StorageOrder>::ROW_MAJOR {
            self.matrix.non_zeros(self.row)
        } else {
            self.iter().filter(|v| !v.is_default()).count()
        }
    }

    /// Reads element `j`.
    ///
    /// Panics if `j` is beyond the end of the row. Debug builds check here;
    /// release builds leave it to the matrix, which panics rather than
    /// read another row. [`DenseRow::try_get`] reports the error instead.
    pub fn get(&self, j: usize) -> C::Elem {
        debug_assert!(j < self.size(), "Invalid row access index");
        self.matrix.at(self.row, j)
    }

    /// Reads element `j`, failing if it is beyond the end of the row
    pub fn try_get(&self, j: usize) -> Result<C::Elem, ViewError> {
        let size = self.size();
        if j >= size {
            return Err(ViewError::OutOfBounds { index: j, size });
        }
        Ok(self.matrix.at(self.row, j))
    }

    /// Iterates the elements, by increasing column
    pub fn iter(&self) -> RowIter<'a, C> {
        RowIter::new(self.matrix, self.row, 0, self.size())
    }

    /// Whether every element is zero
    pub fn is_default(&self) -> bool {
        self.iter().all(|v| v.is_default())
    }

    /// Whether any element is not-a-number
    pub fn is_nan(&self) -> bool {
        self.iter().any(|v| v.is_nan())
    }

    /// Copies the elements into a new vector
    pub fn to_vector(&self) -> DynamicVector<C::Elem> {
        self.iter().collect()
    }

    /// A read-only copy of this view
    pub fn as_read_only(&self) -> DenseRow<'a, C, ReadOnly> {
        DenseRow {
            matrix: self.matrix,
            row: self.row,
            access: PhantomData,
        }
    }

    /// Whether both views look at the same row of the same matrix
    pub fn same_row<A2>(&self, other: &DenseRow<'_, C, A2>) -> bool {
        address_of(self.matrix) == address_of(other.matrix) && self.row == other.row
    }
}

impl<'a, C: ContiguousRows, A> DenseRow<'a, C, A> {
    /// The address of the first element. Elements are contiguous.
    pub fn as_ptr(&self) -> *const C::Elem {
        self.matrix.row_ptr(self.row)
    }
}

impl<C: RowStorage, A> VectorExpr for DenseRow<'_, C, A> {
    type Elem = C::Elem;
    type Result = DynamicVector<C::Elem>;
    const VECTORIZABLE: bool = C::VECTORIZABLE && <C::Order as StorageOrder>::ROW_MAJOR;
    const IS_ROW: bool = true;

    fn size(&self) -> usize {
        self.matrix.columns()
    }

    fn at(&self, i: usize) -> C::Elem {
        self.matrix.at(self.row, i)
    }

    fn can_alias(&self, addr: *const ()) -> bool {
        address_of(self.matrix) == addr
    }

    fn viewed_row(&self) -> Option<(*const (), usize)> {
        Some((address_of(self.matrix), self.row))
    }
}

impl<C, A, E> PartialEq<E> for DenseRow<'_, C, A>
where
    C: RowStorage,
    E: VectorExpr<Elem = C::Elem>,
{
    fn eq(&self, other: &E) -> bool {
        self.size() == other.size() && (0..self.size()).all(|j| self.get(j) == other.at(j))
    }
}
