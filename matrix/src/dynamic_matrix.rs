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

use crate::error::MatrixError;
use crate::storage::{ContiguousRows, RowStorage, RowStorageMut};
use crate::traits::{Numberish, RowMajor, StorageOrder};
use serde::{Deserialize, Serialize};
use std::cell::Cell;
use std::marker::PhantomData;

/// The main Structure in this library: a dense matrix whose elements are
/// stored either row by row (`O = RowMajor`, the default) or column by
/// column (`O = ColumnMajor`).
///
/// Each contiguous run (a row in row-major matrices) is padded to a
/// multiple of the lane width of `T`, so bulk loops always start on a
/// fresh register. Padding elements are always zero.
#[derive(Debug, Clone, PartialEq)]
pub struct DynamicMatrix<T: Numberish, O: StorageOrder = RowMajor> {
    pub(crate) nrows: usize,
    pub(crate) ncols: usize,

    // Distance between the first elements of two consecutive runs
    pub(crate) spacing: usize,

    pub(crate) data: Vec<Cell<T>>,
    order: PhantomData<O>,
}

/// What gets serialized: the logical elements, row by row, with no
/// padding. The storage order is part of the type.
#[derive(Serialize, Deserialize)]
struct MatrixData<T> {
    nrows: usize,
    ncols: usize,
    data: Vec<T>,
}

impl<T: Numberish, O: StorageOrder> Serialize for DynamicMatrix<T, O> {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        MatrixData {
            nrows: self.nrows,
            ncols: self.ncols,
            data: self.to_row_major_vec(),
        }
        .serialize(serializer)
    }
}

impl<'de, T, O> Deserialize<'de> for DynamicMatrix<T, O>
where
    T: Numberish + Deserialize<'de>,
    O: StorageOrder,
{
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let MatrixData { nrows, ncols, data } = MatrixData::<T>::deserialize(deserializer)?;
        Self::try_from_data(nrows, ncols, data).map_err(serde::de::Error::custom)
    }
}

impl<T: Numberish, O: StorageOrder> Default for DynamicMatrix<T, O> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<T: Numberish, O: StorageOrder> std::fmt::Display for DynamicMatrix<T, O> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for i in 0..self.nrows {
            write!(f, "\n\t")?;
            for j in 0..self.ncols {
                write!(f, "{}, ", self.at(i, j))?;
            }
        }
        Ok(())
    }
}

impl<T: Numberish, O: StorageOrder> DynamicMatrix<T, O> {
    /// The distance between runs needed for runs of `minor` elements
    fn spacing_for(minor: usize) -> usize {
        if T::VECTORIZABLE {
            minor.div_ceil(T::LANES) * T::LANES
        } else {
            minor
        }
    }

    fn zeroed(nrows: usize, ncols: usize) -> Self {
        let spacing = Self::spacing_for(O::minor(nrows, ncols));
        let len = spacing * O::major(nrows, ncols);
        Self {
            nrows,
            ncols,
            spacing,
            data: (0..len).map(|_| Cell::new(T::zero())).collect(),
            order: PhantomData,
        }
    }

    /// Creates a `DynamicMatrix` from a vector containing the elements of the matrix,
    /// row by row (regardless of the storage order).
    ///
    /// # Panics
    /// Panics if `data.len()` is not `nrows * ncols`
    #[must_use]
    pub fn from_data(nrows: usize, ncols: usize, data: Vec<T>) -> Self {
        if nrows * ncols != data.len() {
            panic!("When creating Matrix: Number of rows (nrows = {}) and cols (ncols = {}) does not match length of data (data.len() = {})... (nrows * ncols = {})", nrows, ncols, data.len(), nrows*ncols)
        }
        let mut ret = Self::zeroed(nrows, ncols);
        ret.fill_from_row_major(&data);
        ret
    }

    /// Like [`DynamicMatrix::from_data`], but returns an error instead of panicking
    pub fn try_from_data(nrows: usize, ncols: usize, data: Vec<T>) -> Result<Self, MatrixError> {
        if nrows * ncols != data.len() {
            return Err(MatrixError::SizeMismatch {
                operation: "creating a matrix from data",
                expected: nrows * ncols,
                found: data.len(),
            });
        }
        let mut ret = Self::zeroed(nrows, ncols);
        ret.fill_from_row_major(&data);
        Ok(ret)
    }

    fn fill_from_row_major(&mut self, data: &[T]) {
        if self.ncols == 0 {
            return;
        }
        for (i, row) in data.chunks_exact(self.ncols).enumerate() {
            for (j, v) in row.iter().enumerate() {
                let index = self.index(i, j);
                *self.data[index].get_mut() = *v;
            }
        }
    }

    /// Creates a `DynamicMatrix` of `nrows` and `ncols` full of values `v`
    #[must_use]
    pub fn new(v: T, nrows: usize, ncols: usize) -> Self {
        let mut ret = Self::zeroed(nrows, ncols);
        for i in 0..nrows {
            for j in 0..ncols {
                let index = ret.index(i, j);
                *ret.data[index].get_mut() = v;
            }
        }
        ret
    }

    /// Creates an Identity matrix of size NxN
    #[must_use]
    pub fn eye(n: usize) -> Self {
        let mut ret = Self::zeroed(n, n);
        for i in 0..n {
            let index = ret.index(i, i);
            *ret.data[index].get_mut() = T::one();
        }
        ret
    }

    /// Creates an empty Matrix (i.e., size 0x0)
    #[must_use]
    pub fn empty() -> Self {
        Self {
            nrows: 0,
            ncols: 0,
            spacing: 0,
            data: Vec::with_capacity(0),
            order: PhantomData,
        }
    }

    /// Checks whether a Matrix has Zero columns and Zero rows
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nrows == 0 && self.ncols == 0
    }

    /// Returns a tuple with number of rows and columns
    pub fn size(&self) -> (usize, usize) {
        (self.nrows, self.ncols)
    }

    /// Gets the index of an element within the `data` array of the Matrix
    pub(crate) fn index(&self, nrow: usize, ncol: usize) -> usize {
        O::index(nrow, ncol, self.spacing)
    }

    /// Element `nrow,ncol`, looked up within its run so that an index
    /// beyond the end panics instead of landing in the padding or in the
    /// next run
    fn element(&self, nrow: usize, ncol: usize) -> &Cell<T> {
        if O::ROW_MAJOR {
            &self.run(nrow)[ncol]
        } else {
            &self.run(ncol)[nrow]
        }
    }

    /// The `i`th contiguous run, without its padding
    fn run(&self, i: usize) -> &[Cell<T>] {
        let start = i * self.spacing;
        &self.data[start..start + O::minor(self.nrows, self.ncols)]
    }

    fn check_bounds(&self, nrow: usize, ncol: usize) -> Result<usize, MatrixError> {
        if nrow < self.nrows && ncol < self.ncols {
            Ok(self.index(nrow, ncol))
        } else {
            Err(MatrixError::OutOfBounds {
                row: nrow,
                col: ncol,
                nrows: self.nrows,
                ncols: self.ncols,
            })
        }
    }

    /// Gets an element from the matrix
    pub fn get(&self, nrow: usize, ncol: usize) -> Result<T, MatrixError> {
        let i = self.check_bounds(nrow, ncol)?;
        Ok(self.data[i].get())
    }

    /// Sets an element into the matrix
    pub fn set(&mut self, nrow: usize, ncol: usize, v: T) -> Result<T, MatrixError> {
        let i = self.check_bounds(nrow, ncol)?;
        *self.data[i].get_mut() = v;
        Ok(v)
    }

    /// Adds `v` to the element in position `nrow,ncol`.
    pub fn add_to_element(&mut self, nrow: usize, ncol: usize, v: T) -> Result<(), MatrixError> {
        let i = self.check_bounds(nrow, ncol)?;
        *self.data[i].get_mut() += v;
        Ok(())
    }

    /// Multiplies the element in position `nrow,ncol` by `v`.
    pub fn scale_element(&mut self, nrow: usize, ncol: usize, v: T) -> Result<(), MatrixError> {
        let i = self.check_bounds(nrow, ncol)?;
        *self.data[i].get_mut() *= v;
        Ok(())
    }

    /// Changes the size of the matrix. Elements that exist in both the
    /// old and the new shape keep their values; new elements are zero.
    pub fn resize(&mut self, nrows: usize, ncols: usize) {
        let mut ret = Self::zeroed(nrows, ncols);
        for i in 0..nrows.min(self.nrows) {
            for j in 0..ncols.min(self.ncols) {
                let index = ret.index(i, j);
                *ret.data[index].get_mut() = self.at(i, j);
            }
        }
        *self = ret;
    }

    /// Copies the logical elements into a vector, row by row
    pub fn to_row_major_vec(&self) -> Vec<T> {
        let mut ret = Vec::with_capacity(self.nrows * self.ncols);
        for i in 0..self.nrows {
            for j in 0..self.ncols {
                ret.push(self.at(i, j));
            }
        }
        ret
    }

    /// Checks if two matrices are exactly the same (as in `element == other_element`... beware Floats).
    /// Matrices with different storage orders can be compared.
    pub fn compare<O2: StorageOrder>(&self, other: &DynamicMatrix<T, O2>) -> bool {
        if self.size() != other.size() {
            return false;
        }
        for i in 0..self.nrows {
            for j in 0..self.ncols {
                if self.at(i, j) != other.at(i, j) {
                    return false;
                }
            }
        }
        // return
        true
    }

    /// Multiplies a matrix by `other`, putting the result into `into`
    pub fn prod_into<O2: StorageOrder, O3: StorageOrder>(
        &self,
        other: &DynamicMatrix<T, O2>,
        into: &mut DynamicMatrix<T, O3>,
    ) -> Result<(), MatrixError> {
        if self.ncols != other.nrows {
            return Err(MatrixError::SizeMismatch {
                operation: "multiplying matrices",
                expected: self.ncols,
                found: other.nrows,
            });
        }

        if into.nrows != self.nrows || into.ncols != other.ncols {
            return Err(MatrixError::SizeMismatch {
                operation: "storing the product of two matrices",
                expected: self.nrows * other.ncols,
                found: into.nrows * into.ncols,
            });
        }

        for i in 0..self.nrows {
            for j in 0..other.ncols {
                let aux = (0..self.ncols)
                    .map(|k| self.at(i, k) * other.at(k, j))
                    .fold(T::zero(), |acc, val| acc + val);
                let index = into.index(i, j);
                *into.data[index].get_mut() = aux;
            }
        }

        // return
        Ok(())
    }
}

impl<T: Numberish, O: StorageOrder> RowStorage for DynamicMatrix<T, O> {
    type Elem = T;
    type Order = O;
    const VECTORIZABLE: bool = T::VECTORIZABLE;

    fn rows(&self) -> usize {
        self.nrows
    }

    fn columns(&self) -> usize {
        self.ncols
    }

    fn at(&self, i: usize, j: usize) -> T {
        self.element(i, j).get()
    }

    fn capacity(&self, _i: usize) -> usize {
        self.spacing
    }

    fn non_zeros(&self, i: usize) -> usize {
        self.run(i).iter().filter(|c| !c.get().is_default()).count()
    }
}

impl<T: Numberish, O: StorageOrder> RowStorageMut for DynamicMatrix<T, O> {
    fn store(&self, i: usize, j: usize, v: T) {
        self.element(i, j).set(v)
    }

    fn cell(&self, i: usize, j: usize) -> &Cell<T> {
        self.element(i, j)
    }

    fn reset(&self, i: usize) {
        self.run(i).iter().for_each(|c| c.set(T::zero()))
    }

    fn cells(&self, i: usize) -> Option<&[Cell<T>]> {
        if O::ROW_MAJOR {
            Some(self.run(i))
        } else {
            None
        }
    }
}

impl<T: Numberish> ContiguousRows for DynamicMatrix<T, RowMajor> {
    fn row_cells(&self, i: usize) -> &[Cell<T>] {
        self.run(i)
    }
}

impl<T: Numberish, O: StorageOrder, O2: StorageOrder> std::ops::Mul<&DynamicMatrix<T, O2>>
    for &DynamicMatrix<T, O>
{
    type Output = DynamicMatrix<T, O>;

    fn mul(self, other: &DynamicMatrix<T, O2>) -> Self::Output {
        let mut ret = DynamicMatrix::zeroed(self.nrows, other.ncols);
        if let Err(e) = self.prod_into(other, &mut ret) {
            panic!("{}", e)
        }
        ret
    }
}
