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
use crate::storage::RowStorage;
use crate::traits::{Numberish, RowMajor};
use serde::{Deserialize, Serialize};

/// A sparse matrix in compressed-row form. Its rows can be read (but not
/// written) through [`RowStorage`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompressedMatrix<T: Numberish> {
    nrows: usize,
    ncols: usize,

    // Entries of row `i` are in `row_starts[i]..row_starts[i + 1]`
    row_starts: Vec<usize>,
    col_indices: Vec<usize>,
    values: Vec<T>,
}

impl<T: Numberish> CompressedMatrix<T> {
    /// Creates an all-zero matrix
    #[must_use]
    pub fn new(nrows: usize, ncols: usize) -> Self {
        Self {
            nrows,
            ncols,
            row_starts: vec![0; nrows + 1],
            col_indices: Vec::new(),
            values: Vec::new(),
        }
    }

    /// Creates a matrix from `(row, column, value)` triplets, in any order.
    /// Later triplets overwrite earlier ones; default values are not stored.
    pub fn from_triplets(
        nrows: usize,
        ncols: usize,
        mut triplets: Vec<(usize, usize, T)>,
    ) -> Result<Self, MatrixError> {
        if let Some(&(row, col, _)) = triplets.iter().find(|(i, j, _)| *i >= nrows || *j >= ncols) {
            return Err(MatrixError::OutOfBounds {
                row,
                col,
                nrows,
                ncols,
            });
        }
        // Stable, so the last of several duplicates stays last
        triplets.sort_by_key(|(i, j, _)| (*i, *j));

        let mut ret = Self::new(nrows, ncols);
        let mut entries: Vec<(usize, usize, T)> = Vec::with_capacity(triplets.len());
        for t in triplets {
            match entries.last_mut() {
                Some(last) if last.0 == t.0 && last.1 == t.1 => *last = t,
                _ => entries.push(t),
            }
        }
        for (i, j, v) in entries.into_iter().filter(|(_, _, v)| !v.is_default()) {
            ret.row_starts[i + 1] += 1;
            ret.col_indices.push(j);
            ret.values.push(v);
        }
        for i in 0..nrows {
            ret.row_starts[i + 1] += ret.row_starts[i];
        }
        Ok(ret)
    }

    /// Returns a tuple with number of rows and columns
    pub fn size(&self) -> (usize, usize) {
        (self.nrows, self.ncols)
    }

    /// Gets an element from the matrix
    pub fn get(&self, nrow: usize, ncol: usize) -> Result<T, MatrixError> {
        if nrow < self.nrows && ncol < self.ncols {
            Ok(self.at(nrow, ncol))
        } else {
            Err(MatrixError::OutOfBounds {
                row: nrow,
                col: ncol,
                nrows: self.nrows,
                ncols: self.ncols,
            })
        }
    }

    /// Iterates over the stored `(column, value)` pairs of row `i`
    pub fn row_entries(&self, i: usize) -> impl Iterator<Item = (usize, T)> + '_ {
        let range = self.row_starts[i]..self.row_starts[i + 1];
        self.col_indices[range.clone()]
            .iter()
            .copied()
            .zip(self.values[range].iter().copied())
    }
}

impl<T: Numberish> RowStorage for CompressedMatrix<T> {
    type Elem = T;
    type Order = RowMajor;
    const VECTORIZABLE: bool = false;

    fn rows(&self) -> usize {
        self.nrows
    }

    fn columns(&self) -> usize {
        self.ncols
    }

    fn at(&self, i: usize, j: usize) -> T {
        let range = self.row_starts[i]..self.row_starts[i + 1];
        match self.col_indices[range.clone()].binary_search(&j) {
            Ok(pos) => self.values[range.start + pos],
            Err(_) => T::zero(),
        }
    }

    fn capacity(&self, i: usize) -> usize {
        self.row_starts[i + 1] - self.row_starts[i]
    }

    fn non_zeros(&self, i: usize) -> usize {
        self.row_entries(i).filter(|(_, v)| !v.is_default()).count()
    }
}
