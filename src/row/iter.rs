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

use crate::alias::address_of;
use matrix::{RowStorage, RowStorageMut};
use std::cell::Cell;

/// Iterates the elements of a row, one column at a time.
///
/// Two iterators are equal when they point at the same column of the
/// same row of the same matrix.
pub struct RowIter<'a, C: RowStorage> {
    matrix: &'a C,
    row: usize,
    col: usize,
    end: usize,
}

impl<'a, C: RowStorage> RowIter<'a, C> {
    pub(crate) fn new(matrix: &'a C, row: usize, col: usize, end: usize) -> Self {
        Self {
            matrix,
            row,
            col,
            end,
        }
    }

    /// The column the next call to `next()` will read
    pub fn column(&self) -> usize {
        self.col
    }
}

impl<C: RowStorage> Clone for RowIter<'_, C> {
    fn clone(&self) -> Self {
        Self::new(self.matrix, self.row, self.col, self.end)
    }
}

impl<C: RowStorage> std::fmt::Debug for RowIter<'_, C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RowIter")
            .field("row", &self.row)
            .field("col", &self.col)
            .field("end", &self.end)
            .finish()
    }
}

impl<C: RowStorage> PartialEq for RowIter<'_, C> {
    fn eq(&self, other: &Self) -> bool {
        address_of(self.matrix) == address_of(other.matrix)
            && self.row == other.row
            && self.col == other.col
    }
}

impl<C: RowStorage> Eq for RowIter<'_, C> {}

impl<C: RowStorage> Iterator for RowIter<'_, C> {
    type Item = C::Elem;

    fn next(&mut self) -> Option<Self::Item> {
        if self.col >= self.end {
            return None;
        }
        let ret = self.matrix.at(self.row, self.col);
        self.col += 1;
        Some(ret)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.end.saturating_sub(self.col);
        (n, Some(n))
    }
}

impl<C: RowStorage> DoubleEndedIterator for RowIter<'_, C> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.col >= self.end {
            return None;
        }
        self.end -= 1;
        Some(self.matrix.at(self.row, self.end))
    }
}

impl<C: RowStorage> ExactSizeIterator for RowIter<'_, C> {}

/// Iterates the cells of a row, one column at a time, so that elements
/// can be written in place. Works for either storage order.
pub struct RowIterMut<'a, C: RowStorageMut> {
    matrix: &'a C,
    row: usize,
    col: usize,
    end: usize,
}

impl<'a, C: RowStorageMut> RowIterMut<'a, C> {
    pub(crate) fn new(matrix: &'a C, row: usize, col: usize, end: usize) -> Self {
        Self {
            matrix,
            row,
            col,
            end,
        }
    }

    /// The column of the cell the next call to `next()` will return
    pub fn column(&self) -> usize {
        self.col
    }
}

impl<C: RowStorageMut> std::fmt::Debug for RowIterMut<'_, C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RowIterMut")
            .field("row", &self.row)
            .field("col", &self.col)
            .field("end", &self.end)
            .finish()
    }
}

impl<C: RowStorageMut> PartialEq for RowIterMut<'_, C> {
    fn eq(&self, other: &Self) -> bool {
        address_of(self.matrix) == address_of(other.matrix)
            && self.row == other.row
            && self.col == other.col
    }
}

impl<C: RowStorageMut> Eq for RowIterMut<'_, C> {}

impl<'a, C: RowStorageMut> Iterator for RowIterMut<'a, C> {
    type Item = &'a Cell<C::Elem>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.col >= self.end {
            return None;
        }
        let ret = self.matrix.cell(self.row, self.col);
        self.col += 1;
        Some(ret)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.end.saturating_sub(self.col);
        (n, Some(n))
    }
}

impl<C: RowStorageMut> DoubleEndedIterator for RowIterMut<'_, C> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.col >= self.end {
            return None;
        }
        self.end -= 1;
        Some(self.matrix.cell(self.row, self.end))
    }
}

impl<C: RowStorageMut> ExactSizeIterator for RowIterMut<'_, C> {}

#[cfg(test)]
mod tests {
    use crate::row::{row, row_mut};
    use matrix::{ColumnMajor, DynamicMatrix};

    #[test]
    fn test_iter() {
        let a: DynamicMatrix<i32, ColumnMajor> =
            DynamicMatrix::from_data(2, 3, vec![1, 2, 3, 4, 5, 6]);
        let r = row(&a, 1).unwrap();
        assert_eq!(r.iter().collect::<Vec<_>>(), vec![4, 5, 6]);
        assert_eq!(r.iter().rev().collect::<Vec<_>>(), vec![6, 5, 4]);
        assert_eq!(r.iter().len(), 3);
    }

    #[test]
    fn test_equality() {
        let a: DynamicMatrix<i32> = DynamicMatrix::new(1, 2, 3);
        let b: DynamicMatrix<i32> = DynamicMatrix::new(1, 2, 3);

        let mut first = row(&a, 0).unwrap().iter();
        let mut second = row(&a, 0).unwrap().iter();
        assert_eq!(first, second);

        first.next();
        assert_ne!(first, second);
        second.next();
        assert_eq!(first, second);
        assert_eq!(first.column(), 1);

        assert_ne!(row(&a, 0).unwrap().iter(), row(&a, 1).unwrap().iter());
        assert_ne!(row(&a, 0).unwrap().iter(), row(&b, 0).unwrap().iter());
    }

    #[test]
    fn test_iter_mut_equality() {
        let mut a: DynamicMatrix<i32, ColumnMajor> = DynamicMatrix::new(0, 2, 3);
        let r = row_mut(&mut a, 1).unwrap();
        let mut first = r.iter_mut();
        let second = r.iter_mut();
        assert_eq!(first, second);
        first.next();
        assert_ne!(first, second);
        assert_eq!(first.column(), 1);
        assert_eq!(first.len(), 2);
        assert_ne!(r.iter_mut(), r.sibling(0).unwrap().iter_mut());

        first.next_back().unwrap().set(5);
        assert!(first.next().is_some());
        assert!(first.next().is_none());
        assert_eq!(row(&a, 1).unwrap().iter().collect::<Vec<_>>(), vec![0, 0, 5]);
    }
}
