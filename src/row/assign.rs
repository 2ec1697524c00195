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

//! Writing into rows. Every write that reads from an expression goes
//! through the aliasing check in `alias::resolve` after the sizes have
//! been checked, so a failing write never touches an element.

use super::{DenseRow, ReadWrite, RowIterMut};
use crate::alias::{self, address_of};
use crate::dispatch::{self, Op};
use crate::error::ViewError;
use crate::expr::{VecDiv, VecScale, VectorExpr};
use matrix::{ContiguousRows, RowStorageMut};
use std::cell::Cell;

impl<'a, C: RowStorageMut> DenseRow<'a, C, ReadWrite> {
    /// Writes element `j`.
    ///
    /// Panics if `j` is beyond the end of the row, leaving the matrix
    /// untouched. Debug builds check here; release builds leave it to the
    /// matrix. [`DenseRow::try_set`] reports the error instead.
    pub fn set(&self, j: usize, v: C::Elem) {
        debug_assert!(j < self.size(), "Invalid row access index");
        self.matrix.store(self.row, j, v)
    }

    /// Writes element `j`, failing if it is beyond the end of the row
    pub fn try_set(&self, j: usize, v: C::Elem) -> Result<(), ViewError> {
        let size = self.size();
        if j >= size {
            return Err(ViewError::OutOfBounds { index: j, size });
        }
        self.matrix.store(self.row, j, v);
        Ok(())
    }

    /// Another writable view of the same matrix
    pub fn sibling(&self, index: usize) -> Result<Self, ViewError> {
        Self::new(self.matrix, index)
    }

    /// Iterates the cells of the row, whatever the storage order of the
    /// matrix, so that elements can be written in place
    pub fn iter_mut(&self) -> RowIterMut<'a, C> {
        RowIterMut::new(self.matrix, self.row, 0, self.size())
    }

    /// Writes `v` into every element
    pub fn fill(&self, v: C::Elem) {
        match self.matrix.cells(self.row) {
            Some(cells) => cells[..self.size()].iter().for_each(|c| c.set(v)),
            None => (0..self.size()).for_each(|j| self.matrix.store(self.row, j, v)),
        }
    }

    /// Copies the elements of another row of the same kind of matrix.
    /// Copying a row into itself does nothing.
    pub fn copy_from<A2>(&self, other: &DenseRow<'_, C, A2>) -> Result<(), ViewError> {
        if self.same_row(other) {
            log::trace!(target: "rowview", "row {} copied into itself", self.row);
            return Ok(());
        }
        self.check_size(other.size())?;
        for j in 0..self.size() {
            self.matrix.store(self.row, j, other.get(j))
        }
        Ok(())
    }

    fn check_size(&self, found: usize) -> Result<(), ViewError> {
        let expected = self.size();
        if expected == found {
            Ok(())
        } else {
            Err(ViewError::SizeMismatch { expected, found })
        }
    }

    fn write<E>(&self, rhs: &E, op: Op) -> Result<(), ViewError>
    where
        E: VectorExpr<Elem = C::Elem>,
    {
        self.check_size(rhs.size())?;
        alias::resolve(self.matrix, self.row, rhs, op);
        Ok(())
    }

    /// `row = rhs`. Elements of a sparse `rhs` that are not stored become
    /// zeroes. Assigning a row to itself does nothing.
    pub fn assign<E>(&self, rhs: E) -> Result<(), ViewError>
    where
        E: VectorExpr<Elem = C::Elem>,
    {
        if E::IS_ROW && rhs.viewed_row() == Some((address_of(self.matrix), self.row)) {
            log::trace!(target: "rowview", "row {} assigned to itself", self.row);
            return Ok(());
        }
        self.write(&rhs, Op::Assign)
    }

    /// `row += rhs`
    pub fn assign_add<E>(&self, rhs: E) -> Result<(), ViewError>
    where
        E: VectorExpr<Elem = C::Elem>,
    {
        self.write(&rhs, Op::Add)
    }

    /// `row -= rhs`
    pub fn assign_sub<E>(&self, rhs: E) -> Result<(), ViewError>
    where
        E: VectorExpr<Elem = C::Elem>,
    {
        self.write(&rhs, Op::Sub)
    }

    /// `row *= rhs`, element by element. Multiplying by a sparse vector
    /// zeroes every element it does not store.
    pub fn assign_mul<E>(&self, rhs: E) -> Result<(), ViewError>
    where
        E: VectorExpr<Elem = C::Elem>,
    {
        self.write(&rhs, Op::Mult)
    }

    /// `row = row * s`
    pub fn mul_scalar(&self, s: C::Elem) {
        alias::resolve(self.matrix, self.row, &VecScale::new(*self, s), Op::Assign)
    }

    /// `row = row / s`.
    ///
    /// Dividing by zero is only detected in debug builds. Release builds
    /// produce whatever the element type produces (infinities and NaNs
    /// for floats, a panic for integers).
    pub fn div_scalar(&self, s: C::Elem) {
        alias::resolve(self.matrix, self.row, &VecDiv::new(*self, s), Op::Assign)
    }

    /// Sets every element to zero
    pub fn reset(&self) {
        dispatch::clear(self.matrix, self.row)
    }

    /// Same as [`DenseRow::reset`]
    pub fn clear(&self) {
        self.reset()
    }

    /// Multiplies every element by `factor`, in place
    pub fn scale(&self, factor: C::Elem) {
        match self.matrix.cells(self.row) {
            Some(cells) => cells[..self.size()]
                .iter()
                .for_each(|c| c.set(c.get() * factor)),
            None => (0..self.size()).for_each(|j| {
                let v = self.matrix.at(self.row, j);
                self.matrix.store(self.row, j, v * factor)
            }),
        }
    }
}

impl<'a, C: ContiguousRows> DenseRow<'a, C, ReadWrite> {
    /// The elements of the row, which can be written through
    pub fn cells(&self) -> &'a [Cell<C::Elem>] {
        &self.matrix.row_cells(self.row)[..self.matrix.columns()]
    }
}

macro_rules! assign_op {
    ( $tr : ident, $method : ident, $with : ident ) => {
        impl<'a, C, E> std::ops::$tr<E> for DenseRow<'a, C, ReadWrite>
        where
            C: RowStorageMut,
            E: VectorExpr<Elem = C::Elem>,
        {
            fn $method(&mut self, rhs: E) {
                if let Err(e) = self.$with(rhs) {
                    panic!("{}", e)
                }
            }
        }
    };
}

assign_op!(AddAssign, add_assign, assign_add);
assign_op!(SubAssign, sub_assign, assign_sub);
assign_op!(MulAssign, mul_assign, assign_mul);

macro_rules! scalar_assign_ops {
    ( $( $s : ty ),* ) => {
        $(
            impl<'a, C> std::ops::MulAssign<$s> for DenseRow<'a, C, ReadWrite>
            where
                C: RowStorageMut<Elem = $s>,
            {
                fn mul_assign(&mut self, s: $s) {
                    self.mul_scalar(s)
                }
            }

            impl<'a, C> std::ops::DivAssign<$s> for DenseRow<'a, C, ReadWrite>
            where
                C: RowStorageMut<Elem = $s>,
            {
                fn div_assign(&mut self, s: $s) {
                    self.div_scalar(s)
                }
            }
        )*
    };
}

scalar_assign_ops!(f32, f64, i32, i64);

#[cfg(test)]
mod tests {
    use crate::error::ViewError;
    use crate::expr::VectorExpr;
    use crate::row::{row, row_mut};
    use matrix::{ColumnMajor, CompressedVector, DynamicMatrix, DynamicVector, StaticVector};
    use std::panic::AssertUnwindSafe;

    #[test]
    fn test_set() {
        let mut a = DynamicMatrix::<i32>::new(0, 2, 3);
        let r = row_mut(&mut a, 1).unwrap();
        r.set(2, 7);
        assert_eq!(r.try_set(0, 1), Ok(()));
        assert_eq!(
            r.try_set(3, 1),
            Err(ViewError::OutOfBounds { index: 3, size: 3 })
        );
        assert_eq!(a.to_row_major_vec(), vec![0, 0, 0, 1, 0, 7]);
    }

    #[test]
    #[should_panic]
    fn test_set_fail() {
        let mut a = DynamicMatrix::<i32>::new(0, 2, 3);
        let r = row_mut(&mut a, 1).unwrap();
        r.set(3, 1);
    }

    #[test]
    fn test_set_beyond_row() {
        let mut a = DynamicMatrix::<f64>::new(0., 2, 3);
        let r = row_mut(&mut a, 0).unwrap();
        let result = std::panic::catch_unwind(AssertUnwindSafe(|| r.set(4, 9.)));
        assert!(result.is_err());
        let result = std::panic::catch_unwind(AssertUnwindSafe(|| r.get(3)));
        assert!(result.is_err());
        assert!(row(&a, 0).unwrap().is_default());
        assert!(row(&a, 1).unwrap().is_default());
    }

    #[test]
    fn test_iter_mut() {
        let mut a = DynamicMatrix::<i32>::from_data(2, 3, vec![1, 2, 3, 4, 5, 6]);
        let r = row_mut(&mut a, 1).unwrap();
        assert_eq!(r.iter_mut().len(), 3);
        r.iter_mut().for_each(|c| c.set(c.get() * 10));
        assert_eq!(a.to_row_major_vec(), vec![1, 2, 3, 40, 50, 60]);

        let mut c = DynamicMatrix::<i32, ColumnMajor>::from_data(2, 3, vec![1, 2, 3, 4, 5, 6]);
        let r = row_mut(&mut c, 0).unwrap();
        for (j, cell) in r.iter_mut().rev().enumerate() {
            cell.set(j as i32);
        }
        assert_eq!(c.to_row_major_vec(), vec![2, 1, 0, 4, 5, 6]);
    }

    #[test]
    fn test_fill_and_scale() {
        let mut a = DynamicMatrix::<f64>::new(0., 3, 5);
        let r = row_mut(&mut a, 2).unwrap();
        r.fill(2.);
        r.scale(1.5);
        assert_eq!(r.to_vector().as_slice(), &[3.; 5]);
        assert_eq!(row(&a, 1).unwrap().non_zeros(), 0);

        let mut c = DynamicMatrix::<f64, ColumnMajor>::new(0., 3, 5);
        let r = row_mut(&mut c, 0).unwrap();
        r.fill(2.);
        r.scale(0.5);
        assert_eq!(r.to_vector().as_slice(), &[1.; 5]);
        assert_eq!(row(&c, 1).unwrap().non_zeros(), 0);
    }

    #[test]
    fn test_copy_from() {
        let mut a = DynamicMatrix::<i32>::from_data(2, 2, vec![1, 2, 3, 4]);
        let r = row_mut(&mut a, 0).unwrap();
        r.copy_from(&r).unwrap();
        assert_eq!(r.to_vector().as_slice(), &[1, 2]);

        r.copy_from(&r.sibling(1).unwrap()).unwrap();
        assert_eq!(a.to_row_major_vec(), vec![3, 4, 3, 4]);

        let other = DynamicMatrix::<i32>::new(9, 1, 3);
        let r = row_mut(&mut a, 0).unwrap();
        assert_eq!(
            r.copy_from(&row(&other, 0).unwrap()),
            Err(ViewError::SizeMismatch {
                expected: 2,
                found: 3
            })
        );
        assert_eq!(r.to_vector().as_slice(), &[3, 4]);
    }

    #[test]
    fn test_assign() {
        let mut a = DynamicMatrix::<f64>::new(0., 4, 3);
        let r = row_mut(&mut a, 1).unwrap();
        r.assign(&DynamicVector::from(vec![1., 2., 3.])).unwrap();
        r.assign_add(&StaticVector::<f64, 3>::new(1.)).unwrap();
        assert_eq!(r.to_vector().as_slice(), &[2., 3., 4.]);

        r.assign_sub(StaticVector::from([1., 1., 1.])).unwrap();
        r.assign_mul(&DynamicVector::from(vec![2., 2., 0.])).unwrap();
        assert_eq!(r.to_vector().as_slice(), &[2., 4., 0.]);
        assert_eq!(
            a.to_row_major_vec(),
            vec![0., 0., 0., 2., 4., 0., 0., 0., 0., 0., 0., 0.]
        );
    }

    #[test]
    fn test_assign_mismatch() {
        let mut a = DynamicMatrix::<f64>::new(1., 2, 4);
        let r = row_mut(&mut a, 0).unwrap();
        let v = DynamicVector::new(5., 5);
        let expected = Err(ViewError::SizeMismatch {
            expected: 4,
            found: 5,
        });
        assert_eq!(r.assign(&v), expected);
        assert_eq!(r.assign_add(&v), expected);
        assert_eq!(r.assign_sub(&v), expected);
        assert_eq!(r.assign_mul(&v), expected);
        assert_eq!(r.to_vector().as_slice(), &[1.; 4]);
    }

    #[test]
    fn test_assign_sparse() {
        let mut a = DynamicMatrix::<i32>::new(2, 1, 5);
        let r = row_mut(&mut a, 0).unwrap();
        let s = CompressedVector::from_pairs(5, vec![(3, 5)]).unwrap();

        r.assign_mul(&s).unwrap();
        assert_eq!(r.to_vector().as_slice(), &[0, 0, 0, 10, 0]);

        r.fill(2);
        r.assign_add(&s).unwrap();
        assert_eq!(r.to_vector().as_slice(), &[2, 2, 2, 7, 2]);

        r.assign(&s).unwrap();
        assert_eq!(r.to_vector().as_slice(), &[0, 0, 0, 5, 0]);
    }

    #[test]
    fn test_self_assign() {
        let mut a = DynamicMatrix::<i32>::from_data(2, 2, vec![1, 2, 3, 4]);
        let r = row_mut(&mut a, 1).unwrap();
        r.assign(r).unwrap();
        r.assign(&r).unwrap();
        assert_eq!(r.to_vector().as_slice(), &[3, 4]);

        r.assign(r.sibling(0).unwrap()).unwrap();
        assert_eq!(a.to_row_major_vec(), vec![1, 2, 1, 2]);
    }

    #[test]
    fn test_aliased_product() {
        let data = vec![1., 2., 3., 4., 5., 6., 7., 8., 9.];
        let copy = DynamicMatrix::<f64>::from_data(3, 3, data.clone());
        let expected = (row(&copy, 1).unwrap() * &copy).evaluate();

        let mut a = DynamicMatrix::<f64>::from_data(3, 3, data);
        let r = row_mut(&mut a, 1).unwrap();
        r.assign(r * r.matrix()).unwrap();
        assert_eq!(r.to_vector(), expected);
        assert_eq!(expected.as_slice(), &[66., 81., 96.]);

        // the other rows stay as they were
        assert!(row(&a, 0).unwrap() == row(&copy, 0).unwrap());
        assert!(row(&a, 2).unwrap() == row(&copy, 2).unwrap());
    }

    #[test]
    fn test_aliased_rows() {
        let mut a = DynamicMatrix::<i32>::from_data(2, 3, vec![1, 2, 3, 4, 5, 6]);
        let r = row_mut(&mut a, 0).unwrap();
        let other = r.sibling(1).unwrap();
        r.assign_add(r + other).unwrap();
        assert_eq!(r.to_vector().as_slice(), &[6, 9, 12]);
        assert_eq!(other.to_vector().as_slice(), &[4, 5, 6]);
    }

    #[test]
    fn test_scalar() {
        let mut a = DynamicMatrix::<f64>::from_data(2, 3, vec![1., 2., 3., 4., 5., 6.]);
        let r = row_mut(&mut a, 1).unwrap();
        r.mul_scalar(2.);
        assert_eq!(r.to_vector().as_slice(), &[8., 10., 12.]);
        r.div_scalar(4.);
        assert_eq!(r.to_vector().as_slice(), &[2., 2.5, 3.]);
        assert_eq!(row(&a, 0).unwrap().to_vector().as_slice(), &[1., 2., 3.]);
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic]
    fn test_div_zero() {
        let mut a = DynamicMatrix::<f64>::new(1., 2, 3);
        let r = row_mut(&mut a, 1).unwrap();
        r.div_scalar(0.);
    }

    #[test]
    fn test_reset() {
        let mut a = DynamicMatrix::<f64>::new(3., 2, 3);
        let r = row_mut(&mut a, 0).unwrap();
        assert!(!r.is_default());
        r.reset();
        assert!(r.is_default());
        assert!(!r.sibling(1).unwrap().is_default());
        r.sibling(1).unwrap().clear();
        assert!(row(&a, 1).unwrap().is_default());

        let mut c = DynamicMatrix::<f64, ColumnMajor>::new(3., 2, 3);
        let r = row_mut(&mut c, 1).unwrap();
        r.reset();
        assert!(r.is_default());
        assert!(!row(&c, 0).unwrap().is_default());
    }

    #[test]
    fn test_cells() {
        let mut a = DynamicMatrix::<f32>::new(0., 2, 3);
        let r = row_mut(&mut a, 1).unwrap();
        assert_eq!(r.cells().len(), 3);
        r.cells()[2].set(4.);
        assert_eq!(r.get(2), 4.);
    }

    #[test]
    fn test_operators() {
        let mut a = DynamicMatrix::<f64>::new(0., 4, 3);
        let mut r = row_mut(&mut a, 1).unwrap();
        let v = DynamicVector::from(vec![1., 2., 3.]);
        r += &v;
        r += &v;
        r -= &v;
        r *= &v;
        assert_eq!(r.to_vector().as_slice(), &[1., 4., 9.]);
        r *= 2.0_f64;
        r /= 2.0_f64;
        assert_eq!(r.to_vector().as_slice(), &[1., 4., 9.]);
        r += r * 2.0_f64;
        assert_eq!(r.to_vector().as_slice(), &[3., 12., 27.]);
    }

    #[test]
    #[should_panic]
    fn test_operators_fail() {
        let mut a = DynamicMatrix::<f64>::new(0., 4, 3);
        let mut r = row_mut(&mut a, 1).unwrap();
        r += &DynamicVector::new(1., 4);
    }
}
