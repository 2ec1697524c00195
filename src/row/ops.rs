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

//! Arithmetic with row views. Nothing is computed until the resulting
//! expression is assigned or evaluated. Scalar literals need a suffix
//! (`row * 2.0_f64`).

use super::DenseRow;
use crate::expr::{VecAdd, VecMul, VecSub};
use matrix::{CompressedVector, DynamicVector, Numberish, RowStorage, StaticVector};

crate::expr::vector_ops!(['a, C: RowStorage, A,] DenseRow<'a, C, A>);

/// `container OP row`, for containers that are not expressions of this
/// crate's making
macro_rules! container_on_the_left {
    ( [ $( $g : tt )* ] $ty : ty ) => {
        impl<'v, 'a, $( $g )* C, A> std::ops::Add<DenseRow<'a, C, A>> for &'v $ty
        where
            C: RowStorage<Elem = T>,
        {
            type Output = VecAdd<&'v $ty, DenseRow<'a, C, A>>;
            fn add(self, row: DenseRow<'a, C, A>) -> Self::Output {
                VecAdd::new(self, row)
            }
        }

        impl<'v, 'a, $( $g )* C, A> std::ops::Sub<DenseRow<'a, C, A>> for &'v $ty
        where
            C: RowStorage<Elem = T>,
        {
            type Output = VecSub<&'v $ty, DenseRow<'a, C, A>>;
            fn sub(self, row: DenseRow<'a, C, A>) -> Self::Output {
                VecSub::new(self, row)
            }
        }

        impl<'v, 'a, $( $g )* C, A> std::ops::Mul<DenseRow<'a, C, A>> for &'v $ty
        where
            C: RowStorage<Elem = T>,
        {
            type Output = VecMul<&'v $ty, DenseRow<'a, C, A>>;
            fn mul(self, row: DenseRow<'a, C, A>) -> Self::Output {
                VecMul::new(self, row)
            }
        }
    };
}

container_on_the_left!([T: Numberish,] DynamicVector<T>);
container_on_the_left!([T: Numberish, const N: usize,] StaticVector<T, N>);
container_on_the_left!([T: Numberish,] CompressedVector<T>);

#[cfg(test)]
mod tests {
    use crate::expr::VectorExpr;
    use crate::row::{row, row_mut};
    use matrix::{
        CompressedMatrix, CompressedVector, DynamicMatrix, DynamicVector, StaticVector,
    };

    fn matrix() -> DynamicMatrix<f64> {
        DynamicMatrix::from_data(2, 3, vec![1., 2., 3., 4., 5., 6.])
    }

    #[test]
    fn test_row_on_the_left() {
        let a = matrix();
        let r = row(&a, 0).unwrap();
        let v = DynamicVector::from(vec![1., 1., 1.]);

        assert_eq!((r + &v).evaluate().as_slice(), &[2., 3., 4.]);
        assert_eq!((r - &v).evaluate().as_slice(), &[0., 1., 2.]);
        assert_eq!((r * &v).evaluate().as_slice(), &[1., 2., 3.]);
        assert_eq!((r * 2.0_f64).evaluate().as_slice(), &[2., 4., 6.]);
        assert_eq!((2.0_f64 * r).evaluate().as_slice(), &[2., 4., 6.]);
        assert_eq!((r / 2.0_f64).evaluate().as_slice(), &[0.5, 1., 1.5]);

        let other = row(&a, 1).unwrap();
        assert_eq!((r + other).evaluate().as_slice(), &[5., 7., 9.]);
        assert_eq!(((r + other) * 2.0_f64).evaluate().as_slice(), &[10., 14., 18.]);
    }

    #[test]
    fn test_container_on_the_left() {
        let a = matrix();
        let r = row(&a, 1).unwrap();
        let v = DynamicVector::from(vec![1., 1., 1.]);
        let s = StaticVector::from([2., 2., 2.]);
        let c = CompressedVector::from_pairs(3, vec![(1, 3.)]).unwrap();

        assert_eq!((&v + r).evaluate().as_slice(), &[5., 6., 7.]);
        assert_eq!((&v - r).evaluate().as_slice(), &[-3., -4., -5.]);
        let prod: StaticVector<f64, 3> = (&s * r).evaluate();
        assert_eq!(prod.as_slice(), &[8., 10., 12.]);

        let sparse: CompressedVector<f64> = (&c * r).evaluate();
        assert_eq!(sparse.iter().collect::<Vec<_>>(), vec![(1, 15.)]);
        let dense: DynamicVector<f64> = (&c + r).evaluate();
        assert_eq!(dense.as_slice(), &[4., 8., 6.]);
    }

    #[test]
    fn test_row_times_matrix() {
        let a = matrix();
        let b: DynamicMatrix<f64> = DynamicMatrix::from_data(3, 2, vec![1., 0., 0., 1., 1., 1.]);
        let r = row(&a, 1).unwrap();
        assert_eq!((r * &b).evaluate().as_slice(), &[10., 11.]);

        let s = CompressedMatrix::from_triplets(3, 2, vec![(2, 0, 2.)]).unwrap();
        assert_eq!((r * &s).evaluate().as_slice(), &[12., 0.]);
    }

    #[test]
    #[should_panic]
    fn test_mismatch() {
        let a = matrix();
        let r = row(&a, 1).unwrap();
        let _ = r + &DynamicVector::from(vec![1., 1.]);
    }

    #[test]
    fn test_integers() {
        let mut a = DynamicMatrix::<i64>::from_data(2, 2, vec![1, 2, 3, 4]);
        let r = row_mut(&mut a, 0).unwrap();
        r.assign(r * 3_i64 - r.sibling(1).unwrap()).unwrap();
        assert_eq!(r.to_vector().as_slice(), &[0, 2]);
    }
}
