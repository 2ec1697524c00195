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

//! Every write into a row goes through [`resolve`]. If the right-hand side
//! might read from the matrix being written, it is evaluated into a
//! temporary first; otherwise it is written directly.

use crate::dispatch::{self, Op};
use crate::expr::VectorExpr;
use matrix::RowStorageMut;

/// The address used to identify a container when looking for aliases
pub(crate) fn address_of<C: ?Sized>(container: &C) -> *const () {
    (container as *const C).cast::<()>()
}

/// Whether `rhs` has to be evaluated before `op` writes it into `matrix`.
///
/// The container address (not the row) is what is compared, since any
/// other view of the same matrix may share elements with the row.
/// Element-wise products with a sparse operand are always evaluated.
pub(crate) fn must_materialize<C, E>(matrix: &C, rhs: &E, op: Op) -> bool
where
    C: RowStorageMut,
    E: VectorExpr<Elem = C::Elem>,
{
    rhs.can_alias(address_of(matrix)) || (op == Op::Mult && E::SPARSE)
}

/// Writes `rhs` into row `row` of `matrix`, combining it with `op`
pub(crate) fn resolve<C, E>(matrix: &C, row: usize, rhs: &E, op: Op)
where
    C: RowStorageMut,
    E: VectorExpr<Elem = C::Elem>,
{
    if must_materialize(matrix, rhs, op) {
        log::debug!(
            target: "rowview",
            "evaluating the right-hand side of {:?} into row {} before writing it",
            op,
            row
        );
        let tmp = rhs.evaluate();
        write(matrix, row, &tmp, op)
    } else {
        write(matrix, row, rhs, op)
    }
}

fn write<C, E>(matrix: &C, row: usize, rhs: &E, op: Op)
where
    C: RowStorageMut,
    E: VectorExpr<Elem = C::Elem>,
{
    if E::SPARSE {
        dispatch::sparse(matrix, row, rhs, op)
    } else {
        dispatch::dense(matrix, row, rhs, op)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expr::RowMatProd;
    use matrix::{CompressedVector, DynamicMatrix, DynamicVector};

    #[test]
    fn test_must_materialize() {
        let a: DynamicMatrix<f64> = DynamicMatrix::eye(3);
        let b: DynamicMatrix<f64> = DynamicMatrix::eye(3);
        let v = DynamicVector::new(1., 3);
        let s = CompressedVector::<f64>::new(3);

        assert!(!must_materialize(&a, &v, Op::Assign));
        assert!(!must_materialize(&a, &s, Op::Add));
        assert!(must_materialize(&a, &s, Op::Mult));

        let p = RowMatProd::new(&v, &a);
        assert!(must_materialize(&a, &p, Op::Assign));
        assert!(!must_materialize(&b, &p, Op::Assign));
    }

    #[test]
    fn test_resolve() {
        // row 0 = row 0 * a, reading from a while it is written
        let a: DynamicMatrix<f64> = DynamicMatrix::from_data(2, 2, vec![1., 2., 3., 4.]);
        let snapshot = DynamicVector::from(vec![1., 2.]);
        let expected = RowMatProd::new(&snapshot, &a).evaluate();

        let copy = a.clone();
        let v = DynamicVector::from(vec![1., 2.]);
        resolve(&a, 0, &RowMatProd::new(&v, &a), Op::Assign);
        assert_eq!(a.to_row_major_vec()[..2], expected.as_slice()[..]);
        assert_eq!(a.to_row_major_vec()[2..], copy.to_row_major_vec()[2..]);
    }
}
