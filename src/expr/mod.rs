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

//! Anything that can appear on the right-hand side of an assignment into
//! a row: the vector containers, row views and lazy arithmetic nodes
//! built out of them.

use crate::error::ViewError;
use matrix::{CompressedVector, DynamicVector, Numberish, OneZero, StaticVector};

mod nodes;
pub use nodes::{RowMatProd, VecAdd, VecDiv, VecMul, VecScale, VecSub};
pub(crate) use nodes::{scalar_ops, vector_ops};

/// A vector-like expression.
///
/// Elements are read one at a time through [`VectorExpr::at`]; sparse
/// expressions also enumerate their stored elements through
/// [`VectorExpr::for_each_nonzero`]. The associated constants describe
/// the expression at compile time and drive the choice of assignment
/// strategy.
pub trait VectorExpr {
    /// The type of the elements
    type Elem: Numberish;

    /// The container this expression evaluates into
    type Result: VectorExpr<Elem = Self::Elem> + Materialize<Self::Elem>;

    /// Only a few elements are stored; the rest are zero
    const SPARSE: bool = false;

    /// Elements can be read in lane-wide bulk loops
    const VECTORIZABLE: bool = false;

    /// The expression is a row view
    const IS_ROW: bool = false;

    /// Number of elements
    fn size(&self) -> usize;

    /// Reads element `i`. Callers are expected to stay within bounds.
    fn at(&self, i: usize) -> Self::Elem;

    /// Calls `f` with every element that might not be zero, by
    /// increasing index. Dense expressions visit every element.
    fn for_each_nonzero<F: FnMut(usize, Self::Elem)>(&self, mut f: F) {
        for i in 0..self.size() {
            f(i, self.at(i))
        }
    }

    /// Whether evaluating this expression might read from the container
    /// at `addr`. May give false positives, never false negatives.
    fn can_alias(&self, addr: *const ()) -> bool;

    /// Whether this expression does read from the container at `addr`
    fn is_aliased(&self, addr: *const ()) -> bool {
        self.can_alias(addr)
    }

    /// The address of the matrix and the index of the row this expression
    /// views, if it is a row view
    fn viewed_row(&self) -> Option<(*const (), usize)> {
        None
    }

    /// Evaluates the expression into an independent container
    fn evaluate(&self) -> Self::Result
    where
        Self: Sized,
    {
        <Self::Result as Materialize<Self::Elem>>::materialize(self)
    }
}

/// A container that can be built from any expression of the right size.
pub trait Materialize<T: Numberish>: Sized {
    /// Evaluates `expr`, element by element
    fn materialize<E: VectorExpr<Elem = T>>(expr: &E) -> Self;
}

impl<E: VectorExpr> VectorExpr for &E {
    type Elem = E::Elem;
    type Result = E::Result;
    const SPARSE: bool = E::SPARSE;
    const VECTORIZABLE: bool = E::VECTORIZABLE;
    const IS_ROW: bool = E::IS_ROW;

    fn size(&self) -> usize {
        (**self).size()
    }

    fn at(&self, i: usize) -> Self::Elem {
        (**self).at(i)
    }

    fn for_each_nonzero<F: FnMut(usize, Self::Elem)>(&self, f: F) {
        (**self).for_each_nonzero(f)
    }

    fn can_alias(&self, addr: *const ()) -> bool {
        (**self).can_alias(addr)
    }

    fn is_aliased(&self, addr: *const ()) -> bool {
        (**self).is_aliased(addr)
    }

    fn viewed_row(&self) -> Option<(*const (), usize)> {
        (**self).viewed_row()
    }
}

impl<T: Numberish> VectorExpr for DynamicVector<T> {
    type Elem = T;
    type Result = DynamicVector<T>;
    const VECTORIZABLE: bool = T::VECTORIZABLE;

    fn size(&self) -> usize {
        self.len()
    }

    fn at(&self, i: usize) -> T {
        self[i]
    }

    fn can_alias(&self, _addr: *const ()) -> bool {
        false
    }
}

impl<T: Numberish, const N: usize> VectorExpr for StaticVector<T, N> {
    type Elem = T;
    type Result = StaticVector<T, N>;
    const VECTORIZABLE: bool = T::VECTORIZABLE;

    fn size(&self) -> usize {
        N
    }

    fn at(&self, i: usize) -> T {
        self[i]
    }

    fn can_alias(&self, _addr: *const ()) -> bool {
        false
    }
}

impl<T: Numberish> VectorExpr for CompressedVector<T> {
    type Elem = T;
    type Result = CompressedVector<T>;
    const SPARSE: bool = true;

    fn size(&self) -> usize {
        CompressedVector::size(self)
    }

    fn at(&self, i: usize) -> T {
        CompressedVector::at(self, i)
    }

    fn for_each_nonzero<F: FnMut(usize, T)>(&self, mut f: F) {
        for (i, v) in self.iter() {
            f(i, v)
        }
    }

    fn can_alias(&self, _addr: *const ()) -> bool {
        false
    }
}

impl<T: Numberish> Materialize<T> for DynamicVector<T> {
    fn materialize<E: VectorExpr<Elem = T>>(expr: &E) -> Self {
        if E::SPARSE {
            let mut ret = DynamicVector::new(T::zero(), expr.size());
            expr.for_each_nonzero(|i, v| ret[i] = v);
            ret
        } else {
            (0..expr.size()).map(|i| expr.at(i)).collect()
        }
    }
}

impl<T: Numberish, const N: usize> Materialize<T> for StaticVector<T, N> {
    fn materialize<E: VectorExpr<Elem = T>>(expr: &E) -> Self {
        assert_eq!(expr.size(), N, "Vector sizes do not match");
        if E::SPARSE {
            let mut ret = StaticVector::default();
            expr.for_each_nonzero(|i, v| ret[i] = v);
            ret
        } else {
            StaticVector::from_fn(|i| expr.at(i))
        }
    }
}

impl<T: Numberish> Materialize<T> for CompressedVector<T> {
    fn materialize<E: VectorExpr<Elem = T>>(expr: &E) -> Self {
        let mut ret = CompressedVector::new(expr.size());
        expr.for_each_nonzero(|i, v| {
            if !v.is_default() {
                let appended = ret.append(i, v);
                debug_assert!(appended.is_ok(), "{:?}", appended);
            }
        });
        ret
    }
}

/// The inner product of two expressions (i.e., a row times a column).
pub fn dot<L, R>(lhs: &L, rhs: &R) -> Result<L::Elem, ViewError>
where
    L: VectorExpr,
    R: VectorExpr<Elem = L::Elem>,
{
    if lhs.size() != rhs.size() {
        return Err(ViewError::SizeMismatch {
            expected: lhs.size(),
            found: rhs.size(),
        });
    }
    let mut acc = L::Elem::zero();
    if R::SPARSE && !L::SPARSE {
        rhs.for_each_nonzero(|i, v| acc += lhs.at(i) * v);
    } else {
        lhs.for_each_nonzero(|i, v| acc += v * rhs.at(i));
    }
    Ok(acc)
}
