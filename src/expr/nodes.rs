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

//! Lazy arithmetic. Nothing is computed when two expressions are combined;
//! elements are computed one by one when the result is read (typically by
//! an assignment into a row).
//!
//! Expressions can be multiplied and divided by `f32`, `f64`, `i32` and
//! `i64` scalars. An unsuffixed literal matches more than one of them, so
//! scalar literals need a suffix: `row * 2.0_f64`, not `row * 2.0`.

use super::{Materialize, VectorExpr};
use crate::alias::address_of;
use crate::error::ViewError;
use crate::type_traits::{AddResult, AddType, MulResult, MulType, SubResult, SubType};
use matrix::{Intrinsic, Numberish, OneZero, RowStorage};

fn check_sizes(lhs: usize, rhs: usize) -> Result<(), ViewError> {
    if lhs == rhs {
        Ok(())
    } else {
        Err(ViewError::SizeMismatch {
            expected: lhs,
            found: rhs,
        })
    }
}

/// Walks the non-zero elements of two sparse expressions at once, calling
/// `f` with `op(a, b)` wherever either of them has an element.
fn merge<T, L, R, G, F>(lhs: &L, rhs: &R, op: G, mut f: F)
where
    T: Numberish,
    L: VectorExpr<Elem = T>,
    R: VectorExpr<Elem = T>,
    G: Fn(T, T) -> T,
    F: FnMut(usize, T),
{
    let mut a = Vec::new();
    lhs.for_each_nonzero(|i, v| a.push((i, v)));
    let mut b = Vec::new();
    rhs.for_each_nonzero(|i, v| b.push((i, v)));

    let zero = T::zero();
    let mut a = a.into_iter().peekable();
    let mut b = b.into_iter().peekable();
    loop {
        match (a.peek().copied(), b.peek().copied()) {
            (Some((i, u)), Some((j, v))) if i == j => {
                f(i, op(u, v));
                a.next();
                b.next();
            }
            (Some((i, u)), Some((j, _))) if i < j => {
                f(i, op(u, zero));
                a.next();
            }
            (_, Some((j, v))) => {
                f(j, op(zero, v));
                b.next();
            }
            (Some((i, u)), None) => {
                f(i, op(u, zero));
                a.next();
            }
            (None, None) => break,
        }
    }
}

macro_rules! binary_node {
    ( $name : ident, $doc : literal, $what : literal ) => {
        #[doc = $doc]
        #[derive(Debug, Clone, Copy)]
        pub struct $name<L, R> {
            lhs: L,
            rhs: R,
        }

        impl<L, R> $name<L, R>
        where
            L: VectorExpr,
            R: VectorExpr<Elem = L::Elem>,
        {
            /// Combines two expressions of the same size
            ///
            /// # Panics
            /// Panics if the sizes differ
            pub fn new(lhs: L, rhs: R) -> Self {
                match Self::try_new(lhs, rhs) {
                    Ok(ret) => ret,
                    Err(_) => panic!(concat!("Vectors being ", $what, " are of different sizes")),
                }
            }

            /// Combines two expressions, failing if their sizes differ
            pub fn try_new(lhs: L, rhs: R) -> Result<Self, ViewError> {
                check_sizes(lhs.size(), rhs.size())?;
                Ok(Self { lhs, rhs })
            }
        }
    };
}

binary_node!(VecAdd, "The element-wise sum of two expressions", "added");
binary_node!(VecSub, "The element-wise difference of two expressions", "substracted");
binary_node!(VecMul, "The element-wise product of two expressions", "multiplied");

impl<L, R> VectorExpr for VecAdd<L, R>
where
    L: VectorExpr,
    R: VectorExpr<Elem = L::Elem>,
    L::Result: AddResult<R::Result>,
    AddType<L::Result, R::Result>: VectorExpr<Elem = L::Elem> + Materialize<L::Elem>,
{
    type Elem = L::Elem;
    type Result = AddType<L::Result, R::Result>;
    const SPARSE: bool = L::SPARSE && R::SPARSE;
    const VECTORIZABLE: bool =
        L::VECTORIZABLE && R::VECTORIZABLE && <L::Elem as Intrinsic>::ADDITION;

    fn size(&self) -> usize {
        self.lhs.size()
    }

    fn at(&self, i: usize) -> Self::Elem {
        self.lhs.at(i) + self.rhs.at(i)
    }

    fn for_each_nonzero<F: FnMut(usize, Self::Elem)>(&self, mut f: F) {
        if Self::SPARSE {
            merge(&self.lhs, &self.rhs, |a, b| a + b, f)
        } else {
            (0..self.size()).for_each(|i| f(i, self.at(i)))
        }
    }

    fn can_alias(&self, addr: *const ()) -> bool {
        self.lhs.can_alias(addr) || self.rhs.can_alias(addr)
    }

    fn is_aliased(&self, addr: *const ()) -> bool {
        self.lhs.is_aliased(addr) || self.rhs.is_aliased(addr)
    }
}

impl<L, R> VectorExpr for VecSub<L, R>
where
    L: VectorExpr,
    R: VectorExpr<Elem = L::Elem>,
    L::Result: SubResult<R::Result>,
    SubType<L::Result, R::Result>: VectorExpr<Elem = L::Elem> + Materialize<L::Elem>,
{
    type Elem = L::Elem;
    type Result = SubType<L::Result, R::Result>;
    const SPARSE: bool = L::SPARSE && R::SPARSE;
    const VECTORIZABLE: bool =
        L::VECTORIZABLE && R::VECTORIZABLE && <L::Elem as Intrinsic>::SUBTRACTION;

    fn size(&self) -> usize {
        self.lhs.size()
    }

    fn at(&self, i: usize) -> Self::Elem {
        self.lhs.at(i) - self.rhs.at(i)
    }

    fn for_each_nonzero<F: FnMut(usize, Self::Elem)>(&self, mut f: F) {
        if Self::SPARSE {
            merge(&self.lhs, &self.rhs, |a, b| a - b, f)
        } else {
            (0..self.size()).for_each(|i| f(i, self.at(i)))
        }
    }

    fn can_alias(&self, addr: *const ()) -> bool {
        self.lhs.can_alias(addr) || self.rhs.can_alias(addr)
    }

    fn is_aliased(&self, addr: *const ()) -> bool {
        self.lhs.is_aliased(addr) || self.rhs.is_aliased(addr)
    }
}

impl<L, R> VectorExpr for VecMul<L, R>
where
    L: VectorExpr,
    R: VectorExpr<Elem = L::Elem>,
    L::Result: MulResult<R::Result>,
    MulType<L::Result, R::Result>: VectorExpr<Elem = L::Elem> + Materialize<L::Elem>,
{
    type Elem = L::Elem;
    type Result = MulType<L::Result, R::Result>;
    // Zero times anything is zero, so one sparse side is enough
    const SPARSE: bool = L::SPARSE || R::SPARSE;
    const VECTORIZABLE: bool =
        L::VECTORIZABLE && R::VECTORIZABLE && <L::Elem as Intrinsic>::MULTIPLICATION;

    fn size(&self) -> usize {
        self.lhs.size()
    }

    fn at(&self, i: usize) -> Self::Elem {
        self.lhs.at(i) * self.rhs.at(i)
    }

    fn for_each_nonzero<F: FnMut(usize, Self::Elem)>(&self, mut f: F) {
        if L::SPARSE {
            self.lhs.for_each_nonzero(|i, v| f(i, v * self.rhs.at(i)))
        } else if R::SPARSE {
            self.rhs.for_each_nonzero(|i, v| f(i, self.lhs.at(i) * v))
        } else {
            (0..self.size()).for_each(|i| f(i, self.at(i)))
        }
    }

    fn can_alias(&self, addr: *const ()) -> bool {
        self.lhs.can_alias(addr) || self.rhs.can_alias(addr)
    }

    fn is_aliased(&self, addr: *const ()) -> bool {
        self.lhs.is_aliased(addr) || self.rhs.is_aliased(addr)
    }
}

/// An expression multiplied by a scalar
#[derive(Debug, Clone, Copy)]
pub struct VecScale<E, T> {
    expr: E,
    scalar: T,
}

impl<E: VectorExpr> VecScale<E, E::Elem> {
    /// Scales `expr` by `scalar`
    pub fn new(expr: E, scalar: E::Elem) -> Self {
        Self { expr, scalar }
    }
}

impl<E: VectorExpr> VectorExpr for VecScale<E, E::Elem> {
    type Elem = E::Elem;
    type Result = E::Result;
    const SPARSE: bool = E::SPARSE;
    const VECTORIZABLE: bool = E::VECTORIZABLE && <E::Elem as Intrinsic>::MULTIPLICATION;

    fn size(&self) -> usize {
        self.expr.size()
    }

    fn at(&self, i: usize) -> Self::Elem {
        self.expr.at(i) * self.scalar
    }

    fn for_each_nonzero<F: FnMut(usize, Self::Elem)>(&self, mut f: F) {
        self.expr.for_each_nonzero(|i, v| f(i, v * self.scalar))
    }

    fn can_alias(&self, addr: *const ()) -> bool {
        self.expr.can_alias(addr)
    }

    fn is_aliased(&self, addr: *const ()) -> bool {
        self.expr.is_aliased(addr)
    }
}

/// An expression divided by a scalar
#[derive(Debug, Clone, Copy)]
pub struct VecDiv<E, T> {
    expr: E,
    scalar: T,
}

impl<E: VectorExpr> VecDiv<E, E::Elem> {
    /// Divides `expr` by `scalar`. Dividing by zero is only detected in
    /// debug builds.
    pub fn new(expr: E, scalar: E::Elem) -> Self {
        debug_assert!(!scalar.is_default(), "Division by zero detected");
        Self { expr, scalar }
    }
}

impl<E: VectorExpr> VectorExpr for VecDiv<E, E::Elem> {
    type Elem = E::Elem;
    type Result = E::Result;
    const SPARSE: bool = E::SPARSE;
    const VECTORIZABLE: bool = E::VECTORIZABLE && <E::Elem as Intrinsic>::DIVISION;

    fn size(&self) -> usize {
        self.expr.size()
    }

    fn at(&self, i: usize) -> Self::Elem {
        self.expr.at(i) / self.scalar
    }

    fn for_each_nonzero<F: FnMut(usize, Self::Elem)>(&self, mut f: F) {
        self.expr.for_each_nonzero(|i, v| f(i, v / self.scalar))
    }

    fn can_alias(&self, addr: *const ()) -> bool {
        self.expr.can_alias(addr)
    }

    fn is_aliased(&self, addr: *const ()) -> bool {
        self.expr.is_aliased(addr)
    }
}

/// A row vector multiplied by a matrix. Element `j` is the inner product
/// of the vector and column `j` of the matrix.
#[derive(Debug)]
pub struct RowMatProd<'m, V, M> {
    vector: V,
    matrix: &'m M,
}

impl<V: Clone, M> Clone for RowMatProd<'_, V, M> {
    fn clone(&self) -> Self {
        Self {
            vector: self.vector.clone(),
            matrix: self.matrix,
        }
    }
}

impl<'m, V, M> RowMatProd<'m, V, M>
where
    V: VectorExpr,
    M: RowStorage<Elem = V::Elem>,
{
    /// Multiplies `vector` by `matrix`
    ///
    /// # Panics
    /// Panics if the length of `vector` differs from the rows of `matrix`
    pub fn new(vector: V, matrix: &'m M) -> Self {
        match Self::try_new(vector, matrix) {
            Ok(ret) => ret,
            Err(_) => panic!("Size mismatch for vector-matrix multiplication"),
        }
    }

    /// Multiplies `vector` by `matrix`, failing if the sizes do not match
    pub fn try_new(vector: V, matrix: &'m M) -> Result<Self, ViewError> {
        check_sizes(matrix.rows(), vector.size())?;
        Ok(Self { vector, matrix })
    }
}

impl<'m, V, M> VectorExpr for RowMatProd<'m, V, M>
where
    V: VectorExpr,
    M: RowStorage<Elem = V::Elem>,
    V::Result: MulResult<M>,
    MulType<V::Result, M>: VectorExpr<Elem = V::Elem> + Materialize<V::Elem>,
{
    type Elem = V::Elem;
    type Result = MulType<V::Result, M>;

    fn size(&self) -> usize {
        self.matrix.columns()
    }

    fn at(&self, j: usize) -> Self::Elem {
        let mut acc = Self::Elem::zero();
        self.vector
            .for_each_nonzero(|k, v| acc += v * self.matrix.at(k, j));
        acc
    }

    fn can_alias(&self, addr: *const ()) -> bool {
        self.vector.can_alias(addr) || address_of(self.matrix) == addr
    }

    fn is_aliased(&self, addr: *const ()) -> bool {
        self.vector.is_aliased(addr) || address_of(self.matrix) == addr
    }
}

/// Implements the scalar operators (`expr * s`, `s * expr` and `expr / s`)
/// for an expression type, once per scalar type.
macro_rules! scalar_ops {
    ( [ $( $g : tt )* ] $ty : ty ; ) => {};
    ( [ $( $g : tt )* ] $ty : ty ; $s : ty $( , $rest : ty )* ) => {
        impl<$( $g )*> std::ops::Mul<$s> for $ty
        where
            $ty: $crate::VectorExpr<Elem = $s>,
        {
            type Output = $crate::VecScale<$ty, $s>;
            fn mul(self, s: $s) -> Self::Output {
                $crate::VecScale::new(self, s)
            }
        }

        impl<$( $g )*> std::ops::Mul<$ty> for $s
        where
            $ty: $crate::VectorExpr<Elem = $s>,
        {
            type Output = $crate::VecScale<$ty, $s>;
            fn mul(self, v: $ty) -> Self::Output {
                $crate::VecScale::new(v, self)
            }
        }

        impl<$( $g )*> std::ops::Div<$s> for $ty
        where
            $ty: $crate::VectorExpr<Elem = $s>,
        {
            type Output = $crate::VecDiv<$ty, $s>;
            fn div(self, s: $s) -> Self::Output {
                $crate::VecDiv::new(self, s)
            }
        }

        $crate::expr::scalar_ops!([ $( $g )* ] $ty ; $( $rest ),* );
    };
}
pub(crate) use scalar_ops;

/// Implements the arithmetic operators for an expression type: `+`, `-`
/// and element-wise `*` with any other expression, `*` with a matrix, and
/// the scalar operators.
macro_rules! vector_ops {
    ( [ $( $g : tt )* ] $ty : ty ) => {
        impl<$( $g )* Rhs> std::ops::Add<Rhs> for $ty
        where
            $ty: $crate::VectorExpr,
            Rhs: $crate::VectorExpr<Elem = <$ty as $crate::VectorExpr>::Elem>,
        {
            type Output = $crate::VecAdd<$ty, Rhs>;
            fn add(self, rhs: Rhs) -> Self::Output {
                $crate::VecAdd::new(self, rhs)
            }
        }

        impl<$( $g )* Rhs> std::ops::Sub<Rhs> for $ty
        where
            $ty: $crate::VectorExpr,
            Rhs: $crate::VectorExpr<Elem = <$ty as $crate::VectorExpr>::Elem>,
        {
            type Output = $crate::VecSub<$ty, Rhs>;
            fn sub(self, rhs: Rhs) -> Self::Output {
                $crate::VecSub::new(self, rhs)
            }
        }

        impl<$( $g )* Rhs> std::ops::Mul<Rhs> for $ty
        where
            $ty: $crate::VectorExpr,
            Rhs: $crate::VectorExpr<Elem = <$ty as $crate::VectorExpr>::Elem>,
        {
            type Output = $crate::VecMul<$ty, Rhs>;
            fn mul(self, rhs: Rhs) -> Self::Output {
                $crate::VecMul::new(self, rhs)
            }
        }

        impl<'m, $( $g )* T, O> std::ops::Mul<&'m matrix::DynamicMatrix<T, O>> for $ty
        where
            $ty: $crate::VectorExpr<Elem = T>,
            T: matrix::Numberish,
            O: matrix::StorageOrder,
        {
            type Output = $crate::RowMatProd<'m, $ty, matrix::DynamicMatrix<T, O>>;
            fn mul(self, m: &'m matrix::DynamicMatrix<T, O>) -> Self::Output {
                $crate::RowMatProd::new(self, m)
            }
        }

        impl<'m, $( $g )* T> std::ops::Mul<&'m matrix::CompressedMatrix<T>> for $ty
        where
            $ty: $crate::VectorExpr<Elem = T>,
            T: matrix::Numberish,
        {
            type Output = $crate::RowMatProd<'m, $ty, matrix::CompressedMatrix<T>>;
            fn mul(self, m: &'m matrix::CompressedMatrix<T>) -> Self::Output {
                $crate::RowMatProd::new(self, m)
            }
        }

        $crate::expr::scalar_ops!([ $( $g )* ] $ty ; f32, f64, i32, i64);
    };
}
pub(crate) use vector_ops;

vector_ops!([L, R,] VecAdd<L, R>);
vector_ops!([L, R,] VecSub<L, R>);
vector_ops!([L, R,] VecMul<L, R>);
vector_ops!([E, S,] VecScale<E, S>);
vector_ops!([E, S,] VecDiv<E, S>);
vector_ops!(['p, V, M,] RowMatProd<'p, V, M>);
