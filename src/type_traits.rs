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

//! What type results from combining two vector or matrix kinds. These are
//! purely type-level: nothing here runs.
//!
//! Fixed-size vectors win over dynamic ones; for sums and differences
//! dense vectors win over sparse ones, while element-wise products with
//! a sparse operand are sparse. A row vector times a matrix is a dynamic
//! vector (sparse only when both operands are). Row views behave as the
//! dynamic vector they evaluate into.

use crate::expr::VectorExpr;
use crate::row::DenseRow;
use matrix::{
    CompressedMatrix, CompressedVector, DynamicMatrix, DynamicVector, Numberish, RowStorage,
    StaticVector, StorageOrder,
};

/// The type of `Self + Rhs`
pub trait AddResult<Rhs> {
    /// The resulting type
    type Type;
}

/// The type of `Self - Rhs`
pub trait SubResult<Rhs> {
    /// The resulting type
    type Type;
}

/// The type of `Self * Rhs` (element-wise for two vectors)
pub trait MulResult<Rhs> {
    /// The resulting type
    type Type;
}

/// Shorthand for `<L as AddResult<R>>::Type`
pub type AddType<L, R> = <L as AddResult<R>>::Type;

/// Shorthand for `<L as SubResult<R>>::Type`
pub type SubType<L, R> = <L as SubResult<R>>::Type;

/// Shorthand for `<L as MulResult<R>>::Type`
pub type MulType<L, R> = <L as MulResult<R>>::Type;

/// Marks row views
pub trait IsRow {}

impl<C: RowStorage, A> IsRow for DenseRow<'_, C, A> {}

/// Whether `E` is a row view
pub const fn is_row<E: VectorExpr>() -> bool {
    E::IS_ROW
}

macro_rules! result_types {
    ( $tr : ident { $( [ $( $g : tt )* ] $l : ty , $r : ty => $out : ty ; )* } ) => {
        $(
            impl<$( $g )*> $tr<$r> for $l {
                type Type = $out;
            }
        )*
    };
}

macro_rules! additive {
    ( $tr : ident ) => {
        result_types!($tr {
            [T: Numberish] DynamicVector<T>, DynamicVector<T> => DynamicVector<T>;
            [T: Numberish, const N: usize] DynamicVector<T>, StaticVector<T, N> => StaticVector<T, N>;
            [T: Numberish, const N: usize] StaticVector<T, N>, DynamicVector<T> => StaticVector<T, N>;
            [T: Numberish, const N: usize] StaticVector<T, N>, StaticVector<T, N> => StaticVector<T, N>;
            [T: Numberish] DynamicVector<T>, CompressedVector<T> => DynamicVector<T>;
            [T: Numberish] CompressedVector<T>, DynamicVector<T> => DynamicVector<T>;
            [T: Numberish, const N: usize] StaticVector<T, N>, CompressedVector<T> => StaticVector<T, N>;
            [T: Numberish, const N: usize] CompressedVector<T>, StaticVector<T, N> => StaticVector<T, N>;
            [T: Numberish] CompressedVector<T>, CompressedVector<T> => CompressedVector<T>;
        });
    };
}

additive!(AddResult);
additive!(SubResult);

result_types!(MulResult {
    [T: Numberish] DynamicVector<T>, DynamicVector<T> => DynamicVector<T>;
    [T: Numberish, const N: usize] DynamicVector<T>, StaticVector<T, N> => StaticVector<T, N>;
    [T: Numberish, const N: usize] StaticVector<T, N>, DynamicVector<T> => StaticVector<T, N>;
    [T: Numberish, const N: usize] StaticVector<T, N>, StaticVector<T, N> => StaticVector<T, N>;
    [T: Numberish] DynamicVector<T>, CompressedVector<T> => CompressedVector<T>;
    [T: Numberish] CompressedVector<T>, DynamicVector<T> => CompressedVector<T>;
    [T: Numberish, const N: usize] StaticVector<T, N>, CompressedVector<T> => CompressedVector<T>;
    [T: Numberish, const N: usize] CompressedVector<T>, StaticVector<T, N> => CompressedVector<T>;
    [T: Numberish] CompressedVector<T>, CompressedVector<T> => CompressedVector<T>;

    [T: Numberish, O: StorageOrder] DynamicVector<T>, DynamicMatrix<T, O> => DynamicVector<T>;
    [T: Numberish, const N: usize, O: StorageOrder] StaticVector<T, N>, DynamicMatrix<T, O> => DynamicVector<T>;
    [T: Numberish, O: StorageOrder] CompressedVector<T>, DynamicMatrix<T, O> => DynamicVector<T>;
    [T: Numberish] DynamicVector<T>, CompressedMatrix<T> => DynamicVector<T>;
    [T: Numberish, const N: usize] StaticVector<T, N>, CompressedMatrix<T> => DynamicVector<T>;
    [T: Numberish] CompressedVector<T>, CompressedMatrix<T> => CompressedVector<T>;
});

/// A row view on the left behaves as its result type, whatever is on
/// the right (including another row view or a matrix).
macro_rules! row_on_the_left {
    ( $tr : ident, $alias : ident ) => {
        impl<'a, C: RowStorage, A, X> $tr<X> for DenseRow<'a, C, A>
        where
            DynamicVector<C::Elem>: $tr<X>,
        {
            type Type = $alias<DynamicVector<C::Elem>, X>;
        }
    };
}

row_on_the_left!(AddResult, AddType);
row_on_the_left!(SubResult, SubType);
row_on_the_left!(MulResult, MulType);

/// A row view on the right of a vector container behaves as its result type
macro_rules! row_on_the_right {
    ( $tr : ident, $alias : ident, $( [ $( $g : tt )* ] $l : ty ),* ) => {
        $(
            impl<'a, $( $g )* C, A> $tr<DenseRow<'a, C, A>> for $l
            where
                C: RowStorage<Elem = T>,
                $l: $tr<DynamicVector<T>>,
            {
                type Type = $alias<$l, DynamicVector<T>>;
            }
        )*
    };
}

macro_rules! row_on_the_right_of_vectors {
    ( $tr : ident, $alias : ident ) => {
        row_on_the_right!(
            $tr,
            $alias,
            [T: Numberish,] DynamicVector<T>,
            [T: Numberish, const N: usize,] StaticVector<T, N>,
            [T: Numberish,] CompressedVector<T>
        );
    };
}

row_on_the_right_of_vectors!(AddResult, AddType);
row_on_the_right_of_vectors!(SubResult, SubType);
row_on_the_right_of_vectors!(MulResult, MulType);
