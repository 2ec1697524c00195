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

//! Choosing and running the loop that writes a right-hand side into a row.
//!
//! The choice is driven by compile-time flags of the container, the
//! expression and the element type, gated at run time by the length of
//! the row (see [`select`]). Everything here writes blindly: the caller
//! has already checked sizes and resolved aliasing.

use crate::alias::address_of;
use crate::expr::VectorExpr;
use matrix::simd::{self, CACHE_SIZE};
use matrix::{Intrinsic, Numberish, OneZero, RowStorage, RowStorageMut, StorageOrder};
use std::cell::Cell;

/// How the right-hand side is combined with the current row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Op {
    /// `row = rhs`
    Assign,
    /// `row += rhs`
    Add,
    /// `row -= rhs`
    Sub,
    /// `row *= rhs`, element-wise
    Mult,
}

impl Op {
    /// Whether elements of type `T` can be combined lane-wise with this
    /// operation
    pub fn lane_wise<T: Intrinsic>(self) -> bool {
        match self {
            Op::Assign => true,
            Op::Add => T::ADDITION,
            Op::Sub => T::SUBTRACTION,
            Op::Mult => T::MULTIPLICATION,
        }
    }
}

/// The loop that writes a right-hand side into a row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// Visits only the stored elements of a sparse right-hand side
    Scatter,
    /// Element by element, two elements per iteration
    Unrolled,
    /// Blocks of four registers, then one register at a time. The blocks
    /// are plain scalar loops sized to the lane width of the element
    /// type, left for the compiler to vectorize; no intrinsics are used.
    Vectorized,
    /// Non-temporal stores that do not pollute the cache
    Streaming,
}

/// The number of columns beyond which assigning a row streams its
/// elements: a row that large, its source and the data around them
/// would not fit in [`CACHE_SIZE`] together.
pub const fn streaming_threshold<T>() -> usize {
    let size = std::mem::size_of::<T>();
    CACHE_SIZE / (if size == 0 { 1 } else { size } * 3)
}

/// Whether `op` may write the rows of `C` from `E` with lane-wide loops
pub fn vectorizable<C, E>(op: Op) -> bool
where
    C: RowStorage,
    E: VectorExpr<Elem = C::Elem>,
{
    C::VECTORIZABLE
        && <C::Order as StorageOrder>::ROW_MAJOR
        && E::VECTORIZABLE
        && op.lane_wise::<C::Elem>()
}

/// Picks the strategy for writing `rhs` into a row of `matrix` with `op`
pub fn select<C, E>(matrix: &C, rhs: &E, op: Op) -> Strategy
where
    C: RowStorage,
    E: VectorExpr<Elem = C::Elem>,
{
    if E::SPARSE {
        return Strategy::Scatter;
    }
    if !vectorizable::<C, E>(op) {
        return Strategy::Unrolled;
    }
    if op == Op::Assign
        && matrix.columns() > streaming_threshold::<C::Elem>()
        && !rhs.is_aliased(address_of(matrix))
    {
        Strategy::Streaming
    } else {
        Strategy::Vectorized
    }
}

/// Writes a dense right-hand side into row `row` of `matrix`
pub(crate) fn dense<C, E>(matrix: &C, row: usize, rhs: &E, op: Op)
where
    C: RowStorageMut,
    E: VectorExpr<Elem = C::Elem>,
{
    debug_assert!(!E::SPARSE);
    let strategy = select(matrix, rhs, op);
    log::trace!(
        target: "rowview",
        "{:?} into row {} ({} columns): {:?}",
        op,
        row,
        matrix.columns(),
        strategy
    );
    if !<C::Order as StorageOrder>::ROW_MAJOR && C::VECTORIZABLE && E::VECTORIZABLE {
        log::debug!(
            target: "rowview_perf",
            "row {} is stored in a column-major matrix; writing it element by element",
            row
        );
    }

    match (strategy, matrix.cells(row)) {
        (Strategy::Streaming, Some(cells)) => streaming(cells, rhs),
        (Strategy::Vectorized, Some(cells)) => match op {
            Op::Assign => blocked(cells, rhs, |_, b| b),
            Op::Add => blocked(cells, rhs, |a, b| a + b),
            Op::Sub => blocked(cells, rhs, |a, b| a - b),
            Op::Mult => blocked(cells, rhs, |a, b| a * b),
        },
        _ => match op {
            Op::Assign => unrolled(matrix, row, rhs, |_, b| b),
            Op::Add => unrolled(matrix, row, rhs, |a, b| a + b),
            Op::Sub => unrolled(matrix, row, rhs, |a, b| a - b),
            Op::Mult => unrolled(matrix, row, rhs, |a, b| a * b),
        },
    }
}

/// Writes a sparse right-hand side into row `row` of `matrix`
pub(crate) fn sparse<C, E>(matrix: &C, row: usize, rhs: &E, op: Op)
where
    C: RowStorageMut,
    E: VectorExpr<Elem = C::Elem>,
{
    log::trace!(
        target: "rowview",
        "{:?} into row {} ({} columns): {:?}",
        op,
        row,
        matrix.columns(),
        Strategy::Scatter
    );
    match op {
        Op::Assign => {
            // elements missing from `rhs` must end up as zeroes
            clear(matrix, row);
            scatter(matrix, row, rhs, |_, b| b)
        }
        Op::Add => scatter(matrix, row, rhs, |a, b| a + b),
        Op::Sub => scatter(matrix, row, rhs, |a, b| a - b),
        Op::Mult => {
            // elements missing from `rhs` must end up as zeroes, and the
            // stored ones need the old values
            let old: Vec<C::Elem> = (0..matrix.columns()).map(|j| matrix.at(row, j)).collect();
            clear(matrix, row);
            rhs.for_each_nonzero(|j, v| matrix.store(row, j, old[j] * v));
        }
    }
}

/// Sets every element of a row to zero
pub(crate) fn clear<C: RowStorageMut>(matrix: &C, row: usize) {
    if <C::Order as StorageOrder>::ROW_MAJOR {
        matrix.reset(row)
    } else {
        let zero = C::Elem::zero();
        (0..matrix.columns()).for_each(|j| matrix.store(row, j, zero))
    }
}

fn scatter<C, E, F>(matrix: &C, row: usize, rhs: &E, f: F)
where
    C: RowStorageMut,
    E: VectorExpr<Elem = C::Elem>,
    F: Fn(C::Elem, C::Elem) -> C::Elem,
{
    rhs.for_each_nonzero(|j, v| matrix.store(row, j, f(matrix.at(row, j), v)))
}

fn unrolled<C, E, F>(matrix: &C, row: usize, rhs: &E, f: F)
where
    C: RowStorageMut,
    E: VectorExpr<Elem = C::Elem>,
    F: Fn(C::Elem, C::Elem) -> C::Elem,
{
    let n = rhs.size();
    let jend = n & !1;
    let mut j = 0;
    while j < jend {
        matrix.store(row, j, f(matrix.at(row, j), rhs.at(j)));
        matrix.store(row, j + 1, f(matrix.at(row, j + 1), rhs.at(j + 1)));
        j += 2;
    }
    if jend < n {
        matrix.store(row, jend, f(matrix.at(row, jend), rhs.at(jend)));
    }
}

/// Applies `f` in chunks of `4 * T::LANES` elements, then of `T::LANES`.
/// Each chunk is a scalar loop over a fixed-size slice, which is the shape
/// the auto-vectorizer turns into packed instructions. Whether it does
/// depends on the target and on `rhs.at` inlining.
fn blocked<T, E, F>(cells: &[Cell<T>], rhs: &E, f: F)
where
    T: Numberish,
    E: VectorExpr<Elem = T>,
    F: Fn(T, T) -> T,
{
    let lanes = T::LANES;
    let block = 4 * lanes;
    let jend = cells.len() - cells.len() % block;

    for (b, chunk) in cells[..jend].chunks_exact(block).enumerate() {
        let j = b * block;
        for (l, cell) in chunk.iter().enumerate() {
            cell.set(f(cell.get(), rhs.at(j + l)));
        }
    }
    for (b, chunk) in cells[jend..].chunks(lanes).enumerate() {
        let j = jend + b * lanes;
        for (l, cell) in chunk.iter().enumerate() {
            cell.set(f(cell.get(), rhs.at(j + l)));
        }
    }
}

fn streaming<T, E>(cells: &[Cell<T>], rhs: &E)
where
    T: Numberish,
    E: VectorExpr<Elem = T>,
{
    for (j, cell) in cells.iter().enumerate() {
        // SAFETY: the pointer comes from a live cell of the row, and no
        // reference to its contents exists while it is written.
        unsafe { T::stream(cell.as_ptr(), rhs.at(j)) }
    }
    simd::fence();
}
