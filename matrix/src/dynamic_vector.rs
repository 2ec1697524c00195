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
use crate::traits::Numberish;
use serde::{Deserialize, Serialize};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// A dense vector of dynamic size
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DynamicVector<T: Numberish> {
    pub(crate) data: Vec<T>,
}

impl<T: Numberish> Default for DynamicVector<T> {
    fn default() -> Self {
        Self { data: Vec::new() }
    }
}

impl<T: Numberish> From<Vec<T>> for DynamicVector<T> {
    fn from(data: Vec<T>) -> Self {
        Self { data }
    }
}

impl<T: Numberish> FromIterator<T> for DynamicVector<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self {
            data: iter.into_iter().collect(),
        }
    }
}

impl<T: Numberish> std::fmt::Display for DynamicVector<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "(")?;
        for (i, v) in self.data.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", v)?;
        }
        write!(f, ")")
    }
}

impl<T: Numberish> std::ops::Index<usize> for DynamicVector<T> {
    type Output = T;
    fn index(&self, i: usize) -> &T {
        &self.data[i]
    }
}

impl<T: Numberish> std::ops::IndexMut<usize> for DynamicVector<T> {
    fn index_mut(&mut self, i: usize) -> &mut T {
        &mut self.data[i]
    }
}

impl<T: Numberish> DynamicVector<T> {
    /// Creates a `DynamicVector` of `n` elements, all equal to `v`
    #[must_use]
    pub fn new(v: T, n: usize) -> Self {
        Self { data: vec![v; n] }
    }

    /// The number of elements
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Checks whether the vector has no elements
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Gets an element from the vector
    pub fn get(&self, i: usize) -> Result<T, MatrixError> {
        self.data.get(i).copied().ok_or(MatrixError::OutOfBounds {
            row: 0,
            col: i,
            nrows: 1,
            ncols: self.data.len(),
        })
    }

    /// Sets an element into the vector
    pub fn set(&mut self, i: usize, v: T) -> Result<T, MatrixError> {
        let ncols = self.data.len();
        let e = self.data.get_mut(i).ok_or(MatrixError::OutOfBounds {
            row: 0,
            col: i,
            nrows: 1,
            ncols,
        })?;
        *e = v;
        Ok(v)
    }

    /// The elements, as a slice
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    /// The elements, as a mutable slice
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.data
    }

    /// Iterates over the elements
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.data.iter()
    }

    /// Consumes the vector, returning its elements
    pub fn into_vec(self) -> Vec<T> {
        self.data
    }

    fn check_sizes(&self, other: usize, operation: &'static str) -> Result<(), MatrixError> {
        if self.data.len() != other {
            return Err(MatrixError::SizeMismatch {
                operation,
                expected: self.data.len(),
                found: other,
            });
        }
        Ok(())
    }

    /// Adds `self` with `other`, puting the result in `into`
    pub fn add_into(
        &self,
        other: &DynamicVector<T>,
        into: &mut DynamicVector<T>,
    ) -> Result<(), MatrixError> {
        self.check_sizes(other.len(), "adding vectors")?;
        self.check_sizes(into.len(), "storing the sum of two vectors")?;

        #[cfg(not(feature = "parallel"))]
        let it = self.data.iter().zip(other.data.iter()).zip(into.data.iter_mut());
        #[cfg(feature = "parallel")]
        let it = self
            .data
            .par_iter()
            .zip(other.data.par_iter())
            .zip(into.data.par_iter_mut());

        it.for_each(|((x, y), res)| *res = *x + *y);
        Ok(())
    }

    /// Substracts `other` from `self`, puting the result in `into`
    pub fn sub_into(
        &self,
        other: &DynamicVector<T>,
        into: &mut DynamicVector<T>,
    ) -> Result<(), MatrixError> {
        self.check_sizes(other.len(), "substracting vectors")?;
        self.check_sizes(into.len(), "storing the difference of two vectors")?;

        #[cfg(not(feature = "parallel"))]
        let it = self.data.iter().zip(other.data.iter()).zip(into.data.iter_mut());
        #[cfg(feature = "parallel")]
        let it = self
            .data
            .par_iter()
            .zip(other.data.par_iter())
            .zip(into.data.par_iter_mut());

        it.for_each(|((x, y), res)| *res = *x - *y);
        Ok(())
    }

    /// Scales a vector by `s` and puts the result in `into`
    pub fn scale_into(&self, s: T, into: &mut DynamicVector<T>) -> Result<(), MatrixError> {
        self.check_sizes(into.len(), "scaling a vector")?;

        #[cfg(not(feature = "parallel"))]
        let it = into.data.iter_mut().zip(self.data.iter());
        #[cfg(feature = "parallel")]
        let it = into.data.par_iter_mut().zip(self.data.par_iter());

        it.for_each(|(to, from)| *to = *from * s);
        Ok(())
    }
}

impl<T: Numberish> std::ops::Add<&DynamicVector<T>> for &DynamicVector<T> {
    type Output = DynamicVector<T>;

    fn add(self, other: &DynamicVector<T>) -> Self::Output {
        let mut ret = DynamicVector::new(T::zero(), self.len());
        if let Err(e) = self.add_into(other, &mut ret) {
            panic!("{}", e)
        }
        ret
    }
}

impl<T: Numberish> std::ops::Sub<&DynamicVector<T>> for &DynamicVector<T> {
    type Output = DynamicVector<T>;

    fn sub(self, other: &DynamicVector<T>) -> Self::Output {
        let mut ret = DynamicVector::new(T::zero(), self.len());
        if let Err(e) = self.sub_into(other, &mut ret) {
            panic!("{}", e)
        }
        ret
    }
}

impl<T: Numberish> std::ops::MulAssign<T> for DynamicVector<T> {
    fn mul_assign(&mut self, s: T) {
        self.data.iter_mut().for_each(|a| *a *= s);
    }
}
