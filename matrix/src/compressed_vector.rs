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

/// A sparse vector. Only the non-default elements are stored, as
/// `(index, value)` pairs sorted by index.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompressedVector<T: Numberish> {
    size: usize,
    indices: Vec<usize>,
    values: Vec<T>,
}

/// The serialized form, checked before it becomes a [`CompressedVector`]
#[derive(Deserialize)]
struct SparseData<T> {
    size: usize,
    indices: Vec<usize>,
    values: Vec<T>,
}

impl<T: Numberish> TryFrom<SparseData<T>> for CompressedVector<T> {
    type Error = MatrixError;

    fn try_from(data: SparseData<T>) -> Result<Self, Self::Error> {
        let SparseData {
            size,
            indices,
            values,
        } = data;
        if indices.len() != values.len() {
            return Err(MatrixError::SizeMismatch {
                operation: "reading a compressed vector",
                expected: indices.len(),
                found: values.len(),
            });
        }
        let mut ret = Self::new(size);
        ret.indices.reserve(indices.len());
        ret.values.reserve(values.len());
        for (i, v) in indices.into_iter().zip(values) {
            ret.append(i, v)?;
        }
        Ok(ret)
    }
}

impl<'de, T> Deserialize<'de> for CompressedVector<T>
where
    T: Numberish + Deserialize<'de>,
{
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let data = SparseData::<T>::deserialize(deserializer)?;
        Self::try_from(data).map_err(serde::de::Error::custom)
    }
}

impl<T: Numberish> std::fmt::Display for CompressedVector<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}](", self.size)?;
        for (n, (i, v)) in self.iter().enumerate() {
            if n > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}: {}", i, v)?;
        }
        write!(f, ")")
    }
}

impl<T: Numberish> CompressedVector<T> {
    /// Creates an all-default vector of `size` elements
    #[must_use]
    pub fn new(size: usize) -> Self {
        Self {
            size,
            indices: Vec::new(),
            values: Vec::new(),
        }
    }

    /// Creates a vector from `(index, value)` pairs, in any order. Later
    /// pairs overwrite earlier ones with the same index.
    pub fn from_pairs(size: usize, pairs: Vec<(usize, T)>) -> Result<Self, MatrixError> {
        let mut ret = Self::new(size);
        for (i, v) in pairs {
            ret.insert(i, v)?;
        }
        Ok(ret)
    }

    /// The number of elements, including default ones
    pub fn size(&self) -> usize {
        self.size
    }

    /// The number of stored elements
    pub fn non_zeros(&self) -> usize {
        self.values.len()
    }

    fn out_of_bounds(&self, i: usize) -> MatrixError {
        MatrixError::OutOfBounds {
            row: 0,
            col: i,
            nrows: 1,
            ncols: self.size,
        }
    }

    /// Sets element `i` to `v`, keeping entries sorted. Setting an
    /// element to its default value removes the entry.
    pub fn insert(&mut self, i: usize, v: T) -> Result<(), MatrixError> {
        if i >= self.size {
            return Err(self.out_of_bounds(i));
        }
        match self.indices.binary_search(&i) {
            Ok(pos) if v.is_default() => {
                self.indices.remove(pos);
                self.values.remove(pos);
            }
            Ok(pos) => self.values[pos] = v,
            Err(_) if v.is_default() => {}
            Err(pos) => {
                self.indices.insert(pos, i);
                self.values.insert(pos, v);
            }
        }
        Ok(())
    }

    /// Appends element `i` after every stored element. Cheaper than
    /// [`CompressedVector::insert`], but `i` must be greater than every
    /// index stored so far.
    pub fn append(&mut self, i: usize, v: T) -> Result<(), MatrixError> {
        if i >= self.size {
            return Err(self.out_of_bounds(i));
        }
        if let Some(&last) = self.indices.last() {
            if i <= last {
                return Err(MatrixError::UnsortedIndex { index: i, last });
            }
        }
        self.indices.push(i);
        self.values.push(v);
        Ok(())
    }

    /// Gets an element from the vector
    pub fn get(&self, i: usize) -> Result<T, MatrixError> {
        if i >= self.size {
            return Err(self.out_of_bounds(i));
        }
        Ok(self.at(i))
    }

    /// Reads element `i`, returning zero for elements that are not stored
    pub fn at(&self, i: usize) -> T {
        match self.indices.binary_search(&i) {
            Ok(pos) => self.values[pos],
            Err(_) => T::zero(),
        }
    }

    /// Iterates over the stored `(index, value)` pairs, by increasing index
    pub fn iter(&self) -> impl Iterator<Item = (usize, T)> + '_ {
        self.indices.iter().copied().zip(self.values.iter().copied())
    }
}
