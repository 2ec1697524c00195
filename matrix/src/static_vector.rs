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

/// A dense vector whose size is known at compile time
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StaticVector<T: Numberish, const N: usize> {
    pub(crate) data: [T; N],
}

impl<T: Numberish, const N: usize> Default for StaticVector<T, N> {
    fn default() -> Self {
        Self {
            data: [T::zero(); N],
        }
    }
}

impl<T: Numberish, const N: usize> From<[T; N]> for StaticVector<T, N> {
    fn from(data: [T; N]) -> Self {
        Self { data }
    }
}

impl<T: Numberish, const N: usize> Serialize for StaticVector<T, N> {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.data.iter())
    }
}

impl<'de, T, const N: usize> Deserialize<'de> for StaticVector<T, N>
where
    T: Numberish + Deserialize<'de>,
{
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let v = Vec::<T>::deserialize(deserializer)?;
        let found = v.len();
        let data: [T; N] = v.try_into().map_err(|_| {
            serde::de::Error::custom(MatrixError::SizeMismatch {
                operation: "reading a static vector",
                expected: N,
                found,
            })
        })?;
        Ok(Self { data })
    }
}

impl<T: Numberish, const N: usize> std::ops::Index<usize> for StaticVector<T, N> {
    type Output = T;
    fn index(&self, i: usize) -> &T {
        &self.data[i]
    }
}

impl<T: Numberish, const N: usize> std::ops::IndexMut<usize> for StaticVector<T, N> {
    fn index_mut(&mut self, i: usize) -> &mut T {
        &mut self.data[i]
    }
}

impl<T: Numberish, const N: usize> StaticVector<T, N> {
    /// Creates a `StaticVector` with all its elements equal to `v`
    #[must_use]
    pub fn new(v: T) -> Self {
        Self { data: [v; N] }
    }

    /// Builds a vector by calling `f` with each index
    pub fn from_fn<F: FnMut(usize) -> T>(f: F) -> Self {
        Self {
            data: std::array::from_fn(f),
        }
    }

    /// The number of elements (i.e., `N`)
    pub const fn len(&self) -> usize {
        N
    }

    /// Checks whether `N == 0`
    pub const fn is_empty(&self) -> bool {
        N == 0
    }

    /// The elements, as a slice
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    /// Iterates over the elements
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.data.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new() {
        let v: StaticVector<f64, 3> = StaticVector::new(2.);
        assert_eq!(v.len(), 3);
        assert_eq!(v.as_slice(), &[2., 2., 2.]);
        assert!(StaticVector::<u8, 0>::default().is_empty());
    }

    #[test]
    fn test_from_fn() {
        let mut v = StaticVector::<i32, 4>::from_fn(|i| i as i32 * 2);
        v[0] = 5;
        assert_eq!(v.as_slice(), &[5, 2, 4, 6]);
    }

    #[test]
    fn test_serde() -> Result<(), String> {
        let v = StaticVector::from([1, 2, 3]);
        let json = serde_json::to_string(&v).map_err(|e| e.to_string())?;
        let v2: StaticVector<i32, 3> = serde_json::from_str(&json).map_err(|e| e.to_string())?;
        assert_eq!(v, v2);

        let wrong: Result<StaticVector<i32, 2>, _> = serde_json::from_str(&json);
        assert!(wrong.is_err());
        Ok(())
    }
}
