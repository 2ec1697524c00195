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

//! The bulk loops of a row view are written in terms of lanes: groups of
//! elements that fit in one register. This module says how many lanes each
//! element type has, which operations may be applied lane-wise, and how to
//! write an element bypassing the cache.

/// The width (in bytes) of the registers bulk loops are blocked for.
pub const REGISTER_BYTES: usize = 32;

/// The size (in bytes) of the cache tier that large assignments are
/// kept out of.
pub const CACHE_SIZE: usize = 3 * 1024 * 1024;

/// Capabilities of an element type in bulk (i.e., vectorized) loops.
///
/// Every constant has a conservative default, so a custom element type
/// only needs `impl Intrinsic for MyType {}` to be usable (it will just
/// never take a vectorized path).
pub trait Intrinsic: Copy {
    /// Number of elements that fit in a register
    const LANES: usize = 1;

    /// Whether bulk loops apply to this type at all
    const VECTORIZABLE: bool = Self::LANES > 1;

    /// Lane-wise addition is available
    const ADDITION: bool = false;

    /// Lane-wise subtraction is available
    const SUBTRACTION: bool = false;

    /// Lane-wise multiplication is available
    const MULTIPLICATION: bool = false;

    /// Lane-wise division is available
    const DIVISION: bool = false;

    /// Writes `value` into `dst` with a non-temporal hint, when the
    /// platform supports one.
    ///
    /// # Safety
    /// `dst` must be valid for writes and properly aligned for `Self`.
    unsafe fn stream(dst: *mut Self, value: Self) {
        dst.write(value)
    }
}

macro_rules! lanes {
    ( $t : ty, $add : expr, $sub : expr, $mul : expr, $div : expr ) => {
        const LANES: usize = REGISTER_BYTES / std::mem::size_of::<$t>();
        const ADDITION: bool = $add;
        const SUBTRACTION: bool = $sub;
        const MULTIPLICATION: bool = $mul;
        const DIVISION: bool = $div;
    };
}

macro_rules! stream_64 {
    ( $( $t : ty => $bits : expr ),* ) => {
        $(
            impl Intrinsic for $t {
                lanes!($t, true, true, $bits, $bits);

                #[cfg(target_arch = "x86_64")]
                unsafe fn stream(dst: *mut Self, value: Self) {
                    std::arch::x86_64::_mm_stream_si64(dst.cast::<i64>(), Bits64::bits(value))
                }
            }
        )*
    };
}

macro_rules! stream_32 {
    ( $( $t : ty => $mul : expr, $div : expr ),* ) => {
        $(
            impl Intrinsic for $t {
                lanes!($t, true, true, $mul, $div);

                #[cfg(target_arch = "x86_64")]
                unsafe fn stream(dst: *mut Self, value: Self) {
                    std::arch::x86_64::_mm_stream_si32(dst.cast::<i32>(), Bits32::bits(value))
                }
            }
        )*
    };
}

/// Reinterprets a 64-bit element as the integer `MOVNTI` stores
#[allow(dead_code)]
trait Bits64 {
    fn bits(self) -> i64;
}
impl Bits64 for f64 {
    fn bits(self) -> i64 {
        self.to_bits() as i64
    }
}
impl Bits64 for i64 {
    fn bits(self) -> i64 {
        self
    }
}
impl Bits64 for u64 {
    fn bits(self) -> i64 {
        self as i64
    }
}

/// Reinterprets a 32-bit element as the integer `MOVNTI` stores
#[allow(dead_code)]
trait Bits32 {
    fn bits(self) -> i32;
}
impl Bits32 for f32 {
    fn bits(self) -> i32 {
        self.to_bits() as i32
    }
}
impl Bits32 for i32 {
    fn bits(self) -> i32 {
        self
    }
}
impl Bits32 for u32 {
    fn bits(self) -> i32 {
        self as i32
    }
}

// 64-bit integers cannot be multiplied (nor divided) lane-wise in 256 bits.
stream_64!(f64 => true, i64 => false, u64 => false);

impl Intrinsic for f32 {
    lanes!(f32, true, true, true, true);

    #[cfg(target_arch = "x86_64")]
    unsafe fn stream(dst: *mut Self, value: Self) {
        std::arch::x86_64::_mm_stream_si32(dst.cast::<i32>(), Bits32::bits(value))
    }
}
stream_32!(i32 => true, false, u32 => true, false);

impl Intrinsic for i16 {
    lanes!(i16, true, true, true, false);
}
impl Intrinsic for u16 {
    lanes!(u16, true, true, true, false);
}
impl Intrinsic for i8 {
    lanes!(i8, true, true, false, false);
}
impl Intrinsic for u8 {
    lanes!(u8, true, true, false, false);
}
impl Intrinsic for isize {}
impl Intrinsic for usize {}

/// Orders the non-temporal stores issued so far before any store
/// that follows. Must be called after a run of [`Intrinsic::stream`].
#[allow(unused_unsafe)]
pub fn fence() {
    // SAFETY: SSE is part of the x86_64 baseline.
    #[cfg(target_arch = "x86_64")]
    unsafe {
        std::arch::x86_64::_mm_sfence();
    }

    #[cfg(not(target_arch = "x86_64"))]
    std::sync::atomic::fence(std::sync::atomic::Ordering::SeqCst);
}
