//! Scalar types admitted as matrix entries
//!
//! Entries are either real numbers (integers or floats) or complex numbers.
//! Norms are computed over the magnitude of each entry, so every scalar names
//! a real floating type in which its modulus is expressed.

use num_complex::Complex;
use num_traits::{Float, Num};
use std::fmt::Debug;
use std::ops::AddAssign;

/// A numeric entry type: integer, floating point or complex
pub trait Scalar: Copy + Num + AddAssign + Debug + 'static {
    /// Floating type holding `|x|`
    type Real: Float + AddAssign + Debug;

    /// Absolute value, or complex modulus
    fn modulus(self) -> Self::Real;

    /// Squared modulus `|x|²`
    fn modulus_sqr(self) -> Self::Real;

    /// Checked conversion from a value parsed as `f64`
    ///
    /// Returns `None` when the value cannot be represented exactly enough,
    /// e.g. a fractional or negative value for an unsigned integer type.
    fn from_f64(value: f64) -> Option<Self>;
}

macro_rules! impl_scalar_float {
    ($($t:ty),*) => {$(
        impl Scalar for $t {
            type Real = $t;

            #[inline]
            fn modulus(self) -> $t {
                self.abs()
            }

            #[inline]
            fn modulus_sqr(self) -> $t {
                self * self
            }

            #[inline]
            fn from_f64(value: f64) -> Option<Self> {
                Some(value as $t)
            }
        }
    )*};
}

macro_rules! impl_scalar_int {
    ($($t:ty),*) => {$(
        impl Scalar for $t {
            type Real = f64;

            #[inline]
            fn modulus(self) -> f64 {
                (self as f64).abs()
            }

            #[inline]
            fn modulus_sqr(self) -> f64 {
                let m = self as f64;
                m * m
            }

            fn from_f64(value: f64) -> Option<Self> {
                if value.fract() != 0.0 {
                    return None;
                }
                num_traits::cast::<f64, $t>(value)
            }
        }
    )*};
}

macro_rules! impl_scalar_complex {
    ($($t:ty),*) => {$(
        impl Scalar for Complex<$t> {
            type Real = $t;

            #[inline]
            fn modulus(self) -> $t {
                self.norm()
            }

            #[inline]
            fn modulus_sqr(self) -> $t {
                self.norm_sqr()
            }

            #[inline]
            fn from_f64(value: f64) -> Option<Self> {
                Some(Complex::new(value as $t, 0.0))
            }
        }
    )*};
}

impl_scalar_float!(f32, f64);
impl_scalar_int!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);
impl_scalar_complex!(f32, f64);
