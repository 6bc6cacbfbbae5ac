use super::fixed::Fixed;
use crate::common::ModelError;
use core::ops::{Add, Sub};
use num_complex::Complex;

/// Complex fixed-point value. Both parts always share one `(n, d)` format;
/// every constructor enforces this.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ComplexFixed {
    pub re: Fixed,
    pub im: Fixed,
}

impl ComplexFixed {
    pub fn new(re: f64, im: f64, n: u32, d: u32) -> Result<Self, ModelError> {
        Ok(Self {
            re: Fixed::new(re, n, d)?,
            im: Fixed::new(im, n, d)?,
        })
    }

    /// Builds both parts from their unsigned raw bit patterns.
    pub fn from_raw(re: u128, im: u128, n: u32, d: u32) -> Result<Self, ModelError> {
        Ok(Self {
            re: Fixed::from_raw(re, n, d)?,
            im: Fixed::from_raw(im, n, d)?,
        })
    }

    /// Pairs two existing scalars; they must agree on the format.
    pub fn from_parts(re: Fixed, im: Fixed) -> Result<Self, ModelError> {
        if re.width() != im.width() || re.frac() != im.frac() {
            return Err(ModelError::FormatMismatch);
        }
        Ok(Self { re, im })
    }

    pub fn zero(n: u32, d: u32) -> Result<Self, ModelError> {
        Self::new(0.0, 0.0, n, d)
    }

    /// Multiplicative identity `1 + 0i`. At formats too narrow to hold 1.0
    /// the real part wraps like any other construction.
    pub fn one(n: u32, d: u32) -> Result<Self, ModelError> {
        Self::new(1.0, 0.0, n, d)
    }

    pub fn resize(self, n: u32, d: u32) -> Result<Self, ModelError> {
        Ok(Self {
            re: self.re.resize(n, d)?,
            im: self.im.resize(n, d)?,
        })
    }

    /// Unsigned raw patterns `(re, im)` for bit-packing.
    #[inline]
    pub fn raw(&self) -> (u128, u128) {
        (self.re.raw(), self.im.raw())
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.re.width()
    }

    #[inline]
    pub fn frac(&self) -> u32 {
        self.re.frac()
    }

    /// Floating-point view for diagnostics and tolerance checks.
    pub fn to_complex(&self) -> Complex<f64> {
        Complex::new(self.re.to_f64(), self.im.to_f64())
    }
}

// Component-wise, at natural width; same-format inputs keep the parts in
// lockstep so the pair invariant holds without rechecking.

impl Add for ComplexFixed {
    type Output = ComplexFixed;

    #[inline]
    fn add(self, rhs: ComplexFixed) -> Self::Output {
        ComplexFixed {
            re: self.re + rhs.re,
            im: self.im + rhs.im,
        }
    }
}

impl Sub for ComplexFixed {
    type Output = ComplexFixed;

    #[inline]
    fn sub(self, rhs: ComplexFixed) -> Self::Output {
        ComplexFixed {
            re: self.re - rhs.re,
            im: self.im - rhs.im,
        }
    }
}
