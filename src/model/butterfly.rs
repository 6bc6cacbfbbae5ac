// src/model/butterfly.rs

use crate::common::ModelError;
use crate::fixed::math::cmul;
use crate::fixed::types::ComplexFixed;

/// Expected output of one butterfly operation at format `(n, d)`:
/// `(a + b*w, a - b*w)`, with each output resized back to `(n, d)`.
///
/// `w = None` models the multiply-disabled configuration, where the twiddle
/// stage is bypassed and `b` feeds the add/sub directly. Overflow on either
/// output wraps; that is the datapath behavior, not a defect.
pub fn butterfly(
    n: u32,
    d: u32,
    a: &ComplexFixed,
    b: &ComplexFixed,
    w: Option<&ComplexFixed>,
) -> Result<(ComplexFixed, ComplexFixed), ModelError> {
    let t = match w {
        Some(w) => cmul(n, d, b, w)?,
        None => *b,
    };
    let sum = (*a + t).resize(n, d)?;
    let diff = (*a - t).resize(n, d)?;
    Ok((sum, diff))
}

#[cfg(test)]
#[path = "butterfly_tests.rs"]
mod tests;
