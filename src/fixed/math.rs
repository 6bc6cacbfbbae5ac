// src/fixed/math.rs

use super::types::ComplexFixed;
use crate::common::ModelError;

/// Complex product at fixed intermediate precision, using the three-multiply
/// identity the hardware multiplier implements to save one multiplier:
///
/// ```text
/// ac    = a.re * b.re
/// bd    = a.im * b.im
/// cross = (a.re + a.im) * (b.re + b.im)
/// re    = ac - bd
/// im    = cross - ac - bd
/// ```
///
/// Every intermediate is resized back to `(n, d)` where the pipeline has a
/// register, so the result is bit-exact against the datapath, including its
/// truncation and wraparound. Reordering the steps or skipping a resize
/// gives a value that is mathematically closer to the true product and
/// wrong for this model.
pub fn cmul(
    n: u32,
    d: u32,
    a: &ComplexFixed,
    b: &ComplexFixed,
) -> Result<ComplexFixed, ModelError> {
    let ac = (a.re * b.re).resize(n, d)?;
    let bd = (a.im * b.im).resize(n, d)?;

    let cross = ((a.re + a.im).resize(n, d)? * (b.re + b.im).resize(n, d)?).resize(n, d)?;

    let re = (ac - bd).resize(n, d)?;
    let im = ((cross - ac) - bd).resize(n, d)?;
    ComplexFixed::from_parts(re, im)
}

#[cfg(test)]
#[path = "math_tests.rs"]
mod tests;
