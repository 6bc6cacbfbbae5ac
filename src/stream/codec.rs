// src/stream/codec.rs

use crate::common::ModelError;
use crate::fixed::types::ComplexFixed;
use num_bigint::BigUint;
use num_traits::{One, Zero};

// Field layouts, high to low. A request carries the two data operands and
// the twiddle factor; a response carries the sum and the difference. Each
// field is the n-bit unsigned raw pattern of one scalar part.
//
//   request:  a.re | a.im | b.re | b.im | w.re | w.im     (6n bits)
//   response: sum.re | sum.im | diff.re | diff.im         (4n bits)

pub const REQUEST_FIELDS: usize = 6;
pub const RESPONSE_FIELDS: usize = 4;

fn check_operand(v: &ComplexFixed, n: u32) -> Result<(), ModelError> {
    if v.width() != n {
        return Err(ModelError::FormatMismatch);
    }
    Ok(())
}

fn pack(fields: &[u128], n: u32) -> BigUint {
    let mut msg = BigUint::zero();
    for &field in fields {
        msg = (msg << n) | BigUint::from(field);
    }
    msg
}

fn unpack(msg: &BigUint, n: u32, count: usize) -> Result<Vec<u128>, ModelError> {
    if msg.bits() > n as u64 * count as u64 {
        return Err(ModelError::MessageTooWide);
    }
    let mask = (BigUint::one() << n) - BigUint::one();
    let mut fields = Vec::with_capacity(count);
    for i in (0..count).rev() {
        let field = (msg >> (i as u32 * n)) & &mask;
        fields.push(u128::try_from(&field).map_err(|_| ModelError::MessageTooWide)?);
    }
    Ok(fields)
}

/// Packs one butterfly request. `w = None` (multiply stage disabled) puts
/// zeros in the twiddle fields, which is what the wire carries in that
/// configuration.
pub fn encode_request(
    n: u32,
    a: &ComplexFixed,
    b: &ComplexFixed,
    w: Option<&ComplexFixed>,
) -> Result<BigUint, ModelError> {
    check_operand(a, n)?;
    check_operand(b, n)?;
    let (w_re, w_im) = match w {
        Some(w) => {
            check_operand(w, n)?;
            w.raw()
        }
        None => (0, 0),
    };
    let (a_re, a_im) = a.raw();
    let (b_re, b_im) = b.raw();
    Ok(pack(&[a_re, a_im, b_re, b_im, w_re, w_im], n))
}

/// Inverse of [`encode_request`]. The fraction width is not on the wire, so
/// the caller supplies it. An all-zero twiddle decodes as a value, not as
/// absence; whether the multiply stage uses it is the unit's configuration.
pub fn decode_request(
    n: u32,
    d: u32,
    msg: &BigUint,
) -> Result<(ComplexFixed, ComplexFixed, ComplexFixed), ModelError> {
    let f = unpack(msg, n, REQUEST_FIELDS)?;
    Ok((
        ComplexFixed::from_raw(f[0], f[1], n, d)?,
        ComplexFixed::from_raw(f[2], f[3], n, d)?,
        ComplexFixed::from_raw(f[4], f[5], n, d)?,
    ))
}

/// Packs one butterfly response: sum then difference.
pub fn encode_response(
    n: u32,
    sum: &ComplexFixed,
    diff: &ComplexFixed,
) -> Result<BigUint, ModelError> {
    check_operand(sum, n)?;
    check_operand(diff, n)?;
    let (s_re, s_im) = sum.raw();
    let (d_re, d_im) = diff.raw();
    Ok(pack(&[s_re, s_im, d_re, d_im], n))
}

/// Inverse of [`encode_response`].
pub fn decode_response(
    n: u32,
    d: u32,
    msg: &BigUint,
) -> Result<(ComplexFixed, ComplexFixed), ModelError> {
    let f = unpack(msg, n, RESPONSE_FIELDS)?;
    Ok((
        ComplexFixed::from_raw(f[0], f[1], n, d)?,
        ComplexFixed::from_raw(f[2], f[3], n, d)?,
    ))
}

#[cfg(test)]
#[path = "codec_tests.rs"]
mod tests;
