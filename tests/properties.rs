// Universal properties of the reference model, checked over random formats
// and raw codes rather than hand-picked vectors.

use proptest::prelude::*;
use rand::SeedableRng;
use rand::rngs::SmallRng;
use rs_butterfly_ref::fixed::types::{ComplexFixed, Fixed};
use rs_butterfly_ref::model::butterfly::butterfly;
use rs_butterfly_ref::stream::codec;
use rs_butterfly_ref::stream::stimulus::{self, ParamRange, RunParams};

// A format (n, d) with 0 <= d < n <= 64, plus one raw code per field drawn
// from the full 2^n range.
fn format() -> impl Strategy<Value = (u32, u32)> {
    (1u32..=64).prop_flat_map(|n| (Just(n), 0..n))
}

fn format_and_raw() -> impl Strategy<Value = (u32, u32, u128)> {
    format().prop_flat_map(|(n, d)| (Just(n), Just(d), 0..(1u128 << n)))
}

fn format_and_operands() -> impl Strategy<Value = (u32, u32, [u128; 6])> {
    format().prop_flat_map(|(n, d)| {
        (
            Just(n),
            Just(d),
            prop::array::uniform6(0..(1u128 << n)),
        )
    })
}

proptest! {
    #[test]
    fn resize_to_same_format_is_identity((n, d, raw) in format_and_raw()) {
        let v = Fixed::from_raw(raw, n, d).unwrap();
        prop_assert_eq!(v.resize(n, d).unwrap(), v);
    }

    #[test]
    fn resize_is_a_function_of_raw_bits_and_formats(
        (n, d, raw) in format_and_raw(),
        (n2, d2) in format(),
    ) {
        let a = Fixed::from_raw(raw, n, d).unwrap();
        let b = Fixed::from_raw(raw, n, d).unwrap();
        let ra = a.resize(n2, d2).unwrap();
        let rb = b.resize(n2, d2).unwrap();
        prop_assert_eq!(ra, rb);
        // and repeated application from the target format changes nothing
        prop_assert_eq!(ra.resize(n2, d2).unwrap(), ra);
    }

    #[test]
    fn butterfly_without_twiddle_is_add_sub((n, d, f) in format_and_operands()) {
        let a = ComplexFixed::from_raw(f[0], f[1], n, d).unwrap();
        let b = ComplexFixed::from_raw(f[2], f[3], n, d).unwrap();
        let (sum, diff) = butterfly(n, d, &a, &b, None).unwrap();
        prop_assert_eq!(sum, (a + b).resize(n, d).unwrap());
        prop_assert_eq!(diff, (a - b).resize(n, d).unwrap());
    }

    #[test]
    fn identity_twiddle_matches_bypass((n, d, f) in format_and_operands()) {
        // Needs one spare integer bit so that 1.0 itself does not wrap.
        prop_assume!(d + 2 <= n);
        let a = ComplexFixed::from_raw(f[0], f[1], n, d).unwrap();
        let b = ComplexFixed::from_raw(f[2], f[3], n, d).unwrap();
        let w = ComplexFixed::one(n, d).unwrap();
        let with_w = butterfly(n, d, &a, &b, Some(&w)).unwrap();
        let without = butterfly(n, d, &a, &b, None).unwrap();
        prop_assert_eq!(with_w, without);
    }

    #[test]
    fn request_round_trips((n, d, f) in format_and_operands()) {
        let a = ComplexFixed::from_raw(f[0], f[1], n, d).unwrap();
        let b = ComplexFixed::from_raw(f[2], f[3], n, d).unwrap();
        let w = ComplexFixed::from_raw(f[4], f[5], n, d).unwrap();
        let msg = codec::encode_request(n, &a, &b, Some(&w)).unwrap();
        let (a2, b2, w2) = codec::decode_request(n, d, &msg).unwrap();
        prop_assert_eq!((a2, b2, w2), (a, b, w));
    }

    #[test]
    fn response_round_trips((n, d, f) in format_and_operands()) {
        let sum = ComplexFixed::from_raw(f[0], f[1], n, d).unwrap();
        let diff = ComplexFixed::from_raw(f[2], f[3], n, d).unwrap();
        let msg = codec::encode_response(n, &sum, &diff).unwrap();
        let (sum2, diff2) = codec::decode_response(n, d, &msg).unwrap();
        prop_assert_eq!((sum2, diff2), (sum, diff));
    }

    #[test]
    fn resolved_formats_keep_fraction_below_width(
        n_lo in 2u32..=64,
        n_span in 0u32..8,
        d_hi in 0u32..=64,
        seed in any::<u64>(),
    ) {
        let n_hi = (n_lo + n_span).min(64);
        let run = RunParams {
            run_id: 0,
            sequence_length: 1,
            n: ParamRange::Span(n_lo, n_hi),
            d: ParamRange::Span(0, d_hi),
        };
        let mut rng = SmallRng::seed_from_u64(seed);
        let (n, d) = run.resolve_format(&mut rng);
        prop_assert!(n_lo <= n && n <= n_hi);
        prop_assert!(d < n);
        prop_assert!(Fixed::check_format(n, d).is_ok());
    }

    #[test]
    fn random_operands_fit_their_width((n, d) in format(), seed in any::<u64>()) {
        let mut rng = SmallRng::seed_from_u64(seed);
        let v = stimulus::random_operand(&mut rng, n, d).unwrap();
        prop_assert!(v.raw() >> n == 0);
        prop_assert_eq!(v.width(), n);
        prop_assert_eq!(v.frac(), d);
    }
}
