// src/stream/stimulus.rs

use crate::common::ModelError;
use crate::fixed::types::{ComplexFixed, Fixed};
use core::f64::consts::PI;
use rand::Rng;

/// Uniform draw over the full raw code range `[0, 2^n)`, built as raw bits.
/// Sampling codes rather than real values is the point: it reaches the
/// extreme negative and positive patterns a uniform real draw almost never
/// lands on.
pub fn random_operand<R: Rng + ?Sized>(rng: &mut R, n: u32, d: u32) -> Result<Fixed, ModelError> {
    Fixed::check_format(n, d)?;
    let raw = rng.random_range(0..(1u128 << n));
    Fixed::from_raw(raw, n, d)
}

pub fn random_cfixed<R: Rng + ?Sized>(
    rng: &mut R,
    n: u32,
    d: u32,
) -> Result<ComplexFixed, ModelError> {
    let re = random_operand(rng, n, d)?;
    let im = random_operand(rng, n, d)?;
    ComplexFixed::from_parts(re, im)
}

/// The k-th forward twiddle factor `e^(-2*pi*i*k/size)` quantized to
/// `(n, d)`. Handy as a realistic operand set next to the uniform draws.
pub fn twiddle(n: u32, d: u32, k: usize, size: usize) -> Result<ComplexFixed, ModelError> {
    let angle = -2.0 * PI * k as f64 / size as f64;
    ComplexFixed::new(libm::cos(angle), libm::sin(angle), n, d)
}

/// A width parameter in a sweep: pinned to one value, or drawn per run from
/// an inclusive span.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ParamRange {
    Pinned(u32),
    Span(u32, u32),
}

impl ParamRange {
    fn lo(self) -> u32 {
        match self {
            ParamRange::Pinned(v) => v,
            ParamRange::Span(lo, _) => lo,
        }
    }

    fn hi(self) -> u32 {
        match self {
            ParamRange::Pinned(v) => v,
            ParamRange::Span(_, hi) => hi,
        }
    }

    pub fn sample<R: Rng + ?Sized>(self, rng: &mut R) -> u32 {
        match self {
            ParamRange::Pinned(v) => v,
            ParamRange::Span(lo, hi) => rng.random_range(lo..=hi),
        }
    }
}

impl From<u32> for ParamRange {
    fn from(v: u32) -> Self {
        ParamRange::Pinned(v)
    }
}

impl From<(u32, u32)> for ParamRange {
    fn from((lo, hi): (u32, u32)) -> Self {
        ParamRange::Span(lo, hi)
    }
}

/// One block of the test parametrization: how many repetitions, which
/// stream lengths, and the width ranges to draw formats from.
#[derive(Clone, Debug)]
pub struct SweepSpec {
    pub executions: u32,
    pub sequence_lengths: Vec<usize>,
    pub n: ParamRange,
    pub d: ParamRange,
}

/// One expanded run: its repetition index, stream length, and the ranges
/// its concrete format will be drawn from.
#[derive(Clone, Copy, Debug)]
pub struct RunParams {
    pub run_id: u32,
    pub sequence_length: usize,
    pub n: ParamRange,
    pub d: ParamRange,
}

impl RunParams {
    /// Draws the concrete `(n, d)` for this run. The fraction width is
    /// clamped to `min(n - 1, d_hi)` so it always stays strictly below the
    /// total width, whatever the spans were.
    pub fn resolve_format<R: Rng + ?Sized>(&self, rng: &mut R) -> (u32, u32) {
        let n = self.n.sample(rng);
        let d_hi = self.d.hi().min(n - 1);
        let d_lo = self.d.lo().min(d_hi);
        let d = ParamRange::Span(d_lo, d_hi).sample(rng);
        (n, d)
    }
}

/// Expands sweep blocks into the flat cross product of runs.
pub fn make_param_grid(specs: &[SweepSpec]) -> Vec<RunParams> {
    let mut grid = Vec::new();
    for spec in specs {
        for &sequence_length in &spec.sequence_lengths {
            for run_id in 0..spec.executions {
                grid.push(RunParams {
                    run_id,
                    sequence_length,
                    n: spec.n,
                    d: spec.d,
                });
            }
        }
    }
    grid
}

/// Many short runs across the small widths, where wraparound is constant.
pub fn small_width_sweep() -> SweepSpec {
    SweepSpec {
        executions: 50,
        sequence_lengths: vec![1, 50],
        n: ParamRange::Span(2, 8),
        d: ParamRange::Span(0, 8),
    }
}

/// Randomly sized formats in the 16..64 range, with longer streams.
pub fn medium_width_sweep() -> SweepSpec {
    SweepSpec {
        executions: 20,
        sequence_lengths: vec![1, 10, 50, 100],
        n: ParamRange::Span(16, 64),
        d: ParamRange::Span(0, 64),
    }
}

/// Pinned formats that deserve extensive streams: the widths real
/// deployments use.
pub fn notable_width_sweeps() -> Vec<SweepSpec> {
    [(8, 4), (24, 8), (32, 24), (32, 16), (64, 32)]
        .into_iter()
        .map(|(n, d)| SweepSpec {
            executions: 1,
            sequence_lengths: vec![1, 100, 1000],
            n: ParamRange::Pinned(n),
            d: ParamRange::Pinned(d),
        })
        .collect()
}

/// A hand-picked stimulus vector: real-valued operand pairs plus format.
#[derive(Clone, Copy, Debug)]
pub struct EdgeCase {
    pub n: u32,
    pub d: u32,
    pub a: (f64, f64),
    pub b: (f64, f64),
    pub w: (f64, f64),
}

impl EdgeCase {
    pub fn operands(
        &self,
    ) -> Result<(ComplexFixed, ComplexFixed, Option<ComplexFixed>), ModelError> {
        let a = ComplexFixed::new(self.a.0, self.a.1, self.n, self.d)?;
        let b = ComplexFixed::new(self.b.0, self.b.1, self.n, self.d)?;
        let w = ComplexFixed::new(self.w.0, self.w.1, self.n, self.d)?;
        Ok((a, b, Some(w)))
    }
}

/// Fixed edge vectors: tiny formats, a format where 1.0 itself wraps, unit
/// values, exact halves, and a sum that overflows six bits and must come
/// back wrapped.
pub fn edge_cases() -> Vec<EdgeCase> {
    vec![
        EdgeCase { n: 3, d: 0, a: (0.0, 1.0), b: (0.0, 1.0), w: (0.0, 1.0) },
        EdgeCase { n: 2, d: 1, a: (1.0, 0.0), b: (1.0, 0.0), w: (1.0, 0.0) },
        EdgeCase { n: 8, d: 4, a: (1.0, 1.0), b: (1.0, 1.0), w: (1.0, 1.0) },
        EdgeCase { n: 8, d: 4, a: (0.5, 0.5), b: (0.5, 0.5), w: (1.0, 0.0) },
        // 3+3 overflows (6, 3) and wraps to -2.0
        EdgeCase { n: 6, d: 3, a: (3.0, 3.0), b: (3.0, 3.0), w: (1.0, 0.0) },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    #[test]
    fn test_random_operand_spans_the_code_range() {
        let mut rng = SmallRng::seed_from_u64(7);
        let mut seen_negative = false;
        let mut seen_positive = false;
        for _ in 0..200 {
            let v = random_operand(&mut rng, 4, 1).unwrap();
            assert!(v.raw() < 16);
            if v.to_f64() < 0.0 {
                seen_negative = true;
            }
            if v.to_f64() > 0.0 {
                seen_positive = true;
            }
        }
        assert!(seen_negative && seen_positive);
    }

    #[test]
    fn test_random_operand_validates_format() {
        let mut rng = SmallRng::seed_from_u64(7);
        assert_eq!(
            random_operand(&mut rng, 4, 4),
            Err(ModelError::FracTooWide)
        );
    }

    #[test]
    fn test_grid_shape_matches_cross_product() {
        let grid = make_param_grid(&[small_width_sweep()]);
        // 2 sequence lengths x 50 executions
        assert_eq!(grid.len(), 100);
        assert_eq!(grid[0].run_id, 0);
        assert_eq!(grid[0].sequence_length, 1);
        assert_eq!(grid[49].run_id, 49);
        assert_eq!(grid[50].sequence_length, 50);

        let notable = make_param_grid(&notable_width_sweeps());
        assert_eq!(notable.len(), 15);
    }

    #[test]
    fn test_resolved_fraction_stays_below_width() {
        let mut rng = SmallRng::seed_from_u64(99);
        let grid = make_param_grid(&[small_width_sweep(), medium_width_sweep()]);
        for run in &grid {
            let (n, d) = run.resolve_format(&mut rng);
            assert!(d < n, "d={} must stay below n={}", d, n);
            assert!(Fixed::check_format(n, d).is_ok());
        }
    }

    #[test]
    fn test_twiddle_quantization() {
        // k=0 is exactly 1; k=size/4 is exactly -i.
        let t0 = twiddle(16, 8, 0, 8).unwrap();
        assert_eq!(t0.re.to_f64(), 1.0);
        assert_eq!(t0.im.to_f64(), 0.0);

        let t2 = twiddle(16, 8, 2, 8).unwrap();
        assert_eq!(t2.re.to_f64(), 0.0);
        assert_eq!(t2.im.to_f64(), -1.0);

        // k=1 lands on +-sqrt(2)/2, within one code of the true value.
        let t1 = twiddle(16, 8, 1, 8).unwrap();
        let root_half = core::f64::consts::FRAC_1_SQRT_2;
        assert!((t1.re.to_f64() - root_half).abs() <= 1.0 / 256.0);
        assert!((t1.im.to_f64() + root_half).abs() <= 1.0 / 256.0);
    }
}
