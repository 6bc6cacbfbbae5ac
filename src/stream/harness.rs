// src/stream/harness.rs

use crate::common::ModelError;
use crate::fixed::types::ComplexFixed;
use crate::model::butterfly::butterfly;
use crate::model::timing::cycle_bound;
use crate::stream::codec;
use log::debug;
use num_bigint::BigUint;

/// Flow-control schedule of one stream endpoint: cycles to wait before the
/// first message, and between consecutive messages.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StreamConfig {
    pub initial_delay: u32,
    pub interval_delay: u32,
}

impl StreamConfig {
    pub fn new(initial_delay: u32, interval_delay: u32) -> Self {
        Self {
            initial_delay,
            interval_delay,
        }
    }

    /// No delays anywhere: every handshake fires as soon as it can.
    pub fn back_to_back() -> Self {
        Self::new(0, 0)
    }
}

/// Construction parameters of the unit under test.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct UnitParams {
    pub n: u32,
    pub d: u32,
    pub mult_enabled: bool,
}

/// One fully precomputed simulation run: the request stream, the expected
/// response stream, both endpoint schedules, an optional cycle budget, and
/// a label naming the trace artifact the driver may emit. Nothing here is
/// generated online; the driver receives complete streams up front.
#[derive(Clone, Debug)]
pub struct RunPlan {
    pub params: UnitParams,
    pub requests: Vec<BigUint>,
    pub source: StreamConfig,
    pub expected: Vec<BigUint>,
    pub sink: StreamConfig,
    pub max_cycles: Option<u64>,
    pub label: String,
}

impl RunPlan {
    /// Encodes the operand triples into a request stream, runs the oracle
    /// for the expected responses, and attaches the cycle budget when the
    /// run is bounded. With the multiply stage disabled, any supplied
    /// twiddles are ignored: the wire carries zero fields and the oracle
    /// takes the bypass path, exactly as the unit will. With it enabled,
    /// an absent twiddle also goes out as zero fields, and the unit then
    /// multiplies by zero; the expected responses follow suit.
    pub fn build(
        params: UnitParams,
        operands: &[(ComplexFixed, ComplexFixed, Option<ComplexFixed>)],
        source: StreamConfig,
        sink: StreamConfig,
        bounded: bool,
        label: &str,
    ) -> Result<Self, ModelError> {
        let UnitParams { n, d, mult_enabled } = params;
        let zero = ComplexFixed::zero(n, d)?;
        let mut requests = Vec::with_capacity(operands.len());
        let mut expected = Vec::with_capacity(operands.len());
        for (a, b, w) in operands {
            let w = if mult_enabled {
                Some(w.as_ref().unwrap_or(&zero))
            } else {
                None
            };
            requests.push(codec::encode_request(n, a, b, w)?);
            let (sum, diff) = butterfly(n, d, a, b, w)?;
            expected.push(codec::encode_response(n, &sum, &diff)?);
        }
        let max_cycles = if bounded {
            Some(cycle_bound(n, operands.len(), mult_enabled))
        } else {
            None
        };
        debug!(
            "plan {}: {} messages, n={} d={} mult={} budget={:?}",
            label,
            operands.len(),
            n,
            d,
            mult_enabled,
            max_cycles
        );
        Ok(Self {
            params,
            requests,
            source,
            expected,
            sink,
            max_cycles,
            label: label.to_string(),
        })
    }

    pub fn len(&self) -> usize {
        self.requests.len()
    }

    pub fn is_empty(&self) -> bool {
        self.requests.is_empty()
    }
}

/// Verdict of one run, as reported by the driver. Timeout is its own kind:
/// a deadlocked unit never produces the mismatching message that would
/// otherwise flag it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RunOutcome {
    Passed { cycles: u64 },
    Mismatch {
        index: usize,
        got: BigUint,
        want: BigUint,
    },
    Timeout { cycles: u64 },
}

impl RunOutcome {
    pub fn passed(&self) -> bool {
        matches!(self, RunOutcome::Passed { .. })
    }
}

/// Seam to the simulation driver owning the unit under test. The real
/// implementation wraps the HDL simulator and the generated RTL; tests use
/// the in-crate behavioral unit. Either way the core only hands over
/// precomputed streams and reads back a verdict.
pub trait StreamDriver {
    fn configure(&mut self, params: UnitParams) -> Result<(), ModelError>;
    fn run(&mut self, plan: &RunPlan) -> RunOutcome;
}
