// src/model/device.rs

use crate::common::ModelError;
use crate::fixed::types::Fixed;
use crate::model::butterfly::butterfly;
use crate::stream::codec;
use crate::stream::harness::{RunOutcome, RunPlan, StreamDriver, UnitParams};
use log::{debug, trace};
use num_bigint::BigUint;
use num_traits::Zero;

/// Cycle-approximate behavioral stand-in for the synthesizable butterfly
/// unit. It decodes each request, runs the same arithmetic the hardware
/// implements, and accounts cycles against the source/sink delays and a
/// width-proportional multiply latency. It exists so the codec, harness and
/// timing budgets can be exercised end-to-end without an HDL simulator; it
/// models the latency envelope of the real unit, not its microarchitecture.
pub struct BehavioralUnit {
    params: Option<UnitParams>,
}

impl BehavioralUnit {
    pub fn new() -> Self {
        Self { params: None }
    }

    // The iterative multiplier retires one operand bit per cycle, plus the
    // input and output registers; the bypass path is just the registers.
    fn latency(params: &UnitParams) -> u64 {
        if params.mult_enabled {
            params.n as u64 + 2
        } else {
            2
        }
    }

    fn evaluate(&self, params: &UnitParams, request: &BigUint) -> Result<BigUint, ModelError> {
        let UnitParams { n, d, mult_enabled } = *params;
        let (a, b, w) = codec::decode_request(n, d, request)?;
        let tw = if mult_enabled { Some(&w) } else { None };
        let (sum, diff) = butterfly(n, d, &a, &b, tw)?;
        codec::encode_response(n, &sum, &diff)
    }
}

impl Default for BehavioralUnit {
    fn default() -> Self {
        Self::new()
    }
}

impl StreamDriver for BehavioralUnit {
    fn configure(&mut self, params: UnitParams) -> Result<(), ModelError> {
        Fixed::check_format(params.n, params.d)?;
        self.params = Some(params);
        Ok(())
    }

    fn run(&mut self, plan: &RunPlan) -> RunOutcome {
        let params = self.params.unwrap_or(plan.params);
        let latency = Self::latency(&params);
        let src_gap = 1 + plan.source.interval_delay as u64;
        let sink_gap = 1 + plan.sink.interval_delay as u64;

        debug!(
            "run {}: {} messages, n={} d={} mult={} latency={}",
            plan.label,
            plan.requests.len(),
            params.n,
            params.d,
            params.mult_enabled,
            latency
        );

        // Per-message handshake times. The source offers its next message a
        // gap after the previous accept; the unit is busy for its full
        // latency (no overlap, like the iterative multiplier); the sink
        // takes a finished response once its own gap has elapsed.
        let mut offer = plan.source.initial_delay as u64;
        let mut sink_ready = plan.sink.initial_delay as u64;
        let mut unit_free = 0u64;
        let mut cycles = 0u64;

        for (index, (request, want)) in plan.requests.iter().zip(&plan.expected).enumerate() {
            let accept = offer.max(unit_free);
            let done = accept + latency;
            let consume = done.max(sink_ready);
            cycles = consume + 1;

            if let Some(bound) = plan.max_cycles {
                if cycles > bound {
                    debug!(
                        "run {}: message {} lands at cycle {}, past the {} budget",
                        plan.label, index, cycles, bound
                    );
                    return RunOutcome::Timeout { cycles };
                }
            }

            let got = match self.evaluate(&params, request) {
                Ok(response) => response,
                // A request that does not decode at the configured format
                // comes back as garbage, the way malformed stimulus would
                // off real hardware.
                Err(err) => {
                    debug!("run {}: request {} rejected: {}", plan.label, index, err);
                    BigUint::zero()
                }
            };
            if got != *want {
                return RunOutcome::Mismatch {
                    index,
                    got,
                    want: want.clone(),
                };
            }
            trace!(
                "run {}: message {} accept@{} done@{} consume@{}",
                plan.label, index, accept, done, consume
            );

            offer = accept + src_gap;
            unit_free = done;
            sink_ready = consume + sink_gap;
        }

        RunOutcome::Passed { cycles }
    }
}

#[cfg(test)]
#[path = "device_tests.rs"]
mod tests;
