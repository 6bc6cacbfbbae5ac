pub mod codec;
pub mod harness;
pub mod stimulus;

pub use harness::{RunOutcome, RunPlan, StreamConfig, StreamDriver, UnitParams};
