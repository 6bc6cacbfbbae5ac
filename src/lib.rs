// Bit-exact reference model and stream-test harness for a pipelined
// fixed-point FFT butterfly unit. The synthesizable core itself is an
// external collaborator, reached through the `stream::harness::StreamDriver`
// seam; everything here is the pure arithmetic oracle plus the stimulus,
// codec and timing machinery needed to drive it.

pub mod common;
pub mod fixed;
pub mod model;
pub mod stream;

pub use common::ModelError;
pub use fixed::{ComplexFixed, Fixed};
