pub mod butterfly;
pub mod device;
pub mod timing;

pub use butterfly::butterfly;
pub use device::BehavioralUnit;
pub use timing::cycle_bound;
