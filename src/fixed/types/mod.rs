pub mod fixed;
pub mod fixed_complex;

pub use fixed::Fixed;
pub use fixed_complex::ComplexFixed;
