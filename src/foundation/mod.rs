pub mod core;
pub mod error;
pub mod ids;
pub(crate) mod math;
