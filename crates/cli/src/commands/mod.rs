//! Command implementations.

mod convert;

pub use convert::run_conversion;
