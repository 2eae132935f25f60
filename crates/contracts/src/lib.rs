//! # Contracts
//!
//! Shared interface contracts for the conversion pipeline.
//! All business crates depend on this crate; reverse dependencies are prohibited.
//!
//! ## Data flow
//! - `config_loader` produces a [`ConversionJob`]
//! - `toolchain` turns it into [`ToolCommand`]s and discovers artifacts
//! - the CLI folds the results into a [`JobReport`]

mod artifacts;
mod command;
mod error;
mod job;

pub use artifacts::*;
pub use command::*;
pub use error::*;
pub use job::*;
