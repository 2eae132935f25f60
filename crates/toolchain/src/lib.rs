//! # Toolchain
//!
//! External tool access for the conversion pipeline.
//!
//! Responsibilities:
//! - Build converter / generator command lines from a `ConversionJob`
//! - Run them through a `ToolRunner` (real processes or mock)
//! - Discover the artifacts each step leaves behind

pub mod artifacts;
pub mod commands;
pub mod mock_runner;
pub mod runner;

pub use artifacts::{collect_convert_artifacts, find_first_with_extension, locate_library};
pub use commands::{convert_command, generate_command};
pub use contracts::{ConversionJob, ToolCommand, ToolStep};
pub use mock_runner::{MockConfig, MockToolRunner};
pub use runner::{run_checked, SystemToolRunner, ToolExit, ToolRunner};
