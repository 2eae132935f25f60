//! Pipeline orchestration module.

mod orchestrator;
mod summary;

pub use orchestrator::Pipeline;
pub use summary::print_summary;
