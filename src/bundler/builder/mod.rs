//! Pipeline orchestration and coordination.
//!
//! - [`checksum`] - SHA256 checksum calculation for artifacts
//! - [`orchestrator`] - [`ReleasePipeline`] planning and execution
//! - [`process`] - external tool invocation
//! - [`tool_detection`] - external tool availability checking

pub mod checksum;
mod orchestrator;
mod process;
pub mod tool_detection;

pub use orchestrator::{PlannedStep, ReleasePipeline, ReleaseReport};
pub use process::ToolInvocation;
