//! Release pipeline for the class_form desktop widget.
//!
//! Turns a Python project into a distributable zip:
//! 1. compile the entry script into a standalone executable
//! 2. copy the application config next to it
//! 3. render the readme to HTML
//! 4. archive the three artifacts together with the source tree
//!
//! [`ReleasePipeline`] drives the steps from resolved [`Settings`].

pub mod builder;
pub mod error;
pub mod settings;
pub mod steps;
pub mod utils;

pub use builder::{PlannedStep, ReleasePipeline, ReleaseReport, ToolInvocation};
pub use error::{Error, Result};
pub use settings::{
    ArchiveCompression, ArchiveSettings, CompileSettings, PackageSettings, PathSettings,
    RenderSettings, Settings, SettingsBuilder, Step,
};
pub use steps::archive::ArchiveArtifact;
