//! Configuration structures for the release pipeline.
//!
//! Each section mirrors a table of `release.toml` and deserializes with
//! defaults, so a missing manifest or a partial one is always valid.
//! [`SettingsBuilder`] layers command line overrides on top and resolves
//! everything against the project root.

mod archive;
mod builder;
mod compile;
mod core;
mod package;
mod paths;
mod render;
mod step;

pub use archive::{ArchiveCompression, ArchiveSettings};
pub use builder::SettingsBuilder;
pub use compile::CompileSettings;
pub use self::core::Settings;
pub use package::PackageSettings;
pub use paths::PathSettings;
pub use render::RenderSettings;
pub use step::Step;
