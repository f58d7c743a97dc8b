//! Release packager for the class_form desktop widget.
//!
//! Compiles the Python entry script into a standalone executable, copies the
//! application config, renders the readme to HTML and zips everything with
//! the source tree. Usable as the `classform_release` binary or as a library.

pub mod bundler;
pub mod cli;
pub mod error;
pub mod metadata;

// Re-export commonly used types
pub use error::{CliError, ReleaseError, Result};
