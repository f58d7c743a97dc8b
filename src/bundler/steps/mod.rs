//! The four release steps.
//!
//! - [`compile`] - standalone executable via the packager
//! - [`config`] - application config validation and copy
//! - [`readme`] - markdown to HTML via the renderer
//! - [`archive`] - zip of the artifacts and the source tree

pub mod archive;
pub mod compile;
pub mod config;
pub mod readme;
