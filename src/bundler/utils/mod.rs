//! Filesystem helpers shared by the pipeline steps.

pub mod fs;
