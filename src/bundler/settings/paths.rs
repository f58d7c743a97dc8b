//! Input and output locations.

use std::path::PathBuf;

/// Locations from the `[paths]` table, relative to the project root.
#[derive(Debug, Clone, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PathSettings {
    /// Directory receiving the executable, config copy, HTML and archive.
    pub output_dir: PathBuf,

    /// Application configuration file copied next to the executable.
    pub config: PathBuf,

    /// Markdown readme rendered to HTML.
    pub readme: PathBuf,

    /// Source directory archived alongside the artifacts.
    pub source_dir: PathBuf,
}

impl Default for PathSettings {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("dist"),
            config: PathBuf::from("config.json"),
            readme: PathBuf::from("README.md"),
            source_dir: PathBuf::from("src"),
        }
    }
}
