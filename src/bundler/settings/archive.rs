//! Release archive configuration.

/// Compression applied to archive entries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArchiveCompression {
    #[default]
    Deflated,
    Stored,
}

impl ArchiveCompression {
    pub fn method(self) -> zip::CompressionMethod {
        match self {
            ArchiveCompression::Deflated => zip::CompressionMethod::Deflated,
            ArchiveCompression::Stored => zip::CompressionMethod::Stored,
        }
    }
}

/// Settings for the `[archive]` table.
#[derive(Debug, Clone, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ArchiveSettings {
    /// Archive file name inside the output directory.
    ///
    /// Default: `<name>.zip`, or `<name>-<version>.zip` when a version is set.
    pub name: Option<String>,

    /// Glob patterns matched against archive entry names (`src/...`).
    pub exclude: Vec<String>,

    pub compression: ArchiveCompression,

    /// Write a `<archive>.sha256` sidecar next to the archive.
    pub checksum: bool,
}

impl Default for ArchiveSettings {
    fn default() -> Self {
        Self {
            name: None,
            exclude: vec!["**/__pycache__/**".into(), "**/*.pyc".into()],
            compression: ArchiveCompression::Deflated,
            checksum: true,
        }
    }
}
