//! Package metadata.

/// Release metadata from the `[package]` table.
///
/// ```toml
/// [package]
/// name = "class_form"
/// version = "1.2.0"
/// ```
#[derive(Debug, Clone, Default, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PackageSettings {
    /// Product name used for the default archive name.
    ///
    /// Default: file stem of the entry script.
    pub name: Option<String>,

    /// Release version appended to the default archive name.
    ///
    /// Must be a valid semantic version when present.
    pub version: Option<semver::Version>,
}
