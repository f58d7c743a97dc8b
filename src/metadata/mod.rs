//! Release manifest (`release.toml`) loading and asset discovery.

use crate::bundler::{
    ArchiveSettings, CompileSettings, PackageSettings, PathSettings, RenderSettings,
    SettingsBuilder,
};
use crate::error::{CliError, ReleaseError, Result};
use anyhow::Context as _;
use std::path::{Path, PathBuf};

/// File name looked up in the project root when `--manifest` is not given.
pub const MANIFEST_FILE: &str = "release.toml";

/// Icon locations tried, in order, when the manifest names none.
const ICON_CANDIDATES: &[&str] = &["icon.ico", "*.ico", "assets/*.ico", "res/*.ico", "resources/*.ico"];

/// Parsed `release.toml`. Every table is optional.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ReleaseManifest {
    pub package: PackageSettings,
    pub paths: PathSettings,
    pub compile: CompileSettings,
    pub render: RenderSettings,
    pub archive: ArchiveSettings,
}

impl ReleaseManifest {
    /// Seed a [`SettingsBuilder`] for `root` with every manifest table.
    ///
    /// A missing icon is filled in by [`discover_icon`].
    pub fn into_builder(mut self, root: &Path) -> SettingsBuilder {
        if self.compile.icon.is_none() {
            self.compile.icon = discover_icon(root);
        }

        SettingsBuilder::new(root)
            .package_settings(self.package)
            .path_settings(self.paths)
            .compile_settings(self.compile)
            .render_settings(self.render)
            .archive_settings(self.archive)
    }
}

/// Path of `release.toml` under `root`, if the file exists.
pub fn find_manifest(root: &Path) -> Option<PathBuf> {
    let path = root.join(MANIFEST_FILE);
    path.is_file().then_some(path)
}

/// Load and parse a release manifest.
pub fn load_manifest(path: &Path) -> Result<ReleaseManifest> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    parse_manifest(&contents).map_err(|e| {
        ReleaseError::Cli(CliError::ExecutionFailed {
            command: "parse_release_toml".to_string(),
            reason: format!("Failed to parse {}: {}", path.display(), e),
        })
    })
}

/// Parse manifest text.
pub fn parse_manifest(contents: &str) -> std::result::Result<ReleaseManifest, toml::de::Error> {
    toml::from_str(contents)
}

/// Manifest for `root`: the explicit path if given, `release.toml` if
/// present, otherwise all defaults.
pub fn resolve_manifest(root: &Path, explicit: Option<&Path>) -> Result<ReleaseManifest> {
    match explicit {
        Some(path) => load_manifest(path),
        None => match find_manifest(root) {
            Some(path) => {
                log::debug!("Using manifest {}", path.display());
                load_manifest(&path)
            }
            None => {
                log::debug!("No {} in {}, using defaults", MANIFEST_FILE, root.display());
                Ok(ReleaseManifest::default())
            }
        },
    }
}

/// Find an `.ico` file in the conventional locations, relative to `root`.
pub fn discover_icon(root: &Path) -> Option<PathBuf> {
    let root_pattern = glob::Pattern::escape(root.to_str()?);

    for candidate in ICON_CANDIDATES {
        let Ok(paths) = glob::glob(&format!("{root_pattern}/{candidate}")) else {
            continue;
        };
        let mut found: Vec<PathBuf> = paths.filter_map(|p| p.ok()).filter(|p| p.is_file()).collect();
        found.sort();
        if let Some(icon) = found.into_iter().next() {
            log::debug!("Discovered icon {}", icon.display());
            return Some(icon.strip_prefix(root).map(Path::to_path_buf).unwrap_or(icon));
        }
    }
    None
}
