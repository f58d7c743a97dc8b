//! Core Settings struct and implementations.

use super::{ArchiveSettings, CompileSettings, PackageSettings, PathSettings, RenderSettings, Step};
use path_absolutize::Absolutize;
use std::path::{Path, PathBuf};

/// Resolved settings for one release run.
///
/// Constructed via [`SettingsBuilder`](super::SettingsBuilder). The project
/// root is absolute; every other path accessor returns an absolute path
/// resolved against it, so the pipeline never depends on the process working
/// directory.
///
/// # Examples
///
/// ```no_run
/// use classform_release::bundler::SettingsBuilder;
///
/// # fn example() -> classform_release::bundler::Result<()> {
/// let settings = SettingsBuilder::new(".").build()?;
/// println!("archive: {}", settings.archive_path().display());
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug)]
pub struct Settings {
    root: PathBuf,
    product_name: String,
    executable_name: String,
    html_name: String,
    archive_override: Option<PathBuf>,
    package: PackageSettings,
    paths: PathSettings,
    compile: CompileSettings,
    render: RenderSettings,
    archive: ArchiveSettings,
    skip: Vec<Step>,
    clean: bool,
}

impl Settings {
    /// Returns the absolute project root.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolves a path against the project root and normalizes `.` and `..`
    /// lexically. Absolute paths are kept.
    pub fn resolve(&self, path: &Path) -> PathBuf {
        let joined = if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.root.join(path)
        };
        match joined.absolutize() {
            Ok(normalized) => normalized.into_owned(),
            Err(_) => joined,
        }
    }

    /// Returns the product name.
    pub fn product_name(&self) -> &str {
        &self.product_name
    }

    /// Returns the release version, if one was configured.
    pub fn version(&self) -> Option<&semver::Version> {
        self.package.version.as_ref()
    }

    pub fn compile(&self) -> &CompileSettings {
        &self.compile
    }

    pub fn render(&self) -> &RenderSettings {
        &self.render
    }

    pub fn archive(&self) -> &ArchiveSettings {
        &self.archive
    }

    /// Whether a step was excluded from this run.
    pub fn is_skipped(&self, step: Step) -> bool {
        self.skip.contains(&step)
    }

    /// Whether the output directory is wiped before the first step.
    pub fn clean(&self) -> bool {
        self.clean
    }

    /// Steps that will run, in execution order.
    pub fn active_steps(&self) -> Vec<Step> {
        Step::ALL
            .into_iter()
            .filter(|step| !self.is_skipped(*step))
            .collect()
    }

    pub fn entry_script(&self) -> PathBuf {
        self.resolve(&self.compile.entry)
    }

    pub fn icon(&self) -> Option<PathBuf> {
        self.compile.icon.as_deref().map(|p| self.resolve(p))
    }

    pub fn config_file(&self) -> PathBuf {
        self.resolve(&self.paths.config)
    }

    pub fn readme(&self) -> PathBuf {
        self.resolve(&self.paths.readme)
    }

    pub fn source_dir(&self) -> PathBuf {
        self.resolve(&self.paths.source_dir)
    }

    pub fn output_dir(&self) -> PathBuf {
        self.resolve(&self.paths.output_dir)
    }

    /// File name of the executable produced by the packager.
    pub fn executable_name(&self) -> &str {
        &self.executable_name
    }

    pub fn executable_path(&self) -> PathBuf {
        self.output_dir().join(&self.executable_name)
    }

    /// File name of the copied config. Same as the source file name.
    pub fn config_name(&self) -> String {
        self.paths
            .config
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "config.json".into())
    }

    pub fn config_output_path(&self) -> PathBuf {
        self.output_dir().join(self.config_name())
    }

    pub fn html_name(&self) -> &str {
        &self.html_name
    }

    pub fn html_path(&self) -> PathBuf {
        self.output_dir().join(&self.html_name)
    }

    /// Default archive file name: `<product>[-<version>].zip`.
    pub fn archive_name(&self) -> String {
        if let Some(name) = &self.archive.name {
            return name.clone();
        }
        match self.version() {
            Some(version) => format!("{}-{}.zip", self.product_name, version),
            None => format!("{}.zip", self.product_name),
        }
    }

    pub fn archive_path(&self) -> PathBuf {
        match &self.archive_override {
            Some(path) => self.resolve(path),
            None => self.output_dir().join(self.archive_name()),
        }
    }

    /// Sidecar file holding the archive SHA-256 in `sha256sum` format.
    pub fn checksum_path(&self) -> PathBuf {
        let mut name = self.archive_path().into_os_string();
        name.push(".sha256");
        PathBuf::from(name)
    }

    #[allow(clippy::too_many_arguments)]
    pub(super) fn new(
        root: PathBuf,
        product_name: String,
        executable_name: String,
        html_name: String,
        archive_override: Option<PathBuf>,
        package: PackageSettings,
        paths: PathSettings,
        compile: CompileSettings,
        render: RenderSettings,
        archive: ArchiveSettings,
        skip: Vec<Step>,
        clean: bool,
    ) -> Self {
        Self {
            root,
            product_name,
            executable_name,
            html_name,
            archive_override,
            package,
            paths,
            compile,
            render,
            archive,
            skip,
            clean,
        }
    }
}
