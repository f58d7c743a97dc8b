//! Builder for constructing Settings.

use super::{
    ArchiveSettings, CompileSettings, PackageSettings, PathSettings, RenderSettings, Settings, Step,
};
use crate::bundler::error::{Context, ErrorExt};
use path_absolutize::Absolutize;
use std::path::{Path, PathBuf};

/// Builder for constructing [`Settings`].
///
/// Sections start at their defaults. Manifest tables replace whole sections;
/// the individual override setters (used by the command line) then patch
/// single fields, so a flag always wins over `release.toml`.
///
/// # Examples
///
/// ```no_run
/// use classform_release::bundler::{SettingsBuilder, Step};
///
/// # fn example() -> classform_release::bundler::Result<()> {
/// let settings = SettingsBuilder::new("/work/class_form")
///     .output_dir("out")
///     .skip(vec![Step::Compile])
///     .build()?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Default)]
pub struct SettingsBuilder {
    root: PathBuf,
    package: PackageSettings,
    paths: PathSettings,
    compile: CompileSettings,
    render: RenderSettings,
    archive: ArchiveSettings,
    archive_override: Option<PathBuf>,
    skip: Vec<Step>,
    clean: bool,
}

impl SettingsBuilder {
    /// Creates a builder for the project rooted at `root`.
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
            ..Default::default()
        }
    }

    pub fn package_settings(mut self, settings: PackageSettings) -> Self {
        self.package = settings;
        self
    }

    pub fn path_settings(mut self, settings: PathSettings) -> Self {
        self.paths = settings;
        self
    }

    pub fn compile_settings(mut self, settings: CompileSettings) -> Self {
        self.compile = settings;
        self
    }

    pub fn render_settings(mut self, settings: RenderSettings) -> Self {
        self.render = settings;
        self
    }

    pub fn archive_settings(mut self, settings: ArchiveSettings) -> Self {
        self.archive = settings;
        self
    }

    pub fn output_dir<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.paths.output_dir = path.as_ref().to_path_buf();
        self
    }

    pub fn entry<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.compile.entry = path.as_ref().to_path_buf();
        self
    }

    pub fn icon<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.compile.icon = Some(path.as_ref().to_path_buf());
        self
    }

    pub fn config<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.paths.config = path.as_ref().to_path_buf();
        self
    }

    pub fn readme<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.paths.readme = path.as_ref().to_path_buf();
        self
    }

    pub fn source_dir<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.paths.source_dir = path.as_ref().to_path_buf();
        self
    }

    /// Writes the archive to an explicit path instead of the output directory.
    pub fn archive_path<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.archive_override = Some(path.as_ref().to_path_buf());
        self
    }

    pub fn version(mut self, version: semver::Version) -> Self {
        self.package.version = Some(version);
        self
    }

    /// Steps excluded from the run.
    pub fn skip(mut self, steps: Vec<Step>) -> Self {
        self.skip = steps;
        self
    }

    /// Wipe the output directory before running.
    pub fn clean(mut self, clean: bool) -> Self {
        self.clean = clean;
        self
    }

    /// Builds the settings.
    ///
    /// # Errors
    ///
    /// Fails when the root cannot be made absolute or when a default name
    /// cannot be derived (entry script or readme without a file stem).
    pub fn build(self) -> crate::bundler::Result<Settings> {
        let root = self
            .root
            .absolutize()
            .fs_context("resolving project root", &self.root)?
            .into_owned();

        let entry_stem = file_stem(&self.compile.entry)
            .context(format!("entry script {} has no file name", self.compile.entry.display()))?;

        let product_name = self
            .package
            .name
            .clone()
            .unwrap_or_else(|| entry_stem.clone());

        let executable_name = match &self.compile.executable {
            Some(name) => name.clone(),
            None => default_executable_name(&entry_stem),
        };

        let html_name = match &self.render.html {
            Some(name) => name.clone(),
            None => {
                let stem = file_stem(&self.paths.readme)
                    .context(format!("readme {} has no file name", self.paths.readme.display()))?;
                format!("{stem}.html")
            }
        };

        let mut skip = self.skip;
        skip.sort();
        skip.dedup();

        Ok(Settings::new(
            root,
            product_name,
            executable_name,
            html_name,
            self.archive_override,
            self.package,
            self.paths,
            self.compile,
            self.render,
            self.archive,
            skip,
            self.clean,
        ))
    }
}

fn file_stem(path: &Path) -> Option<String> {
    path.file_stem().map(|s| s.to_string_lossy().into_owned())
}

/// Nuitka onefile naming: `.exe` on Windows, `.bin` everywhere else.
fn default_executable_name(stem: &str) -> String {
    if cfg!(target_os = "windows") {
        format!("{stem}.exe")
    } else {
        format!("{stem}.bin")
    }
}
