//! Packager (standalone executable compiler) configuration.

use std::path::PathBuf;

/// Settings for the `[compile]` table.
///
/// Defaults produce the Nuitka invocation used for the class_form widget:
///
/// ```text
/// python -m nuitka --output-dir=dist --enable-plugin=tk-inter --onefile \
///     --onefile-no-compression --windows-console-mode=disable \
///     --windows-icon-from-ico=icon.ico src/class_form.py
/// ```
#[derive(Debug, Clone, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CompileSettings {
    /// Program to execute.
    pub program: String,

    /// Arguments placed before every generated flag.
    pub args: Vec<String>,

    /// Entry script handed to the packager.
    pub entry: PathBuf,

    /// Icon resource embedded into the executable.
    ///
    /// Default: discovered from the project (see [`crate::metadata::discover_icon`]).
    pub icon: Option<PathBuf>,

    /// Packager plugins to enable (GUI toolkit support).
    pub plugins: Vec<String>,

    /// Produce a single self-extracting executable.
    pub onefile: bool,

    /// Compress the single-file payload. Ignored unless `onefile` is set.
    pub onefile_compression: bool,

    /// Keep the console window attached on Windows.
    pub console: bool,

    /// File name the packager writes into the output directory.
    ///
    /// Default: `<entry stem>.exe` on Windows, `<entry stem>.bin` elsewhere.
    pub executable: Option<String>,

    /// Extra arguments appended after the generated flags.
    pub extra_args: Vec<String>,

    /// Seconds to wait for the packager before giving up.
    pub timeout_secs: u64,
}

impl Default for CompileSettings {
    fn default() -> Self {
        Self {
            program: "python".into(),
            args: vec!["-m".into(), "nuitka".into()],
            entry: PathBuf::from("src/class_form.py"),
            icon: None,
            plugins: vec!["tk-inter".into()],
            onefile: true,
            onefile_compression: false,
            console: false,
            executable: None,
            extra_args: Vec::new(),
            timeout_secs: 30 * 60,
        }
    }
}
