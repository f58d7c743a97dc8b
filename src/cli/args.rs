//! Command line argument parsing and validation.
//!
//! This module provides CLI argument parsing using clap,
//! with validation of flag combinations clap cannot express.

use crate::bundler::Step;
use clap::Parser;
use std::path::PathBuf;

/// Release packager for the class_form desktop widget
#[derive(Parser, Debug)]
#[command(
    name = "classform_release",
    version,
    about = "Build, document and archive a class_form release",
    long_about = "Builds a release of a Python desktop application:

  1. compile the entry script into a standalone executable (Nuitka by default)
  2. copy the JSON config into the output directory
  3. render the markdown readme to HTML
  4. zip the executable, config, HTML and source directory

Defaults come from release.toml in the project root; flags override it.
Path flags are relative to --root.

Usage:
  classform_release
  classform_release --root ../class_form --release-version 1.3.0
  classform_release --skip compile --dry-run

Exit code 0 = archive guaranteed to exist at the reported path."
)]
pub struct Args {
    /// Project root; every relative path is resolved against it
    #[arg(
        short,
        long,
        env = "CLASSFORM_RELEASE_ROOT",
        default_value = ".",
        value_name = "DIR"
    )]
    pub root: PathBuf,

    /// Release manifest (default: <root>/release.toml when present)
    #[arg(short, long, value_name = "FILE")]
    pub manifest: Option<PathBuf>,

    /// Output directory for the executable, config, HTML and archive
    #[arg(
        short,
        long,
        env = "CLASSFORM_RELEASE_OUTPUT_DIR",
        value_name = "DIR"
    )]
    pub output_dir: Option<PathBuf>,

    /// Entry script passed to the packager
    #[arg(long, value_name = "FILE")]
    pub entry: Option<PathBuf>,

    /// Icon embedded into the executable
    #[arg(long, value_name = "FILE")]
    pub icon: Option<PathBuf>,

    /// Application config copied next to the executable
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Markdown readme rendered to HTML
    #[arg(long, value_name = "FILE")]
    pub readme: Option<PathBuf>,

    /// Source directory included in the archive
    #[arg(long, value_name = "DIR")]
    pub source_dir: Option<PathBuf>,

    /// Archive path (default: <output-dir>/<name>[-<version>].zip)
    #[arg(short, long, value_name = "FILE")]
    pub archive: Option<PathBuf>,

    /// Release version appended to the default archive name
    #[arg(long, value_name = "SEMVER")]
    pub release_version: Option<semver::Version>,

    /// Skip a step (repeatable); skipped steps reuse existing artifacts
    #[arg(long, value_enum, value_name = "STEP")]
    pub skip: Vec<Step>,

    /// Remove the output directory before building
    #[arg(long)]
    pub clean: bool,

    /// Print the plan without running anything
    #[arg(long)]
    pub dry_run: bool,

    /// Only print errors
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Print extra detail
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Validate arguments for consistency
    pub fn validate(&self) -> Result<(), String> {
        if Step::ALL.iter().all(|step| self.skip.contains(step)) {
            return Err("Every step is skipped; nothing to do".to_string());
        }

        // --clean wipes the artifacts a skipped step would reuse
        if self.clean {
            let reused: Vec<String> = self
                .skip
                .iter()
                .filter(|step| **step != Step::Archive)
                .map(|step| step.to_string())
                .collect();
            if !reused.is_empty() {
                return Err(format!(
                    "--clean cannot be combined with --skip {}",
                    reused.join(", --skip ")
                ));
            }
        }

        Ok(())
    }
}

/// Configuration derived from command line arguments
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    /// Output manager for colored terminal output
    output: super::OutputManager,
}

impl From<&Args> for RuntimeConfig {
    fn from(args: &Args) -> Self {
        let output = super::OutputManager::new(args.verbose, args.quiet);
        Self { output }
    }
}

impl RuntimeConfig {
    /// Print verbose message if in verbose mode
    pub fn verbose_println(&self, message: &str) -> std::io::Result<()> {
        self.output.verbose(message)
    }

    /// Print success message if not in quiet mode
    pub fn success(&self, message: &str) -> std::io::Result<()> {
        self.output.success(message)
    }

    /// Print warning message if not in quiet mode
    pub fn warn(&self, message: &str) -> std::io::Result<()> {
        self.output.warn(message)
    }

    /// Print progress message
    pub fn progress(&self, message: &str) -> std::io::Result<()> {
        self.output.progress(message)
    }

    /// Print section header
    pub fn section(&self, title: &str) -> std::io::Result<()> {
        self.output.section(title)
    }

    /// Print indented text
    pub fn indent(&self, message: &str) -> std::io::Result<()> {
        self.output.indent(message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Args {
        Args::try_parse_from(std::iter::once("classform_release").chain(args.iter().copied()))
            .unwrap()
    }

    #[test]
    fn defaults() {
        let args = parse(&[]);
        assert_eq!(args.root, PathBuf::from("."));
        assert!(args.skip.is_empty());
        assert!(!args.dry_run);
        assert!(args.validate().is_ok());
    }

    #[test]
    fn repeatable_skip_and_version() {
        let args = parse(&["--skip", "compile", "--skip", "readme", "--release-version", "1.2.3"]);
        assert_eq!(args.skip, vec![Step::Compile, Step::Readme]);
        assert_eq!(args.release_version, Some(semver::Version::new(1, 2, 3)));
    }

    #[test]
    fn invalid_values_are_parse_errors() {
        let argv = ["classform_release", "--release-version", "latest"];
        assert!(Args::try_parse_from(argv).is_err());
        let argv = ["classform_release", "--skip", "upload"];
        assert!(Args::try_parse_from(argv).is_err());
        let argv = ["classform_release", "--quiet", "--verbose"];
        assert!(Args::try_parse_from(argv).is_err());
    }

    #[test]
    fn skipping_everything_is_rejected() {
        let args = parse(&[
            "--skip", "compile", "--skip", "config", "--skip", "readme", "--skip", "archive",
        ]);
        assert!(args.validate().unwrap_err().contains("nothing to do"));
    }

    #[test]
    fn clean_conflicts_with_reused_artifacts() {
        let args = parse(&["--clean", "--skip", "compile"]);
        assert_eq!(
            args.validate().unwrap_err(),
            "--clean cannot be combined with --skip compile"
        );

        let args = parse(&["--clean", "--skip", "archive"]);
        assert!(args.validate().is_ok());
    }
}
