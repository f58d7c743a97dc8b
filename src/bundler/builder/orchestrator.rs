//! Release pipeline orchestration.
//!
//! This module provides the [`ReleasePipeline`] that runs the release steps
//! in order and stops at the first failure.

use crate::bundler::{
    Result, Settings, Step,
    builder::{ToolInvocation, checksum, tool_detection},
    error::Context,
    steps::{self, archive::ArchiveArtifact},
    utils::fs,
};
use std::path::PathBuf;

/// Main release orchestrator.
///
/// Runs compile, config, readme and archive in that order. Every step is
/// verified before the next one starts: a failing packager never leads to an
/// archive built from stale or missing files.
///
/// # Examples
///
/// ```no_run
/// use classform_release::bundler::{ReleasePipeline, SettingsBuilder};
///
/// # async fn example() -> classform_release::bundler::Result<()> {
/// let settings = SettingsBuilder::new(".").build()?;
/// let pipeline = ReleasePipeline::new(settings);
///
/// for step in pipeline.plan()? {
///     println!("{}", step);
/// }
///
/// let report = pipeline.run().await?;
/// if let Some(archive) = report.archive {
///     println!("Created: {} ({} bytes)", archive.path.display(), archive.size);
///     println!("SHA256: {}", archive.checksum);
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct ReleasePipeline {
    settings: Settings,
}

/// One step as it would run.
#[derive(Debug, Clone)]
pub struct PlannedStep {
    pub step: Step,
    /// External command, for steps that shell out.
    pub invocation: Option<ToolInvocation>,
    pub description: String,
}

impl std::fmt::Display for PlannedStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.step, self.description)?;
        if let Some(invocation) = &self.invocation {
            write!(f, "\n    $ {}", invocation)?;
        }
        Ok(())
    }
}

/// What a run produced.
///
/// Paths for skipped steps point at where the artifact is expected; they are
/// only guaranteed to exist when the step ran or the archive was built.
#[derive(Debug, Clone)]
pub struct ReleaseReport {
    pub executed: Vec<Step>,
    pub executable: PathBuf,
    pub config: PathBuf,
    pub html: PathBuf,
    pub archive: Option<ArchiveArtifact>,
    pub checksum_file: Option<PathBuf>,
}

impl ReleasePipeline {
    pub fn new(settings: Settings) -> Self {
        Self { settings }
    }

    /// Returns a reference to the pipeline settings.
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Describes the steps that would run, without touching the filesystem.
    pub fn plan(&self) -> Result<Vec<PlannedStep>> {
        let settings = &self.settings;
        let mut plan = Vec::new();

        for step in settings.active_steps() {
            let planned = match step {
                Step::Compile => PlannedStep {
                    step,
                    invocation: Some(steps::compile::invocation(settings)),
                    description: format!(
                        "compile {} -> {}",
                        settings.entry_script().display(),
                        settings.executable_path().display()
                    ),
                },
                Step::Config => PlannedStep {
                    step,
                    invocation: None,
                    description: format!(
                        "copy {} -> {}",
                        settings.config_file().display(),
                        settings.config_output_path().display()
                    ),
                },
                Step::Readme => PlannedStep {
                    step,
                    invocation: Some(steps::readme::invocation(settings)?),
                    description: format!(
                        "render {} -> {}",
                        settings.readme().display(),
                        settings.html_path().display()
                    ),
                },
                Step::Archive => PlannedStep {
                    step,
                    invocation: None,
                    description: format!(
                        "archive {}, {}, {} and {}/ -> {}",
                        settings.executable_name(),
                        settings.config_name(),
                        settings.html_name(),
                        settings.source_dir().display(),
                        settings.archive_path().display()
                    ),
                },
            };
            plan.push(planned);
        }

        Ok(plan)
    }

    /// Checks inputs and tools for every active step before anything runs.
    pub async fn preflight(&self) -> Result<()> {
        let settings = &self.settings;

        if !settings.root().is_dir() {
            return Err(crate::bundler::Error::MissingInput {
                what: "project root",
                path: settings.root().to_path_buf(),
            });
        }

        for step in settings.active_steps() {
            match step {
                Step::Compile => {
                    fs::require_input("entry script", &settings.entry_script())?;
                    if let Some(icon) = settings.icon() {
                        fs::require_input("icon", &icon)?;
                    }
                    tool_detection::verify(&steps::compile::invocation(settings)).await?;
                }
                Step::Config => fs::require_input("config file", &settings.config_file())?,
                Step::Readme => {
                    fs::require_input("readme", &settings.readme())?;
                    tool_detection::verify(&steps::readme::invocation(settings)?).await?;
                }
                Step::Archive => {
                    fs::require_input("source directory", &settings.source_dir())?;
                    // Artifacts of skipped steps are reused as they are.
                    if settings.is_skipped(Step::Compile) {
                        fs::require_input("executable", &settings.executable_path())?;
                    }
                    if settings.is_skipped(Step::Config) {
                        fs::require_input("config copy", &settings.config_output_path())?;
                    }
                    if settings.is_skipped(Step::Readme) {
                        fs::require_input("HTML readme", &settings.html_path())?;
                    }
                }
            }
        }

        Ok(())
    }

    /// Runs preflight, then every active step in order.
    ///
    /// # Errors
    ///
    /// The first failing step aborts the run; later steps never start.
    pub async fn run(&self) -> Result<ReleaseReport> {
        let settings = &self.settings;
        self.preflight().await.context("preflight check failed")?;

        fs::create_dir_all(&settings.output_dir(), settings.clean()).await?;

        let mut report = ReleaseReport {
            executed: Vec::new(),
            executable: settings.executable_path(),
            config: settings.config_output_path(),
            html: settings.html_path(),
            archive: None,
            checksum_file: None,
        };

        for step in settings.active_steps() {
            log::info!("Step {}", step);
            match step {
                Step::Compile => report.executable = steps::compile::run(settings).await?,
                Step::Config => report.config = steps::config::copy_config(settings).await?,
                Step::Readme => report.html = steps::readme::run(settings).await?,
                Step::Archive => {
                    let archive = steps::archive::create_archive(settings).await?;
                    if settings.archive().checksum {
                        let sidecar = checksum::write_checksum_file(
                            &archive.path,
                            &archive.checksum,
                            &settings.checksum_path(),
                        )
                        .await?;
                        report.checksum_file = Some(sidecar);
                    }
                    report.archive = Some(archive);
                }
            }
            report.executed.push(step);
        }

        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bundler::SettingsBuilder;

    #[test]
    fn plan_lists_active_steps_in_order() {
        let settings = SettingsBuilder::new("/work/app")
            .skip(vec![Step::Readme])
            .build()
            .unwrap();
        let plan = ReleasePipeline::new(settings).plan().unwrap();

        let steps: Vec<Step> = plan.iter().map(|p| p.step).collect();
        assert_eq!(steps, vec![Step::Compile, Step::Config, Step::Archive]);
        assert!(plan[0].invocation.is_some());
        assert!(plan[1].invocation.is_none());

        let rendered = plan[0].to_string();
        assert!(rendered.starts_with("[compile] compile /work/app/src/class_form.py"));
        assert!(rendered.contains("$ python -m nuitka --output-dir=/work/app/dist"));
    }

    #[tokio::test]
    async fn preflight_reports_first_missing_input() {
        let dir = tempfile::tempdir().unwrap();
        let settings = SettingsBuilder::new(dir.path())
            .skip(vec![Step::Compile, Step::Readme])
            .build()
            .unwrap();

        let err = ReleasePipeline::new(settings).preflight().await.unwrap_err();
        match err {
            crate::bundler::Error::MissingInput { what, path } => {
                assert_eq!(what, "config file");
                assert_eq!(path, dir.path().join("config.json"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn archive_with_skipped_compile_needs_existing_executable() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("config.json"), "{}").unwrap();
        std::fs::create_dir_all(dir.path().join("src")).unwrap();
        std::fs::write(dir.path().join("src/class_form.py"), "pass\n").unwrap();

        let settings = SettingsBuilder::new(dir.path())
            .skip(vec![Step::Compile, Step::Readme])
            .build()
            .unwrap();
        let err = ReleasePipeline::new(settings).run().await.unwrap_err();

        match err {
            crate::bundler::Error::Context { source, .. } => assert!(matches!(
                *source,
                crate::bundler::Error::MissingInput { what: "executable", .. }
            )),
            other => panic!("unexpected error: {other}"),
        }
        // Nothing was written before the failure.
        assert!(!dir.path().join("dist").exists());
    }

    #[tokio::test]
    async fn archive_only_run_checks_every_reused_artifact() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("src")).unwrap();
        std::fs::create_dir_all(dir.path().join("dist")).unwrap();
        std::fs::write(dir.path().join("dist/class_form.exe"), "MZ").unwrap();
        std::fs::write(dir.path().join("dist/config.json"), "{}").unwrap();

        let settings = SettingsBuilder::new(dir.path())
            .compile_settings(crate::bundler::CompileSettings {
                executable: Some("class_form.exe".into()),
                ..Default::default()
            })
            .skip(vec![Step::Compile, Step::Config, Step::Readme])
            .build()
            .unwrap();
        let pipeline = ReleasePipeline::new(settings);

        let err = pipeline.preflight().await.unwrap_err();
        assert!(matches!(
            err,
            crate::bundler::Error::MissingInput { what: "HTML readme", .. }
        ));

        std::fs::write(dir.path().join("dist/README.html"), "").unwrap();
        pipeline.preflight().await.unwrap();
    }
}
