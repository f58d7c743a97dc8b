//! Command line interface for the release tool.
//!
//! Parses arguments, merges them over `release.toml`, prints the plan and
//! drives the [`ReleasePipeline`].

mod args;
mod output;

pub use args::{Args, RuntimeConfig};
pub use output::OutputManager;

use crate::bundler::{ReleasePipeline, ReleaseReport, Settings};
use crate::error::{CliError, Result};
use crate::metadata;

/// Main CLI entry point
pub async fn run() -> Result<i32> {
    let args = Args::parse_args();
    execute(&args).await
}

/// Run with already parsed arguments.
pub async fn execute(args: &Args) -> Result<i32> {
    args.validate()
        .map_err(|reason| CliError::InvalidArguments { reason })?;

    let config = RuntimeConfig::from(args);
    let settings = create_settings(args)?;
    config.verbose_println(&format!("Project root: {}", settings.root().display()))?;

    let pipeline = ReleasePipeline::new(settings);

    config.section("Release plan")?;
    for step in pipeline.plan()? {
        config.indent(&step.to_string())?;
    }

    if args.dry_run {
        config.success("Dry run: nothing was executed")?;
        return Ok(0);
    }

    config.section("Building")?;
    config.progress(&format!(
        "{} step(s), output in {}",
        pipeline.settings().active_steps().len(),
        pipeline.settings().output_dir().display()
    ))?;
    let report = pipeline.run().await?;
    print_report(&config, &report)?;

    Ok(0)
}

/// Merge manifest and flags into [`Settings`].
pub fn create_settings(args: &Args) -> Result<Settings> {
    let manifest = metadata::resolve_manifest(&args.root, args.manifest.as_deref())?;
    let mut builder = manifest.into_builder(&args.root);

    if let Some(dir) = &args.output_dir {
        builder = builder.output_dir(dir);
    }
    if let Some(entry) = &args.entry {
        builder = builder.entry(entry);
    }
    if let Some(icon) = &args.icon {
        builder = builder.icon(icon);
    }
    if let Some(config) = &args.config {
        builder = builder.config(config);
    }
    if let Some(readme) = &args.readme {
        builder = builder.readme(readme);
    }
    if let Some(source_dir) = &args.source_dir {
        builder = builder.source_dir(source_dir);
    }
    if let Some(archive) = &args.archive {
        builder = builder.archive_path(archive);
    }
    if let Some(version) = &args.release_version {
        builder = builder.version(version.clone());
    }

    Ok(builder.skip(args.skip.clone()).clean(args.clean).build()?)
}

fn print_report(config: &RuntimeConfig, report: &ReleaseReport) -> std::io::Result<()> {
    for step in &report.executed {
        config.verbose_println(&format!("finished step {}", step))?;
    }

    config.success(&format!("Executable: {}", report.executable.display()))?;
    config.success(&format!("Config:     {}", report.config.display()))?;
    config.success(&format!("Readme:     {}", report.html.display()))?;

    match &report.archive {
        Some(archive) => {
            config.success(&format!(
                "Archive:    {} ({} bytes, {} entries)",
                archive.path.display(),
                archive.size,
                archive.entries.len()
            ))?;
            config.indent(&format!("SHA256: {}", archive.checksum))?;
            if let Some(sidecar) = &report.checksum_file {
                config.verbose_println(&format!("Checksum written to {}", sidecar.display()))?;
            }
        }
        None => config.warn("Archive step skipped; no zip was produced")?,
    }

    Ok(())
}
