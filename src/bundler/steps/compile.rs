//! Standalone executable compilation.
//!
//! Builds the packager command line from [`CompileSettings`] and verifies
//! the executable it leaves in the output directory.
//!
//! [`CompileSettings`]: crate::bundler::settings::CompileSettings

use crate::bundler::{
    builder::ToolInvocation,
    error::{Context, Result},
    settings::Settings,
    utils::fs,
};
use std::path::PathBuf;
use std::time::Duration;

/// Packager command for the configured entry script.
///
/// Flag order: configured prefix, output directory, plugins, single-file
/// flags, console mode, icon, extra arguments, entry script last.
pub fn invocation(settings: &Settings) -> ToolInvocation {
    let compile = settings.compile();
    let mut args: Vec<String> = compile.args.clone();

    args.push(format!("--output-dir={}", settings.output_dir().display()));

    for plugin in &compile.plugins {
        args.push(format!("--enable-plugin={plugin}"));
    }

    if compile.onefile {
        args.push("--onefile".into());
        if !compile.onefile_compression {
            args.push("--onefile-no-compression".into());
        }
    }

    if !compile.console {
        args.push("--windows-console-mode=disable".into());
    }

    if let Some(icon) = settings.icon() {
        args.push(format!("--windows-icon-from-ico={}", icon.display()));
    }

    args.extend(compile.extra_args.iter().cloned());
    args.push(settings.entry_script().display().to_string());

    ToolInvocation::new(
        compile.program.clone(),
        settings.root(),
        Duration::from_secs(compile.timeout_secs),
    )
    .args(args)
}

/// Run the packager and return the path of the produced executable.
pub async fn run(settings: &Settings) -> Result<PathBuf> {
    log::info!("Compiling {}", settings.entry_script().display());

    // A leftover executable from a previous build must not pass verification.
    let executable = settings.executable_path();
    fs::remove_file(&executable).await?;

    invocation(settings)
        .run()
        .await
        .context("compiling standalone executable")?;

    let size = fs::verify_artifact("executable", &executable).await?;
    log::info!("✓ Built {} ({} bytes)", executable.display(), size);

    Ok(executable)
}
