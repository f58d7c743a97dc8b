//! External tool detection and availability checking.
//!
//! The packager and the renderer are usually Python modules launched as
//! `python -m <module>`, so finding `python` on PATH is not enough: the
//! module itself is probed with `--version` before any step runs.

use super::ToolInvocation;
use crate::bundler::error::{Error, Result};
use std::path::PathBuf;

/// Locate a program on PATH (or verify an explicit path is executable).
pub fn locate(program: &str) -> Result<PathBuf> {
    match which::which(program) {
        Ok(path) => {
            log::debug!("Found {} at: {}", program, path.display());
            Ok(path)
        }
        Err(e) => {
            log::debug!("{} not found in PATH: {}", program, e);
            Err(Error::ToolNotFound {
                program: program.to_string(),
                hint: install_hint(program, None),
            })
        }
    }
}

/// The module name when an invocation has the `-m <module>` form.
pub fn python_module(invocation: &ToolInvocation) -> Option<&str> {
    match invocation.args.as_slice() {
        [flag, module, ..] if flag == "-m" => Some(module.as_str()),
        _ => None,
    }
}

/// Verify the program exists and, for `-m <module>` invocations, that the
/// module answers `--version`.
pub async fn verify(invocation: &ToolInvocation) -> Result<()> {
    let path = locate(&invocation.program)?;

    let Some(module) = python_module(invocation) else {
        return Ok(());
    };

    match tokio::process::Command::new(&path)
        .args(["-m", module, "--version"])
        .current_dir(&invocation.cwd)
        .output()
        .await
    {
        Ok(output) if output.status.success() => {
            let version = String::from_utf8_lossy(&output.stdout);
            log::info!("✓ {} available: {}", module, version.lines().next().unwrap_or("").trim());
            Ok(())
        }
        Ok(output) => {
            log::warn!(
                "{} -m {} --version failed (exit code: {:?}). Stderr: {}",
                path.display(),
                module,
                output.status.code(),
                String::from_utf8_lossy(&output.stderr)
            );
            Err(Error::ToolNotFound {
                program: format!("{} -m {}", invocation.program, module),
                hint: install_hint(&invocation.program, Some(module)),
            })
        }
        Err(e) => Err(Error::CommandFailed {
            command: format!("{} -m {} --version", invocation.program, module),
            error: e,
        }),
    }
}

fn install_hint(program: &str, module: Option<&str>) -> String {
    match module {
        Some(module) => format!("Install it with `{program} -m pip install {module}`."),
        None if program.starts_with("python") || program == "py" => {
            "Install Python 3 and make sure it is on PATH.".to_string()
        }
        None => "Install it or point `program` in release.toml at it.".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn inv(program: &str, args: &[&str]) -> ToolInvocation {
        ToolInvocation::new(program, &std::env::temp_dir(), Duration::from_secs(5)).args(args.to_vec())
    }

    #[test]
    fn detects_module_form() {
        assert_eq!(python_module(&inv("python", &["-m", "nuitka", "--onefile"])), Some("nuitka"));
        assert_eq!(python_module(&inv("pandoc", &["README.md"])), None);
        assert_eq!(python_module(&inv("python", &["-m"])), None);
    }

    #[test]
    fn unknown_program_has_hint() {
        let err = locate("classform-no-such-tool").unwrap_err();
        match err {
            Error::ToolNotFound { program, hint } => {
                assert_eq!(program, "classform-no-such-tool");
                assert!(hint.contains("release.toml"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn module_hint_mentions_pip() {
        assert_eq!(
            install_hint("python", Some("nuitka")),
            "Install it with `python -m pip install nuitka`."
        );
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn plain_programs_only_need_to_exist() {
        verify(&inv("sh", &["-c", "true"])).await.unwrap();
    }
}
