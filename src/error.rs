//! Top-level error types for the release tool.
//!
//! Pipeline failures arrive as [`crate::bundler::Error`]; everything around
//! them (argument handling, manifest loading) is reported through
//! [`ReleaseError`].

use thiserror::Error;

/// Result type alias for release tool operations
pub type Result<T> = std::result::Result<T, ReleaseError>;

/// Main error type for the release tool
#[derive(Error, Debug)]
pub enum ReleaseError {
    /// CLI argument errors
    #[error("CLI error: {0}")]
    Cli(#[from] CliError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Pipeline errors
    #[error("Release error: {0}")]
    Bundler(#[from] crate::bundler::Error),

    /// Generic errors from anyhow
    #[error("{0:#}")]
    Anyhow(#[from] anyhow::Error),
}

/// CLI-specific errors
#[derive(Error, Debug)]
pub enum CliError {
    /// Invalid command line arguments
    #[error("Invalid arguments: {reason}")]
    InvalidArguments {
        /// Reason for the error
        reason: String,
    },

    /// Command execution failed
    #[error("Command execution failed: {command} - {reason}")]
    ExecutionFailed {
        /// Command that failed
        command: String,
        /// Reason for the error
        reason: String,
    },
}

impl ReleaseError {
    /// Get actionable recovery suggestions for this error
    pub fn recovery_suggestions(&self) -> Vec<String> {
        use crate::bundler::Error as Pipeline;

        let pipeline = match self {
            ReleaseError::Bundler(Pipeline::Context { source, .. }) => source.as_ref(),
            ReleaseError::Bundler(e) => e,
            ReleaseError::Cli(CliError::ExecutionFailed { command, .. })
                if command == "parse_release_toml" =>
            {
                return vec!["Check release.toml against the documented tables".to_string()];
            }
            _ => return vec!["Check the error message above for specific details".to_string()],
        };

        match pipeline {
            Pipeline::ToolNotFound { hint, .. } => vec![hint.clone()],
            Pipeline::MissingInput {
                what: "executable" | "config copy" | "HTML readme",
                ..
            } => vec!["Run the skipped step again or remove its --skip".to_string()],
            Pipeline::MissingInput { .. } => vec![
                "Run from the project root or pass --root".to_string(),
                "Paths in release.toml are relative to the project root".to_string(),
            ],
            Pipeline::MissingArtifact { what: "executable", .. } => vec![
                "Check the packager output above".to_string(),
                "Set [compile] executable in release.toml if the packager names the file differently"
                    .to_string(),
            ],
            Pipeline::ToolTimedOut { .. } => {
                vec!["Raise timeout_secs for the step in release.toml".to_string()]
            }
            _ => vec!["Check the error message above for specific details".to_string()],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bundler::Error as Pipeline;

    #[test]
    fn tool_hint_is_surfaced_through_context() {
        let err = ReleaseError::Bundler(Pipeline::Context {
            context: "preflight check failed".into(),
            source: Box::new(Pipeline::ToolNotFound {
                program: "python -m nuitka".into(),
                hint: "Install it with `python -m pip install nuitka`.".into(),
            }),
        });
        assert_eq!(
            err.recovery_suggestions(),
            vec!["Install it with `python -m pip install nuitka`."]
        );
    }

    #[test]
    fn reused_artifact_hint_points_at_skip() {
        let err = ReleaseError::Bundler(Pipeline::MissingInput {
            what: "executable",
            path: "dist/class_form.bin".into(),
        });
        assert_eq!(
            err.recovery_suggestions(),
            vec!["Run the skipped step again or remove its --skip"]
        );
    }
}
