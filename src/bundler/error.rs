//! Error types for release pipeline operations.
//!
//! Every step returns [`Result`]. Filesystem failures carry the path and a
//! short description of what was being attempted (see [`ErrorExt`]).

use std::path::PathBuf;

/// Result alias for pipeline operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while planning or running the release pipeline.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Free-form failure.
    #[error("{0}")]
    GenericError(String),

    /// IO failure on a known path.
    #[error("{context} ({}): {error}", .path.display())]
    Fs {
        context: &'static str,
        path: PathBuf,
        #[source]
        error: std::io::Error,
    },

    /// An external tool could not be spawned at all.
    #[error("failed to run `{command}`: {error}")]
    CommandFailed {
        command: String,
        #[source]
        error: std::io::Error,
    },

    /// An external tool ran and reported failure.
    #[error("`{command}` exited with {}", .code.map(|c| format!("code {c}")).unwrap_or_else(|| "a signal".into()))]
    ToolFailed { command: String, code: Option<i32> },

    /// An external tool did not finish in time.
    #[error("`{command}` did not finish within {secs}s")]
    ToolTimedOut { command: String, secs: u64 },

    /// A required program is not on PATH.
    #[error("`{program}` not found in PATH. {hint}")]
    ToolNotFound { program: String, hint: String },

    /// An input the pipeline reads does not exist.
    #[error("missing {what}: {}", .path.display())]
    MissingInput { what: &'static str, path: PathBuf },

    /// A step finished but its artifact is absent or empty.
    #[error("expected {what} was not produced at {}", .path.display())]
    MissingArtifact { what: &'static str, path: PathBuf },

    /// The application config file is not a JSON object.
    #[error("invalid config file {}: {reason}", .path.display())]
    InvalidConfig { path: PathBuf, reason: String },

    /// Argument template failure.
    #[error("template error: {0}")]
    Template(#[from] handlebars::RenderError),

    /// Zip writer failure.
    #[error("zip error: {0}")]
    Zip(#[from] zip::result::ZipError),

    /// Bad exclude pattern.
    #[error("invalid exclude pattern: {0}")]
    Pattern(#[from] glob::PatternError),

    /// Source tree traversal failure.
    #[error("walkdir error: {0}")]
    WalkDir(#[from] walkdir::Error),

    /// Path outside its expected base directory.
    #[error("path prefix error: {0}")]
    StripPrefix(#[from] std::path::StripPrefixError),

    /// Error with an added description of the failed operation.
    #[error("{context}: {source}")]
    Context {
        context: String,
        #[source]
        source: Box<Error>,
    },
}

/// Attach path information to IO results.
pub trait ErrorExt<T> {
    /// Convert an IO error into [`Error::Fs`] with a description and path.
    fn fs_context(self, context: &'static str, path: impl Into<PathBuf>) -> Result<T>;
}

impl<T> ErrorExt<T> for std::result::Result<T, std::io::Error> {
    fn fs_context(self, context: &'static str, path: impl Into<PathBuf>) -> Result<T> {
        self.map_err(|error| Error::Fs {
            context,
            path: path.into(),
            error,
        })
    }
}

/// Add a description to any failure.
pub trait Context<T> {
    fn context<C: std::fmt::Display>(self, context: C) -> Result<T>;
}

impl<T, E: Into<Error>> Context<T> for std::result::Result<T, E> {
    fn context<C: std::fmt::Display>(self, context: C) -> Result<T> {
        self.map_err(|e| Error::Context {
            context: context.to_string(),
            source: Box::new(e.into()),
        })
    }
}

impl<T> Context<T> for Option<T> {
    fn context<C: std::fmt::Display>(self, context: C) -> Result<T> {
        self.ok_or_else(|| Error::GenericError(context.to_string()))
    }
}
