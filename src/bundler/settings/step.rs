//! Pipeline steps.

use std::fmt;

/// One stage of the release pipeline, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, clap::ValueEnum)]
pub enum Step {
    /// Build the standalone executable.
    Compile,
    /// Copy the application config into the output directory.
    Config,
    /// Render the readme to HTML.
    Readme,
    /// Zip the artifacts and the source directory.
    Archive,
}

impl Step {
    pub const ALL: [Step; 4] = [Step::Compile, Step::Config, Step::Readme, Step::Archive];
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Step::Compile => "compile",
            Step::Config => "config",
            Step::Readme => "readme",
            Step::Archive => "archive",
        };
        f.write_str(name)
    }
}
