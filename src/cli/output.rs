//! Colored terminal output for the release tool.

use colored::Colorize;
use std::io::{self, Write};

/// Writes user-facing progress to stdout.
///
/// `quiet` suppresses everything; errors are printed by the caller; `verbose` enables
/// [`OutputManager::verbose`] lines.
#[derive(Debug, Clone)]
pub struct OutputManager {
    verbose: bool,
    quiet: bool,
}

impl OutputManager {
    pub fn new(verbose: bool, quiet: bool) -> Self {
        Self { verbose, quiet }
    }

    pub fn verbose(&self, message: &str) -> io::Result<()> {
        if self.verbose && !self.quiet {
            writeln!(io::stdout(), "{}", message.dimmed())?;
        }
        Ok(())
    }

    pub fn progress(&self, message: &str) -> io::Result<()> {
        if !self.quiet {
            writeln!(io::stdout(), "{} {}", "→".blue(), message)?;
        }
        Ok(())
    }

    pub fn success(&self, message: &str) -> io::Result<()> {
        if !self.quiet {
            writeln!(io::stdout(), "{} {}", "✓".green(), message)?;
        }
        Ok(())
    }

    pub fn warn(&self, message: &str) -> io::Result<()> {
        if !self.quiet {
            writeln!(io::stdout(), "{} {}", "!".yellow(), message.yellow())?;
        }
        Ok(())
    }

    pub fn section(&self, title: &str) -> io::Result<()> {
        if !self.quiet {
            writeln!(io::stdout(), "\n{}", title.bold())?;
        }
        Ok(())
    }

    pub fn indent(&self, message: &str) -> io::Result<()> {
        if !self.quiet {
            for line in message.lines() {
                writeln!(io::stdout(), "  {}", line)?;
            }
        }
        Ok(())
    }
}
