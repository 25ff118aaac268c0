//! Output formatting and writing utilities
//!
//! The validators print the same human-readable reports whether or not a
//! terminal is attached; color is layered on top when enabled. Warnings are
//! suppressed entirely in quiet mode, matching the validators' contract
//! that warnings never affect the outcome.

use crate::error::Result;
use colored::Colorize;
use std::io::{self, Write};

/// Output writer that handles colors and quiet/verbose modes
pub struct OutputWriter {
    use_color: bool,
    quiet: bool,
    verbose: u8,
    writer: Box<dyn Write>,
}

impl OutputWriter {
    /// Create a new output writer bound to stdout
    pub fn new(use_color: bool, quiet: bool, verbose: u8) -> Self {
        Self {
            use_color,
            quiet,
            verbose,
            writer: Box::new(io::stdout()),
        }
    }

    /// Create an output writer with a custom writer (used in tests)
    #[allow(dead_code)]
    pub fn with_writer(use_color: bool, quiet: bool, verbose: u8, writer: Box<dyn Write>) -> Self {
        Self {
            use_color,
            quiet,
            verbose,
            writer,
        }
    }

    pub fn is_quiet(&self) -> bool {
        self.quiet
    }

    pub fn is_verbose(&self) -> bool {
        self.verbose > 0
    }

    /// Write a line of output
    pub fn writeln(&mut self, content: &str) -> Result<()> {
        writeln!(self.writer, "{}", content)?;
        self.writer.flush()?;
        Ok(())
    }

    /// Write a success line (green when colored)
    pub fn success(&mut self, message: &str) -> Result<()> {
        if self.use_color {
            self.writeln(&message.green().to_string())
        } else {
            self.writeln(message)
        }
    }

    /// Write a warning line (yellow when colored); suppressed in quiet mode
    pub fn warning(&mut self, message: &str) -> Result<()> {
        if self.quiet {
            return Ok(());
        }
        if self.use_color {
            self.writeln(&message.yellow().to_string())
        } else {
            self.writeln(message)
        }
    }

    /// Write an error line (red when colored); never suppressed
    pub fn error(&mut self, message: &str) -> Result<()> {
        if self.use_color {
            self.writeln(&message.red().to_string())
        } else {
            self.writeln(message)
        }
    }
}
