//! Append-only diagnostic text logs.

use crate::utils::fs::ensure_parent_dir;
use crate::Result;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

/// A line-oriented log file (update errors, check mismatches, match lookups).
#[derive(Debug, Clone)]
pub struct DiagnosticLog {
    path: PathBuf,
}

impl DiagnosticLog {
    /// Open a log, creating parent directories. Truncates the file unless
    /// `append` is set.
    pub fn create(path: &Path, append: bool) -> Result<Self> {
        ensure_parent_dir(path)?;
        let mut options = OpenOptions::new();
        options.create(true);
        if append {
            options.append(true);
        } else {
            options.write(true).truncate(true);
        }
        options.open(path)?;
        Ok(Self {
            path: path.to_path_buf(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one line.
    pub fn append(&self, line: &str) -> Result<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        writeln!(file, "{}", line)?;
        Ok(())
    }

    /// Append one line; a failed write is only logged.
    pub fn record(&self, line: &str) {
        if let Err(e) = self.append(line) {
            tracing::warn!("Failed to write {:?}: {}", self.path, e);
        }
    }

    /// Append several lines.
    pub fn append_all(&self, lines: &[String]) -> Result<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        for line in lines {
            writeln!(file, "{}", line)?;
        }
        Ok(())
    }
}
