//! File system utilities.

use crate::Result;
use std::path::Path;

/// Check that a file exists.
pub fn ensure_file(path: &Path) -> Result<()> {
    if !path.is_file() {
        return Err(crate::Error::PathNotFound(path.display().to_string()));
    }
    Ok(())
}

/// Create the parent directory of `path` if it has one.
pub fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}
