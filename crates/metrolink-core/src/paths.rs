//! Path helpers.

use std::io;
use std::path::{Path, PathBuf};

/// Make a path absolute against the process working directory.
///
/// Already-absolute paths are returned unchanged; nothing is resolved
/// against the filesystem.
pub fn absolute(path: &Path) -> io::Result<PathBuf> {
    if path.is_absolute() {
        Ok(path.to_path_buf())
    } else {
        Ok(std::env::current_dir()?.join(path))
    }
}
