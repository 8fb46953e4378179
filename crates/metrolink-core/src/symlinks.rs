//! Depth-limited symlink listing under a modules directory.

use std::fs;
use std::io;
use std::path::Path;

/// List symbolic-link entry names under `directory`, up to `depth` extra
/// levels of ordinary subdirectories.
///
/// At depth 0 only the directory's own symlink entries are returned. At
/// depth > 0 each ordinary subdirectory (passing `filter`, when given) is
/// scanned one level deeper and its findings are prefixed with the
/// subdirectory name, yielding names like `@scope/package`. The filter
/// applies to the first level only. Entries are sorted by file name so the
/// result is stable across runs.
pub fn list_symlinks(
    directory: &Path,
    depth: u32,
    filter: Option<&dyn Fn(&str) -> bool>,
) -> io::Result<Vec<String>> {
    let mut entries: Vec<fs::DirEntry> = fs::read_dir(directory)?.collect::<Result<_, _>>()?;
    entries.sort_by_key(fs::DirEntry::file_name);

    let mut symlinks = Vec::new();
    let mut subdirs = Vec::new();

    for entry in entries {
        let file_type = entry.file_type()?;
        let name = entry.file_name().to_string_lossy().into_owned();
        if file_type.is_symlink() {
            symlinks.push(name);
        } else if depth > 0 && file_type.is_dir() && filter.map_or(true, |f| f(&name)) {
            subdirs.push(name);
        }
    }

    for folder in subdirs {
        let nested = list_symlinks(&directory.join(&folder), depth - 1, None)?;
        symlinks.extend(nested.into_iter().map(|name| format!("{folder}/{name}")));
    }

    Ok(symlinks)
}
