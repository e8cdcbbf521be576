//! Discovery of C/C++ sources to rewrite.

use walkdir::WalkDir;

use crate::{Error, NormalizedPath, Result};

/// Extensions of files the rewriter touches.
pub const SOURCE_EXTENSIONS: &[&str] = &["c", "h", "hpp", "cpp"];

/// Returns `true` if the path carries one of [`SOURCE_EXTENSIONS`].
pub fn is_source_file(path: &NormalizedPath) -> bool {
    path.extension()
        .is_some_and(|ext| SOURCE_EXTENSIONS.contains(&ext))
}

/// Expand a mix of files and directories into a sorted, deduplicated list
/// of source files.
///
/// Directories are walked recursively and only files with a source
/// extension are kept. Explicitly named files are kept as given, whatever
/// their extension, so a caller can target a single odd file.
pub fn discover_sources(inputs: &[NormalizedPath]) -> Result<Vec<NormalizedPath>> {
    let mut files = Vec::new();

    for input in inputs {
        if input.is_dir() {
            let root = input.to_native();
            for entry in WalkDir::new(&root).follow_links(false) {
                let entry = entry.map_err(|e| Error::Walk {
                    root: root.clone(),
                    message: e.to_string(),
                })?;
                if !entry.file_type().is_file() {
                    continue;
                }
                let path = NormalizedPath::new(entry.path());
                if is_source_file(&path) {
                    files.push(path);
                }
            }
        } else if input.is_file() {
            files.push(input.clone());
        } else {
            return Err(Error::io(
                input.to_native(),
                std::io::Error::new(std::io::ErrorKind::NotFound, "no such file or directory"),
            ));
        }
    }

    files.sort();
    files.dedup();
    tracing::debug!(count = files.len(), "discovered source files");
    Ok(files)
}
