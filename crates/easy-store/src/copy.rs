//! Recursive directory copies.
//!
//! Used to copy a service subtree out of a local catalog mirror and to
//! take backup copies of a bundle before it is replaced.

use std::path::Path;

use easy_common::error::{EasyError, Result};
use walkdir::WalkDir;

/// Copies every file under `src` into `dst`, preserving relative layout.
///
/// `dst` and any missing parents are created. Symbolic links and `.git`
/// directories are skipped. Returns the number of files copied.
///
/// # Errors
///
/// Returns an error if `src` is not a directory or any file cannot be
/// read or written.
pub fn copy_tree(src: &Path, dst: &Path) -> Result<u64> {
    if !src.is_dir() {
        return Err(EasyError::NotFound {
            kind: "directory",
            id: src.display().to_string(),
        });
    }
    std::fs::create_dir_all(dst).map_err(|e| EasyError::io(dst, e))?;

    let mut copied = 0;
    let walker = WalkDir::new(src)
        .follow_links(false)
        .into_iter()
        .filter_entry(|entry| entry.file_name() != ".git");
    for entry in walker {
        let entry = entry.map_err(|e| {
            let path = e.path().unwrap_or(src).to_path_buf();
            EasyError::io(path, e.into())
        })?;
        let relative = entry
            .path()
            .strip_prefix(src)
            .map_err(|e| EasyError::Config {
                message: format!("walked outside of {}: {e}", src.display()),
            })?;
        let target = dst.join(relative);
        let file_type = entry.file_type();

        if file_type.is_dir() {
            std::fs::create_dir_all(&target).map_err(|e| EasyError::io(&target, e))?;
        } else if file_type.is_file() {
            let _ = std::fs::copy(entry.path(), &target).map_err(|e| EasyError::io(&target, e))?;
            copied += 1;
        } else {
            tracing::debug!(path = %entry.path().display(), "skipping non-regular file");
        }
    }

    tracing::debug!(src = %src.display(), dst = %dst.display(), files = copied, "copied tree");
    Ok(copied)
}
