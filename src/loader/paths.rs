//! Config file path resolution.

use std::path::{Component, Path, PathBuf};

/// Resolve a user-supplied config path.
///
/// Expands a leading `~`, anchors relative paths at the current directory and
/// canonicalizes when the target exists. Missing targets are normalized
/// lexically instead so the caller can report the path that was looked up.
pub fn resolve_path(path: &Path) -> PathBuf {
    let expanded = match path.to_str() {
        Some(raw) => PathBuf::from(shellexpand::tilde(raw).as_ref()),
        None => path.to_path_buf(),
    };

    let absolute = if expanded.is_absolute() {
        expanded
    } else {
        match std::env::current_dir() {
            Ok(cwd) => cwd.join(expanded),
            Err(_) => expanded,
        }
    };

    dunce::canonicalize(&absolute).unwrap_or_else(|_| normalize(&absolute))
}

/// Whether `path` names an existing regular file.
pub fn is_existing_file(path: &Path) -> bool {
    path.is_file()
}

fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if !out.pop() {
                    out.push(component);
                }
            }
            other => out.push(other),
        }
    }
    out
}
