//! Path helpers shared by the scanner and the configuration loader.

use std::path::{Component, Path, PathBuf};

/// Resolve `path` against `base` unless it is already absolute.
///
/// `.` and `..` components are folded lexically; the filesystem is not consulted.
pub fn to_full_path(base: &Path, path: &Path) -> PathBuf {
    let joined = if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    };
    normalize(&joined)
}

/// Lexically normalize a path (drop `.` and resolve `..` against earlier components).
pub fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if !out.pop() {
                    out.push("..");
                }
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}

/// Build the display label of a merged file.
///
/// The label is the path relative to `root` with `trim_left` leading and
/// `trim_right` trailing segments removed, joined with `/`. When trimming
/// leaves nothing, the file name is used.
pub fn region_label(path: &Path, root: &Path, trim_left: usize, trim_right: usize) -> String {
    let relative = path.strip_prefix(root).unwrap_or(path);
    let segments: Vec<String> = relative
        .components()
        .filter_map(|c| match c {
            Component::Normal(s) => Some(s.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect();

    let end = segments.len().saturating_sub(trim_right);
    let kept = segments.get(trim_left.min(end)..end).unwrap_or_default();
    if kept.is_empty() {
        return path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
    }
    kept.join("/")
}
