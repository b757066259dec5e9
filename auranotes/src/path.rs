//! Folder path utilities.
//!
//! A folder is identified by its path, the names of the folders leading to it
//! joined by [`DELIMITER`]. The empty string is the root.
use crate::errors::NoteStoreError;

pub const DELIMITER: &str = "/";

/// Non-empty segments of `path`, in order.
pub fn segments(path: &str) -> Vec<&str> {
    path.split(DELIMITER).filter(|s| !s.is_empty()).collect()
}

pub fn join(parent: &str, segment: &str) -> String {
    if parent.is_empty() {
        segment.to_owned()
    } else {
        format!("{}{}{}", parent, DELIMITER, segment)
    }
}

/// Is `path` strictly below `parent`?
pub fn is_descendant_of(path: &str, parent: &str) -> bool {
    if parent.is_empty() {
        return !segments(path).is_empty();
    }
    path != parent && path.starts_with(&format!("{}{}", parent, DELIMITER))
}

/// Is `path` exactly one level below `parent`?
pub fn is_direct_child_of(path: &str, parent: &str) -> bool {
    is_descendant_of(path, parent) && segments(path).len() == segments(parent).len() + 1
}

/// Path of the enclosing folder, `None` for a top-level folder or the root.
pub fn parent(path: &str) -> Option<String> {
    let segs = segments(path);
    if segs.len() < 2 {
        None
    } else {
        Some(segs[..segs.len() - 1].join(DELIMITER))
    }
}

/// Last segment of `path`.
pub fn name(path: &str) -> &str {
    segments(path).last().copied().unwrap_or("")
}

/// Every proper ancestor of `path`, outermost first.
pub fn ancestors(path: &str) -> Vec<String> {
    let segs = segments(path);
    (1..segs.len()).map(|i| segs[..i].join(DELIMITER)).collect()
}

/// Move `path` from under `old_prefix` to under `new_prefix`.
///
/// Returns `None` if `path` is neither `old_prefix` nor one of its descendants.
pub fn rebase(path: &str, old_prefix: &str, new_prefix: &str) -> Option<String> {
    if path == old_prefix {
        Some(new_prefix.to_owned())
    } else if old_prefix.is_empty() {
        Some(join(new_prefix, path))
    } else if is_descendant_of(path, old_prefix) {
        let rest = &path[old_prefix.len() + DELIMITER.len()..];
        Some(join(new_prefix, rest))
    } else {
        None
    }
}

/// Check a user-supplied folder name and return it trimmed.
pub fn validate_segment(name: &str) -> Result<String, NoteStoreError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(NoteStoreError::InvalidFolderName(
            "folder name cannot be empty".to_owned(),
        ));
    }
    if trimmed.contains(DELIMITER) {
        return Err(NoteStoreError::InvalidFolderName(format!(
            "folder name `{}` cannot contain `{}`",
            trimmed, DELIMITER
        )));
    }
    Ok(trimmed.to_owned())
}
