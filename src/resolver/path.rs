//! Page name normalization.

use std::path::{Path, PathBuf};

/// Normalize a requested page name into a root-relative logical path.
///
/// - `\` is treated like `/`
/// - empty and `.` segments are dropped, so a leading `/` means root-relative
/// - `..` removes the previous segment and may not climb above the root
///
/// Case is preserved. Returns the reason on failure.
pub(crate) fn normalize_page(page: &str) -> Result<String, String> {
    let mut segments: Vec<&str> = Vec::new();

    for segment in page.split(['/', '\\']) {
        match segment {
            "" | "." => {}
            ".." => {
                if segments.pop().is_none() {
                    return Err("path climbs above the template root".to_string());
                }
            }
            other => segments.push(other),
        }
    }

    if segments.is_empty() {
        return Err("path does not name a template".to_string());
    }

    Ok(segments.join("/"))
}

/// Extension of the last segment of a normalized page, if any.
///
/// Dot files (`.hidden`) and trailing dots have no extension.
pub(crate) fn page_extension(normalized: &str) -> Option<&str> {
    let file_name = normalized.rsplit('/').next().unwrap_or(normalized);
    match file_name.rfind('.') {
        Some(0) | None => None,
        Some(idx) if idx + 1 == file_name.len() => None,
        Some(idx) => Some(&file_name[idx + 1..]),
    }
}

/// Join a normalized `a/b/c.ext` page onto a storage root.
pub(crate) fn join_root(root: &Path, normalized: &str) -> PathBuf {
    let mut path = root.to_path_buf();
    for segment in normalized.split('/') {
        path.push(segment);
    }
    path
}
