//! Upload filename derivation.
//!
//! Generated names are collision-resistant (millisecond timestamp prefix)
//! and safe to embed in a URL path. Sanitization strips any directory
//! components from caller-supplied names so a stored value can never
//! resolve outside its category directory.

/// Strip directory components from a caller-supplied filename.
///
/// Returns the final path segment, or `None` when nothing usable remains
/// (empty input, trailing separator, `.` / `..`). Both `/` and `\` count
/// as separators so a Windows-style path cannot smuggle one through.
///
/// # Examples
///
/// ```
/// use sanstha_core::naming::sanitize_file_name;
///
/// assert_eq!(sanitize_file_name("photo.png"), Some("photo.png"));
/// assert_eq!(sanitize_file_name("../../etc/passwd"), Some("passwd"));
/// assert_eq!(sanitize_file_name("uploads/hero/"), None);
/// assert_eq!(sanitize_file_name(".."), None);
/// ```
pub fn sanitize_file_name(name: &str) -> Option<&str> {
    let segment = name.rsplit(['/', '\\']).next().unwrap_or("");
    match segment {
        "" | "." | ".." => None,
        other => Some(other),
    }
}

/// Derive the stored name for an uploaded file.
///
/// Convention: `{unix_millis}-{normalized original name}`, where
/// normalization drops directory components and replaces whitespace runs
/// with `_`. The timestamp prefix makes concurrent uploads to the same
/// category collision-resistant without coordination.
pub fn generated_upload_name(unix_millis: i64, original_name: &str) -> String {
    let base = sanitize_file_name(original_name).unwrap_or("upload");
    let normalized = base.split_whitespace().collect::<Vec<_>>().join("_");
    if normalized.is_empty() {
        format!("{unix_millis}-upload")
    } else {
        format!("{unix_millis}-{normalized}")
    }
}
