//! Slash-separated path algebra

/// Normalize a path
///
/// Empty and `.` segments are dropped, `..` removes the preceding segment
/// (never climbing above the root). The result always starts with a single
/// `/` and never ends with one, except for the root itself.
pub fn normalize_path(path: &str) -> String {
    let mut segments: Vec<&str> = Vec::new();
    for segment in path.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            other => segments.push(other),
        }
    }
    format!("/{}", segments.join("/"))
}

/// Join a relative path onto a normalized stem
///
/// The joined part is normalized on its own first, so `..` in `part` cannot
/// climb out of `stem`.
pub fn join_path(stem: &str, part: &str) -> String {
    let joined = format!("{}{}", stem, normalize_path(part)).replace("//", "/");
    let trimmed = joined.trim_end_matches('/');
    if trimmed.is_empty() {
        "/".to_string()
    } else {
        trimmed.to_string()
    }
}

/// Everything before the last `/` (POSIX `dirname`)
pub fn dirname(path: &str) -> &str {
    let head = match path.rfind('/') {
        Some(pos) => &path[..=pos],
        None => return "",
    };
    let stripped = head.trim_end_matches('/');
    if stripped.is_empty() {
        // all separators: the root stays as written
        head
    } else {
        stripped
    }
}

/// Everything after the last `/` (POSIX `basename`)
pub fn basename(path: &str) -> &str {
    match path.rfind('/') {
        Some(pos) => &path[pos + 1..],
        None => path,
    }
}
