/// Cleans a URL path by collapsing dot segments, duplicate slashes and trailing slashes
///
/// The result always starts with `/`. A `..` at the root is dropped, so the
/// cleaned path can never climb above it.
///
/// # Examples
///
/// ```
/// use catechism::url::clean_path;
///
/// assert_eq!(clean_path("/archive/ENG0015/./x/../__P3.HTM"), "/archive/ENG0015/__P3.HTM");
/// assert_eq!(clean_path("__P3.HTM"), "/__P3.HTM");
/// assert_eq!(clean_path(""), "/");
/// ```
pub fn clean_path(path: &str) -> String {
    let mut segments: Vec<&str> = Vec::new();

    for segment in path.split('/') {
        match segment {
            "" | "." => continue,
            ".." => {
                segments.pop();
            }
            _ => segments.push(segment),
        }
    }

    if segments.is_empty() {
        return "/".to_string();
    }

    format!("/{}", segments.join("/"))
}

/// Returns true if `path` is `root` itself or lies below it
pub fn is_under(path: &str, root: &str) -> bool {
    let root = root.trim_end_matches('/');
    if root.is_empty() {
        return true;
    }
    path == root
        || path
            .strip_prefix(root)
            .is_some_and(|rest| rest.starts_with('/'))
}
