use std::os::unix::ffi::OsStrExt;
use std::path::Path;

/// True if `path` is `base` or lies below it. Purely lexical, no
/// filesystem access, so both should already be canonical.
///
/// ```
/// use confine::paths::is_under;
/// assert!(is_under("/foo".as_ref(), "/foo/bar".as_ref()));
/// assert!(!is_under("/foo".as_ref(), "/bar".as_ref()));
/// assert!(!is_under("/foo/bar".as_ref(), "/foo/b".as_ref()));
/// ```
pub fn is_under(base: &Path, path: &Path) -> bool {
    let base = base.as_os_str().as_bytes();
    let path = path.as_os_str().as_bytes();

    if base.len() > path.len() {
        return false;
    }
    // root contains everything; the separator check below can't express that
    if base == b"/" {
        return true;
    }
    path.starts_with(base) && matches!(path.get(base.len()), None | Some(b'/'))
}

/// Non-empty `/`-separated segments of `path`, left to right. `.` and `..`
/// are kept as-is; resolving them is the walker's job.
pub fn components(path: &Path) -> impl Iterator<Item = &Path> {
    path.as_os_str()
        .as_bytes()
        .split(|b| *b == b'/')
        .filter(|c| !c.is_empty())
        .map(|c| Path::new(std::ffi::OsStr::from_bytes(c)))
}
