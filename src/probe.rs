use crate::errors::{FsError, FsResult};
use std::fs::{self, Metadata};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Stat `path`, returning `None` if it does not exist. With
/// `follow_symlink` false a trailing symlink is reported as itself.
/// Any error other than "not found" is a probe failure.
pub fn probe(path: &Path, follow_symlink: bool) -> FsResult<Option<Metadata>> {
    let res = if follow_symlink {
        fs::metadata(path)
    } else {
        fs::symlink_metadata(path)
    };
    match res {
        Ok(md) => Ok(Some(md)),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(source) => Err(FsError::Probe { path: path.to_path_buf(), source }),
    }
}

/// Absolute, symlink-free form of `path`. Fails if any part can't be resolved.
pub fn canonicalize(path: &Path) -> FsResult<PathBuf> {
    dunce::canonicalize(path).map_err(|source| FsError::Canonicalize { path: path.to_path_buf(), source })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::os::unix::fs::symlink;

    #[test]
    fn missing_path_is_absent() {
        let tmp = tempfile::tempdir().unwrap();
        assert!(probe(&tmp.path().join("nope"), false).unwrap().is_none());
        assert!(probe(&tmp.path().join("nope"), true).unwrap().is_none());
    }

    #[test]
    fn follow_controls_symlink_reporting() {
        let tmp = tempfile::tempdir().unwrap();
        fs::create_dir(tmp.path().join("d")).unwrap();
        symlink("d", tmp.path().join("l")).unwrap();
        let link = tmp.path().join("l");
        assert!(probe(&link, false).unwrap().unwrap().file_type().is_symlink());
        assert!(probe(&link, true).unwrap().unwrap().is_dir());
    }

    #[test]
    fn dangling_symlink_exists_only_unfollowed() {
        let tmp = tempfile::tempdir().unwrap();
        symlink("gone", tmp.path().join("l")).unwrap();
        let link = tmp.path().join("l");
        assert!(probe(&link, false).unwrap().is_some());
        assert!(probe(&link, true).unwrap().is_none());
    }

    #[test]
    fn probe_through_file_is_an_error() {
        let tmp = tempfile::tempdir().unwrap();
        fs::write(tmp.path().join("f"), b"x").unwrap();
        let err = probe(&tmp.path().join("f/child"), false).unwrap_err();
        assert_eq!(err.code(), "Probe");
    }

    #[test]
    fn canonicalize_resolves_links_and_dots() {
        let tmp = tempfile::tempdir().unwrap();
        let root = canonicalize(tmp.path()).unwrap();
        fs::create_dir(root.join("d")).unwrap();
        symlink("d", root.join("l")).unwrap();
        assert_eq!(canonicalize(&root.join("l/../d/.")).unwrap(), root.join("d"));
    }

    #[test]
    fn canonicalize_missing_fails() {
        let tmp = tempfile::tempdir().unwrap();
        let err = canonicalize(&tmp.path().join("missing")).unwrap_err();
        assert!(matches!(err, FsError::Canonicalize { .. }));
    }
}
