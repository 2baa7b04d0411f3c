use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FsError {
    #[error("invalid path argument: {0:?} (must be non-empty and absolute)")]
    InvalidPath(PathBuf),
    #[error("can't stat: {path}")]
    Probe {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("can't canonicalize: {path}")]
    Canonicalize {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("can't read symlink: {path}")]
    ReadLink {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("can't mkdir: symlink not relative: {0}")]
    SymlinkNotRelative(PathBuf),
    #[error("can't mkdir: broken symlink: {0}")]
    BrokenSymlink(PathBuf),
    #[error("can't mkdir: exists but not a directory: {0}")]
    NotADirectory(PathBuf),
    #[error("can't mkdir: {path} not subdirectory of {base}")]
    NotUnderBase { path: PathBuf, base: PathBuf },
    #[error("can't mkdir: {path} under existing bind-mount {mount}")]
    UnderMountPoint { path: PathBuf, mount: PathBuf },
    #[error("can't mkdir: {path}")]
    Mkdir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("can't statvfs: {path}")]
    Statvfs {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("unknown mount flags: {bits:#x} {path}")]
    UnknownMountFlags { bits: u64, path: PathBuf },
}

impl FsError {
    pub fn code(&self) -> &'static str {
        match self {
            FsError::InvalidPath(_) => "InvalidPath",
            FsError::Probe { .. } => "Probe",
            FsError::Canonicalize { .. } => "Canonicalize",
            FsError::ReadLink { .. } => "ReadLink",
            FsError::SymlinkNotRelative(_) => "SymlinkNotRelative",
            FsError::BrokenSymlink(_) => "BrokenSymlink",
            FsError::NotADirectory(_) => "NotADirectory",
            FsError::NotUnderBase { .. } => "NotUnderBase",
            FsError::UnderMountPoint { .. } => "UnderMountPoint",
            FsError::Mkdir { .. } => "Mkdir",
            FsError::Statvfs { .. } => "Statvfs",
            FsError::UnknownMountFlags { .. } => "UnknownMountFlags",
        }
    }

    /// OS error number behind this failure, if an OS call failed.
    pub fn raw_os_error(&self) -> Option<i32> {
        match self {
            FsError::Probe { source, .. }
            | FsError::Canonicalize { source, .. }
            | FsError::ReadLink { source, .. }
            | FsError::Mkdir { source, .. }
            | FsError::Statvfs { source, .. } => source.raw_os_error(),
            _ => None,
        }
    }
}

pub type FsResult<T> = Result<T, FsError>;
