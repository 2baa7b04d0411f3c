//! Translation of statvfs(3) `ST_*` flags into the `MS_*` flags mount(2)
//! wants when re-applying a file system's restrictions.
//!
//! The two sets happen to share values in glibc, but statvfs can also report
//! bits mount(2) has no use for, so the mapping is spelled out and anything
//! outside it is refused.

use crate::errors::{FsError, FsResult};
use nix::mount::MsFlags;
use nix::sys::statvfs::FsFlags;
use std::ffi::CString;
use std::mem::MaybeUninit;
use std::os::unix::ffi::OsStrExt;
use std::path::Path;
use tracing::debug;

const FLAG_MAP: [(FsFlags, MsFlags); 9] = [
    (FsFlags::ST_MANDLOCK, MsFlags::MS_MANDLOCK),
    (FsFlags::ST_NOATIME, MsFlags::MS_NOATIME),
    (FsFlags::ST_NODEV, MsFlags::MS_NODEV),
    (FsFlags::ST_NODIRATIME, MsFlags::MS_NODIRATIME),
    (FsFlags::ST_NOEXEC, MsFlags::MS_NOEXEC),
    (FsFlags::ST_NOSUID, MsFlags::MS_NOSUID),
    (FsFlags::ST_RDONLY, MsFlags::MS_RDONLY),
    (FsFlags::ST_RELATIME, MsFlags::MS_RELATIME),
    (FsFlags::ST_SYNCHRONOUS, MsFlags::MS_SYNCHRONOUS),
];

/// Every statvfs bit we know how to translate.
pub fn known_source_bits() -> libc::c_ulong {
    FLAG_MAP.iter().fold(0, |acc, (st, _)| acc | st.bits())
}

/// Map raw statvfs `f_flag` bits for `path` to mount flags. Unknown bits are
/// an error rather than dropped, since one of them could be a restriction.
pub fn translate_flags(raw: libc::c_ulong, path: &Path) -> FsResult<MsFlags> {
    let unknown = raw & !known_source_bits();
    if unknown != 0 {
        return Err(FsError::UnknownMountFlags { bits: u64::from(unknown), path: path.to_path_buf() });
    }
    Ok(FLAG_MAP
        .iter()
        .filter(|(st, _)| raw & st.bits() != 0)
        .fold(MsFlags::empty(), |acc, (_, ms)| acc | *ms))
}

/// Mount flags of the file system containing `path`, suitable for mount(2).
pub fn path_mount_flags(path: &Path) -> FsResult<MsFlags> {
    let raw = statvfs_flags(path)?;
    let flags = translate_flags(raw, path)?;
    debug!(path = %path.display(), raw = %format!("{raw:#x}"), flags = ?flags, "mount flags");
    Ok(flags)
}

// nix's Statvfs::flags() truncates unknown bits, so go to libc for f_flag.
fn statvfs_flags(path: &Path) -> FsResult<libc::c_ulong> {
    let cpath = CString::new(path.as_os_str().as_bytes()).map_err(|_| FsError::InvalidPath(path.to_path_buf()))?;
    let mut sv = MaybeUninit::<libc::statvfs>::uninit();
    // SAFETY: cpath is NUL-terminated and sv points to writable storage of the right type
    let rc = unsafe { libc::statvfs(cpath.as_ptr(), sv.as_mut_ptr()) };
    if rc != 0 {
        return Err(FsError::Statvfs { path: path.to_path_buf(), source: std::io::Error::last_os_error() });
    }
    // SAFETY: statvfs returned success, so it filled in the struct
    let sv = unsafe { sv.assume_init() };
    Ok(sv.f_flag)
}
