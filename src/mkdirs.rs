//! Directory creation confined to a base directory.
//!
//! `mkdirs("/foo", "/bar/baz")` creates `/foo/bar` and `/foo/bar/baz` if they
//! don't already exist; `/foo` itself must exist. Symlinks along the way are
//! followed as long as they are relative and resolve, but the walk can never
//! create anything outside the base, whether via symlinks or `..`.

use crate::errors::{FsError, FsResult};
use crate::logging::Diagnostics;
use crate::paths::{components, is_under};
use crate::probe::{canonicalize, probe};
use std::fs::{self, DirBuilder};
use std::os::unix::fs::DirBuilderExt;
use std::path::{Path, PathBuf};
use tracing::{trace, trace_span};

const DIR_MODE: u32 = 0o777;

pub struct TreeBuilder<'a> {
    diag: &'a Diagnostics,
    denylist: &'a [PathBuf],
}

impl<'a> TreeBuilder<'a> {
    /// `denylist` holds paths (typically active bind mounts) that no new
    /// directory may be created under.
    pub fn new(diag: &'a Diagnostics, denylist: &'a [PathBuf]) -> Self {
        Self { diag, denylist }
    }

    /// Create every missing directory of `path` under `base`.
    ///
    /// Stops at the first problem; directories created before it stay.
    /// The last component may already exist as a non-directory.
    pub fn mkdirs(&self, base: &Path, path: &Path) -> FsResult<()> {
        for p in [base, path] {
            if p.as_os_str().is_empty() || !p.is_absolute() {
                return Err(FsError::InvalidPath(p.to_path_buf()));
            }
        }

        let span = trace_span!("mkdirs", program = %self.diag.program);
        let _enter = span.enter();

        let basec = canonicalize(base)?;
        trace!(base = %basec.display(), path = %path.display(), "start");
        for d in self.denylist {
            trace!(deny = %d.display());
        }

        let mut prefix = basec.clone();
        let mut comps = components(path).peekable();
        while let Some(c) = comps.next() {
            let is_last = comps.peek().is_none();
            // canonical except possibly for the last segment
            let next = prefix.join(c);
            trace!(next = %next.display());
            prefix = match probe(&next, false)? {
                Some(md) => {
                    let md = if md.file_type().is_symlink() { resolve_symlink(&next)? } else { md };
                    if !md.is_dir() && !is_last {
                        return Err(FsError::NotADirectory(next));
                    }
                    let nextc = canonicalize(&next)?;
                    trace!(canonical = %nextc.display(), "exists");
                    nextc
                }
                None => {
                    self.check_creatable(&basec, &next)?;
                    DirBuilder::new()
                        .mode(DIR_MODE)
                        .create(&next)
                        .map_err(|source| FsError::Mkdir { path: next.clone(), source })?;
                    trace!(created = %next.display());
                    next
                }
            };
        }
        trace!("done");
        Ok(())
    }

    fn check_creatable(&self, basec: &Path, next: &Path) -> FsResult<()> {
        if !is_under(basec, next) {
            return Err(FsError::NotUnderBase { path: next.to_path_buf(), base: basec.to_path_buf() });
        }
        if let Some(mount) = self.denylist.iter().find(|d| is_under(d, next)) {
            return Err(FsError::UnderMountPoint { path: next.to_path_buf(), mount: mount.clone() });
        }
        Ok(())
    }
}

/// Only relative links are followed; the target must exist.
fn resolve_symlink(link: &Path) -> FsResult<fs::Metadata> {
    let target = fs::read_link(link).map_err(|source| FsError::ReadLink { path: link.to_path_buf(), source })?;
    if target.is_absolute() {
        return Err(FsError::SymlinkNotRelative(link.to_path_buf()));
    }
    probe(link, true)?.ok_or_else(|| FsError::BrokenSymlink(link.to_path_buf()))
}

/// [`TreeBuilder::mkdirs`] with default diagnostics.
pub fn mkdirs(base: &Path, path: &Path, denylist: &[PathBuf]) -> FsResult<()> {
    TreeBuilder::new(&Diagnostics::default(), denylist).mkdirs(base, path)
}
