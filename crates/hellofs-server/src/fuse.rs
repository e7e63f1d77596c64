//! FUSE adapter.
//!
//! Maps kernel requests onto [`InodeOps`] and typed failures back onto errno
//! values. Only directory opening, directory reading and attributes are
//! served; every other request falls through to `fuser`'s `ENOSYS` default.

use std::sync::Arc;
use std::time::Duration;

use fuser::{Filesystem, ReplyAttr, ReplyDirectory, ReplyOpen, Request};
use hellofs_kernel::{DirPage, FileAttr, FileType, InodeId, InodeOps};
use tracing::{debug, warn};

use crate::config::MountConfig;

/// `fuser` filesystem serving an [`InodeOps`] backend.
#[derive(Debug)]
pub struct HelloFuse<T> {
    fs: Arc<T>,
    readdir_budget: usize,
    attr_ttl: Duration,
}

impl<T: InodeOps> HelloFuse<T> {
    pub fn new(fs: Arc<T>, config: &MountConfig) -> Self {
        Self {
            fs,
            readdir_budget: config.readdir_budget,
            attr_ttl: config.attr_ttl(),
        }
    }

    /// Page for a readdir request. The kernel's offset is signed on the wire.
    ///
    /// An empty reply means end of directory to the kernel, so a page that
    /// could not fit its next entry is an error rather than an empty success.
    fn dir_page(&self, ino: u64, offset: i64) -> Result<DirPage, libc::c_int> {
        let offset = u64::try_from(offset).map_err(|_| libc::EINVAL)?;
        let page = self
            .fs
            .read_dir_page(InodeId(ino), offset, self.readdir_budget)
            .map_err(|e| {
                warn!(ino, offset, error = %e, "readdir rejected");
                e.errno()
            })?;
        if page.is_stalled() {
            warn!(
                ino,
                offset,
                budget = self.readdir_budget,
                "readdir budget too small for next entry"
            );
            return Err(libc::EIO);
        }
        Ok(page)
    }
}

/// Convert kernel attributes to the `fuser` representation.
pub fn to_fuser_attr(attr: &FileAttr, uid: u32, gid: u32) -> fuser::FileAttr {
    fuser::FileAttr {
        ino: attr.inode.get(),
        size: attr.size,
        blocks: 0,
        atime: attr.mtime,
        mtime: attr.mtime,
        ctime: attr.mtime,
        crtime: attr.mtime,
        kind: to_fuser_kind(attr.kind),
        perm: attr.perm,
        nlink: attr.nlink,
        uid,
        gid,
        rdev: 0,
        blksize: 512,
        flags: 0,
    }
}

pub fn to_fuser_kind(kind: FileType) -> fuser::FileType {
    match kind {
        FileType::File => fuser::FileType::RegularFile,
        FileType::Directory => fuser::FileType::Directory,
    }
}

impl<T: InodeOps + 'static> Filesystem for HelloFuse<T> {
    fn opendir(&mut self, _req: &Request<'_>, ino: u64, _flags: i32, reply: ReplyOpen) {
        debug!(ino, "opendir");
        match self.fs.open_dir(InodeId(ino)) {
            // No handle: enumeration is keyed by inode and offset alone.
            Ok(()) => reply.opened(0, 0),
            Err(e) => {
                debug!(ino, error = %e, "opendir rejected");
                reply.error(e.errno());
            }
        }
    }

    fn readdir(
        &mut self,
        _req: &Request<'_>,
        ino: u64,
        _fh: u64,
        offset: i64,
        mut reply: ReplyDirectory,
    ) {
        let page = match self.dir_page(ino, offset) {
            Ok(page) => page,
            Err(errno) => {
                reply.error(errno);
                return;
            }
        };
        debug!(ino, offset, entries = page.len(), bytes = page.encoded_size(), "readdir");

        for entry in &page.entries {
            if reply.add(
                entry.inode.get(),
                entry.offset as i64,
                to_fuser_kind(entry.kind),
                &entry.name,
            ) {
                debug!(ino, offset = entry.offset, "reply buffer full");
                break;
            }
        }
        reply.ok();
    }

    fn getattr(&mut self, req: &Request<'_>, ino: u64, reply: ReplyAttr) {
        match self.fs.getattr(InodeId(ino)) {
            Ok(attr) => reply.attr(&self.attr_ttl, &to_fuser_attr(&attr, req.uid(), req.gid())),
            Err(e) => {
                debug!(ino, error = %e, "getattr rejected");
                reply.error(e.errno());
            }
        }
    }
}

/// Mount `fs` in a background session. Dropping the session unmounts.
pub fn spawn_mount<T: InodeOps + 'static>(
    fs: Arc<T>,
    config: &MountConfig,
) -> anyhow::Result<fuser::BackgroundSession> {
    config.validate()?;
    let mountpoint = config.mountpoint()?;
    let options = config.mount_options(fs.read_only());
    let session = fuser::spawn_mount2(
        HelloFuse::new(fs, config),
        mountpoint,
        &options,
    )
    .map_err(|e| MountError {
        mountpoint: mountpoint.display().to_string(),
        source: e,
    })?;
    Ok(session)
}

/// Mount failure.
#[derive(Debug, thiserror::Error)]
#[error("failed to mount at {mountpoint}: {source}")]
pub struct MountError {
    mountpoint: String,
    #[source]
    source: std::io::Error,
}
