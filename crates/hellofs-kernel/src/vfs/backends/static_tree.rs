//! Read-only backend over a [`StaticTree`].
//!
//! Holds no locks: the tree is immutable after construction, so any number of
//! callers can enumerate concurrently.

use std::time::SystemTime;

use crate::clock::Clock;
use crate::vfs::dirent::DirPage;
use crate::vfs::error::{VfsError, VfsResult};
use crate::vfs::ops::{DirTarget, InodeOps};
use crate::vfs::tree::{NodeSpec, StaticTree, TreeError};
use crate::vfs::types::{FileAttr, FileType, InodeId};

/// Fixed, read-only filesystem backend.
#[derive(Debug, Clone)]
pub struct StaticBackend {
    tree: StaticTree,
    /// Timestamp reported for every inode.
    born: SystemTime,
}

impl StaticBackend {
    /// Build a backend from a tree definition, stamping inodes with the
    /// clock's current time.
    pub fn new(specs: &[NodeSpec], clock: &dyn Clock) -> Result<Self, TreeError> {
        Ok(Self {
            tree: StaticTree::build(specs)?,
            born: clock.now(),
        })
    }

    /// The underlying tree.
    pub fn tree(&self) -> &StaticTree {
        &self.tree
    }
}

impl InodeOps for StaticBackend {
    fn open_dir(&self, inode: InodeId) -> VfsResult<()> {
        match DirTarget::of(inode) {
            DirTarget::Root => Ok(()),
            DirTarget::Unhandled => Err(VfsError::not_supported(inode)),
        }
    }

    fn read_dir_page(&self, inode: InodeId, offset: u64, max_bytes: usize) -> VfsResult<DirPage> {
        self.tree.directories().read_page(inode, offset, max_bytes)
    }

    fn getattr(&self, inode: InodeId) -> VfsResult<FileAttr> {
        match self.tree.inodes().kind(inode) {
            Some(FileType::Directory) => Ok(FileAttr::directory(inode, self.born)),
            Some(FileType::File) => Ok(FileAttr::file(inode, self.born)),
            None => Err(VfsError::not_found(inode)),
        }
    }

    fn read_only(&self) -> bool {
        true
    }
}
