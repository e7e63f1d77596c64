//! VFS operations trait.
//!
//! Operations are addressed by inode number and are synchronous: every
//! backend answers from immutable in-memory state, so nothing here can block.

use super::VfsResult;
use super::dirent::DirPage;
use super::types::{DirEntry, FileAttr, InodeId};

/// How the directory session gate treats an inode.
///
/// Only the root is handled today. Supporting more directories means adding
/// a variant here, not a fallthrough.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DirTarget {
    /// The filesystem root; always openable.
    Root,
    /// Anything else; opening reports `NotSupported`.
    Unhandled,
}

impl DirTarget {
    /// Classify `inode` for the session gate.
    pub fn of(inode: InodeId) -> Self {
        if inode.is_root() {
            DirTarget::Root
        } else {
            DirTarget::Unhandled
        }
    }
}

/// Core VFS operations trait.
///
/// Resume state lives entirely in the caller-held offset; implementations keep
/// no per-session cursor.
pub trait InodeOps: Send + Sync {
    // ========================================================================
    // Directories
    // ========================================================================

    /// Check that `inode` may be opened for enumeration.
    fn open_dir(&self, inode: InodeId) -> VfsResult<()>;

    /// Read one page of directory entries.
    ///
    /// Starts after `offset` (0 for the beginning, otherwise the offset of the
    /// last entry received) and never returns more than `max_bytes` of
    /// encoded dirents. An empty page at the end of the listing means
    /// enumeration is complete.
    fn read_dir_page(&self, inode: InodeId, offset: u64, max_bytes: usize) -> VfsResult<DirPage>;

    // ========================================================================
    // Metadata
    // ========================================================================

    /// Get inode attributes.
    fn getattr(&self, inode: InodeId) -> VfsResult<FileAttr>;

    /// Returns true if this filesystem is read-only.
    fn read_only(&self) -> bool;

    // ========================================================================
    // Convenience methods (default implementations)
    // ========================================================================

    /// Read a whole directory by following offsets page after page.
    ///
    /// Stops at the first empty page, which is also what happens if
    /// `max_bytes` is too small for the next entry.
    fn read_dir_all(&self, inode: InodeId, max_bytes: usize) -> VfsResult<Vec<DirEntry>> {
        let mut all = Vec::new();
        let mut offset = 0;
        loop {
            let page = self.read_dir_page(inode, offset, max_bytes)?;
            match page.next_offset() {
                Some(next) => offset = next,
                None => return Ok(all),
            }
            all.extend(page.entries);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dir_target() {
        assert_eq!(DirTarget::of(InodeId::ROOT), DirTarget::Root);
        assert_eq!(DirTarget::of(InodeId(2)), DirTarget::Unhandled);
        assert_eq!(DirTarget::of(InodeId(0)), DirTarget::Unhandled);
        assert_eq!(DirTarget::of(InodeId(u64::MAX)), DirTarget::Unhandled);
    }
}
