//! VFS error types.

use std::io;
use thiserror::Error;

use super::types::InodeId;

/// VFS error type.
///
/// Every failure of the directory subsystem is one of these; nothing here is
/// fatal to the process.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VfsError {
    /// The inode/operation combination is not implemented.
    #[error("operation not supported on inode {inode}")]
    NotSupported { inode: InodeId },

    /// The inode does not name a directory known to the table.
    #[error("no such directory: inode {0}")]
    NotFound(InodeId),

    /// Resume offset is past the end of the listing.
    #[error("offset {offset} out of range for inode {inode} ({len} entries)")]
    OffsetOutOfRange {
        inode: InodeId,
        offset: u64,
        len: usize,
    },
}

impl VfsError {
    /// Create a NotSupported error.
    pub fn not_supported(inode: InodeId) -> Self {
        Self::NotSupported { inode }
    }

    /// Create a NotFound error.
    pub fn not_found(inode: InodeId) -> Self {
        Self::NotFound(inode)
    }

    /// Create an OffsetOutOfRange error.
    pub fn offset_out_of_range(inode: InodeId, offset: u64, len: usize) -> Self {
        Self::OffsetOutOfRange { inode, offset, len }
    }

    /// Kernel error number for this failure.
    pub fn errno(&self) -> libc::c_int {
        match self {
            VfsError::NotSupported { .. } => libc::ENOSYS,
            VfsError::NotFound(_) => libc::ENOENT,
            VfsError::OffsetOutOfRange { .. } => libc::EIO,
        }
    }
}

/// Convert VfsError to std::io::Error for compatibility.
impl From<VfsError> for io::Error {
    fn from(e: VfsError) -> Self {
        match e {
            VfsError::NotSupported { .. } => io::Error::new(io::ErrorKind::Unsupported, e),
            VfsError::NotFound(_) => io::Error::new(io::ErrorKind::NotFound, e),
            VfsError::OffsetOutOfRange { .. } => io::Error::other(e),
        }
    }
}

/// VFS result type.
pub type VfsResult<T> = Result<T, VfsError>;
