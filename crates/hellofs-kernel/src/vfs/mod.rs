//! Virtual Filesystem abstraction.
//!
//! This module provides an inode-addressed, read-only VFS.
//! Key components:
//!
//! - [`InodeOps`] - Core trait for filesystem operations
//! - [`StaticTree`] - Immutable inode space and directory table
//! - [`StaticBackend`] - Backend serving a [`StaticTree`]
//! - [`DirPage`] - One byte-budgeted page of encoded dirents
//!
//! ## Design Decisions
//!
//! - **Inodes, no paths**: Operations take inode numbers as the kernel sends
//!   them. There is no lookup by name.
//! - **Caller-held offsets**: Enumeration resumes from the offset of the last
//!   entry received. No directory handle or cursor is kept server-side.
//! - **Whole entries only**: A page stops before the first entry that would
//!   overflow the byte budget.

pub mod backends;
mod dirent;
mod error;
mod ops;
mod tree;
mod types;

pub use backends::{StaticBackend, hello_fs};
pub use dirent::{DIRENT_HEADER_LEN, DirPage, append_dirent, encoded_len};
pub use error::{VfsError, VfsResult};
pub use ops::{DirTarget, InodeOps};
pub use tree::{DirectoryTable, InodeSpace, NodeSpec, StaticTree, TreeError};
pub use types::{DirEntry, FileAttr, FileType, InodeId};
