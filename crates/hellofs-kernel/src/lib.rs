//! # hellofs-kernel
//!
//! Core of hellofs: a fixed, read-only directory tree addressed by inode
//! number, with byte-budgeted, resumable directory enumeration.
//!
//! The kernel does no I/O and no logging. The FUSE session, configuration and
//! tracing live in `hellofs-server`.

pub mod clock;
pub mod vfs;

pub use clock::{Clock, FixedClock, SystemClock};
pub use vfs::{
    DirEntry, DirPage, FileAttr, FileType, InodeId, InodeOps, StaticBackend, VfsError, VfsResult,
    hello_fs,
};
