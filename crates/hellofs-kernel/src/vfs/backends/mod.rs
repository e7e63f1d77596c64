//! VFS backends.
//!
//! Backends implement [`InodeOps`](super::InodeOps) for different trees.

pub mod hello;
mod static_tree;

pub use hello::hello_fs;
pub use static_tree::StaticBackend;
