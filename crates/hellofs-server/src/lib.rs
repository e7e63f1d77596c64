//! hellofs server: mounts the hello tree over FUSE.
//!
//! The kernel crate owns the tree and its enumeration rules; this crate owns
//! everything that touches the outside world: the FUSE session, errno mapping,
//! configuration, and logging.

pub mod config;
pub mod constants;
pub mod fuse;

pub use config::{Cli, ConfigError, MountConfig};
pub use fuse::{HelloFuse, MountError, spawn_mount};
