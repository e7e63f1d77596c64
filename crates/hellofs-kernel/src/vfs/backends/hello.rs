//! The hello tree.
//!
//! ```text
//! /
//! ├── hello
//! └── dir/
//!     └── world
//! ```

use crate::clock::Clock;
use crate::vfs::tree::{NodeSpec, TreeError};
use crate::vfs::types::InodeId;

use super::StaticBackend;

/// `/hello`
pub const HELLO: InodeId = InodeId(2);
/// `/dir`
pub const DIR: InodeId = InodeId(3);
/// `/dir/world`
pub const WORLD: InodeId = InodeId(4);

/// Definition of the hello tree, in listing order.
pub const HELLO_TREE: &[NodeSpec] = &[
    NodeSpec::file(HELLO, InodeId::ROOT, "hello"),
    NodeSpec::dir(DIR, InodeId::ROOT, "dir"),
    NodeSpec::file(WORLD, DIR, "world"),
];

/// Build the hello filesystem.
pub fn hello_fs(clock: &dyn Clock) -> Result<StaticBackend, TreeError> {
    StaticBackend::new(HELLO_TREE, clock)
}
