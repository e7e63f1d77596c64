//! Static inode space and directory table.
//!
//! A [`StaticTree`] is built once from a fixed list of [`NodeSpec`]s and never
//! changes afterwards. Child offsets are assigned from declaration order, so
//! every listing is numbered 1, 2, 3, ... with no gaps.

use std::collections::BTreeMap;
use thiserror::Error;

use super::dirent::DirPage;
use super::error::{VfsError, VfsResult};
use super::types::{DirEntry, FileType, InodeId};

/// One node of a fixed tree definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NodeSpec {
    pub inode: InodeId,
    pub parent: InodeId,
    pub name: &'static str,
    pub kind: FileType,
}

impl NodeSpec {
    /// A file node.
    pub const fn file(inode: InodeId, parent: InodeId, name: &'static str) -> Self {
        Self {
            inode,
            parent,
            name,
            kind: FileType::File,
        }
    }

    /// A directory node.
    pub const fn dir(inode: InodeId, parent: InodeId, name: &'static str) -> Self {
        Self {
            inode,
            parent,
            name,
            kind: FileType::Directory,
        }
    }
}

/// Rejected tree definition.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TreeError {
    #[error("inode {0} declared more than once")]
    DuplicateInode(InodeId),

    #[error("invalid entry name {name:?} for inode {inode}")]
    InvalidName { inode: InodeId, name: String },

    #[error("duplicate name {name:?} in directory {parent}")]
    DuplicateName { parent: InodeId, name: String },

    #[error("parent {parent} of inode {inode} is not a known directory")]
    BadParent { inode: InodeId, parent: InodeId },
}

/// The closed set of valid inodes and their kinds.
#[derive(Debug, Clone)]
pub struct InodeSpace {
    kinds: BTreeMap<InodeId, FileType>,
}

impl InodeSpace {
    /// Kind of `inode`, if it is part of the space.
    pub fn kind(&self, inode: InodeId) -> Option<FileType> {
        self.kinds.get(&inode).copied()
    }

    /// Returns true if `inode` is part of the space.
    pub fn contains(&self, inode: InodeId) -> bool {
        self.kinds.contains_key(&inode)
    }

    /// Number of inodes, root included.
    pub fn len(&self) -> usize {
        self.kinds.len()
    }

    /// Always false; the root is always present.
    pub fn is_empty(&self) -> bool {
        self.kinds.is_empty()
    }

    /// All inodes in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = (InodeId, FileType)> + '_ {
        self.kinds.iter().map(|(ino, kind)| (*ino, *kind))
    }
}

/// Directory inode → ordered child listing.
#[derive(Debug, Clone)]
pub struct DirectoryTable {
    listings: BTreeMap<InodeId, Vec<DirEntry>>,
}

impl DirectoryTable {
    /// Full listing of `dir`, if it is a known directory.
    pub fn listing(&self, dir: InodeId) -> Option<&[DirEntry]> {
        self.listings.get(&dir).map(Vec::as_slice)
    }

    /// Produce the page of `dir` starting after `offset`, bounded by
    /// `max_bytes` of encoded output.
    ///
    /// `offset` is 0 for a fresh enumeration or the offset of the last entry
    /// received. An offset equal to the listing length gives an empty page;
    /// anything past it is an error.
    pub fn read_page(&self, dir: InodeId, offset: u64, max_bytes: usize) -> VfsResult<DirPage> {
        let entries = self.listing(dir).ok_or_else(|| VfsError::not_found(dir))?;

        let start = usize::try_from(offset)
            .ok()
            .filter(|&start| start <= entries.len())
            .ok_or_else(|| VfsError::offset_out_of_range(dir, offset, entries.len()))?;

        let mut page = DirPage::new();
        for entry in &entries[start..] {
            if !page.push_within(entry, max_bytes) {
                page.truncated = true;
                break;
            }
        }
        Ok(page)
    }
}

/// Immutable inode space plus directory table.
#[derive(Debug, Clone)]
pub struct StaticTree {
    inodes: InodeSpace,
    dirs: DirectoryTable,
}

impl StaticTree {
    /// Build and validate a tree. The root is implicit and must not be
    /// declared in `specs`.
    pub fn build(specs: &[NodeSpec]) -> Result<Self, TreeError> {
        let mut kinds = BTreeMap::new();
        kinds.insert(InodeId::ROOT, FileType::Directory);

        for spec in specs {
            if kinds.insert(spec.inode, spec.kind).is_some() {
                return Err(TreeError::DuplicateInode(spec.inode));
            }
            if !valid_name(spec.name) {
                return Err(TreeError::InvalidName {
                    inode: spec.inode,
                    name: spec.name.to_string(),
                });
            }
        }

        let mut listings: BTreeMap<InodeId, Vec<DirEntry>> = kinds
            .iter()
            .filter(|(_, kind)| kind.is_dir())
            .map(|(ino, _)| (*ino, Vec::new()))
            .collect();

        for spec in specs {
            let siblings = listings
                .get_mut(&spec.parent)
                .ok_or(TreeError::BadParent {
                    inode: spec.inode,
                    parent: spec.parent,
                })?;
            if siblings.iter().any(|e| e.name == spec.name) {
                return Err(TreeError::DuplicateName {
                    parent: spec.parent,
                    name: spec.name.to_string(),
                });
            }
            let offset = siblings.len() as u64 + 1;
            siblings.push(DirEntry::new(offset, spec.inode, spec.name, spec.kind));
        }

        Ok(Self {
            inodes: InodeSpace { kinds },
            dirs: DirectoryTable { listings },
        })
    }

    pub fn inodes(&self) -> &InodeSpace {
        &self.inodes
    }

    pub fn directories(&self) -> &DirectoryTable {
        &self.dirs
    }
}

fn valid_name(name: &str) -> bool {
    !name.is_empty() && name != "." && name != ".." && !name.contains(['/', '\0'])
}
