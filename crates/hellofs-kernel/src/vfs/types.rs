//! Core VFS types.
//!
//! Everything is addressed by inode number. Entries and attributes are plain
//! data.

use std::fmt;
use std::time::SystemTime;

/// Opaque inode identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct InodeId(pub u64);

impl InodeId {
    /// The filesystem root. Always valid, always a directory.
    pub const ROOT: InodeId = InodeId(1);

    /// Returns true if this is the root inode.
    pub fn is_root(self) -> bool {
        self == Self::ROOT
    }

    /// Raw inode number.
    pub fn get(self) -> u64 {
        self.0
    }
}

impl From<u64> for InodeId {
    fn from(ino: u64) -> Self {
        Self(ino)
    }
}

impl fmt::Display for InodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// File type enumeration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display, strum::EnumIter)]
#[strum(serialize_all = "snake_case")]
pub enum FileType {
    /// Regular file.
    File,
    /// Directory.
    Directory,
}

impl FileType {
    /// Returns true if this is a regular file.
    pub fn is_file(&self) -> bool {
        matches!(self, FileType::File)
    }

    /// Returns true if this is a directory.
    pub fn is_dir(&self) -> bool {
        matches!(self, FileType::Directory)
    }

    /// The `d_type` value carried in an encoded dirent.
    pub fn dirent_type(&self) -> u32 {
        match self {
            FileType::File => libc::DT_REG as u32,
            FileType::Directory => libc::DT_DIR as u32,
        }
    }
}

/// Directory entry.
///
/// `offset` is the entry's 1-based position in its parent's listing. It is
/// the value a caller passes back to resume enumeration after this entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirEntry {
    /// Position in the parent listing, starting at 1.
    pub offset: u64,
    /// Target inode.
    pub inode: InodeId,
    /// Entry name (not full path).
    pub name: String,
    /// Entry type.
    pub kind: FileType,
}

impl DirEntry {
    /// Create a new directory entry.
    pub fn new(offset: u64, inode: InodeId, name: impl Into<String>, kind: FileType) -> Self {
        Self {
            offset,
            inode,
            name: name.into(),
            kind,
        }
    }
}

/// File attributes (metadata).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileAttr {
    /// Inode these attributes describe.
    pub inode: InodeId,
    /// File type.
    pub kind: FileType,
    /// Size in bytes.
    pub size: u64,
    /// Unix permissions (e.g., 0o444).
    pub perm: u16,
    /// Number of hard links.
    pub nlink: u32,
    /// Last modification time.
    pub mtime: SystemTime,
}

impl FileAttr {
    /// Attributes for a read-only file.
    pub fn file(inode: InodeId, mtime: SystemTime) -> Self {
        Self {
            inode,
            kind: FileType::File,
            size: 0,
            perm: 0o444,
            nlink: 1,
            mtime,
        }
    }

    /// Attributes for a read-only directory.
    pub fn directory(inode: InodeId, mtime: SystemTime) -> Self {
        Self {
            inode,
            kind: FileType::Directory,
            size: 0,
            perm: 0o555,
            nlink: 2, // . and ..
            mtime,
        }
    }

    /// Returns true if this is a regular file.
    pub fn is_file(&self) -> bool {
        self.kind.is_file()
    }

    /// Returns true if this is a directory.
    pub fn is_dir(&self) -> bool {
        self.kind.is_dir()
    }
}
