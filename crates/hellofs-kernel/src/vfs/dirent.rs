//! Directory entry wire encoding.
//!
//! Entries are laid out as the kernel's `fuse_dirent` record, in native byte
//! order:
//!
//! ```text
//! ino: u64 | off: u64 | namelen: u32 | type: u32 | name, zero-padded to 8
//! ```

use super::types::DirEntry;

/// Size of the fixed `fuse_dirent` header.
pub const DIRENT_HEADER_LEN: usize = 24;

const DIRENT_ALIGN: usize = 8;

/// Encoded size of a dirent carrying a name of `name_len` bytes.
pub const fn encoded_len(name_len: usize) -> usize {
    (DIRENT_HEADER_LEN + name_len).next_multiple_of(DIRENT_ALIGN)
}

/// Append the encoding of `entry` to `buf`, returning the bytes written.
pub fn append_dirent(buf: &mut Vec<u8>, entry: &DirEntry) -> usize {
    let name = entry.name.as_bytes();
    let len = encoded_len(name.len());
    let start = buf.len();

    buf.reserve(len);
    buf.extend_from_slice(&entry.inode.get().to_ne_bytes());
    buf.extend_from_slice(&entry.offset.to_ne_bytes());
    buf.extend_from_slice(&(name.len() as u32).to_ne_bytes());
    buf.extend_from_slice(&entry.kind.dirent_type().to_ne_bytes());
    buf.extend_from_slice(name);
    buf.resize(start + len, 0);

    len
}

/// One page of a directory enumeration.
///
/// `data` holds the encoded form of `entries`, in the same order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DirPage {
    /// Entries in listing order, each carrying its resume offset.
    pub entries: Vec<DirEntry>,
    /// Encoded dirents.
    pub data: Vec<u8>,
    /// Entries remained after this page but the next one did not fit.
    pub truncated: bool,
}

impl DirPage {
    /// Create an empty page.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `entry` if it fits within `max_bytes` total.
    ///
    /// Returns false, leaving the page untouched, when it would not fit.
    pub fn push_within(&mut self, entry: &DirEntry, max_bytes: usize) -> bool {
        let len = encoded_len(entry.name.len());
        if self.data.len() + len > max_bytes {
            return false;
        }
        append_dirent(&mut self.data, entry);
        self.entries.push(entry.clone());
        true
    }

    /// Returns true if the budget was too small for even one entry, so the
    /// caller cannot make progress without a larger budget.
    pub fn is_stalled(&self) -> bool {
        self.truncated && self.is_empty()
    }

    /// Returns true if no entries were produced.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of entries in the page.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Total encoded size in bytes.
    pub fn encoded_size(&self) -> usize {
        self.data.len()
    }

    /// Offset to resume from after this page, if it produced anything.
    pub fn next_offset(&self) -> Option<u64> {
        self.entries.last().map(|e| e.offset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vfs::types::{FileType, InodeId};

    #[test]
    fn test_encoded_len_alignment() {
        assert_eq!(encoded_len(0), 24);
        assert_eq!(encoded_len(1), 32);
        assert_eq!(encoded_len(5), 32);
        assert_eq!(encoded_len(8), 32);
        assert_eq!(encoded_len(9), 40);
    }

    #[test]
    fn test_append_dirent_layout() {
        let entry = DirEntry::new(1, InodeId(2), "hello", FileType::File);
        let mut buf = Vec::new();
        let written = append_dirent(&mut buf, &entry);

        assert_eq!(written, 32);
        assert_eq!(buf.len(), 32);
        assert_eq!(&buf[0..8], &2u64.to_ne_bytes());
        assert_eq!(&buf[8..16], &1u64.to_ne_bytes());
        assert_eq!(&buf[16..20], &5u32.to_ne_bytes());
        assert_eq!(&buf[20..24], &(libc::DT_REG as u32).to_ne_bytes());
        assert_eq!(&buf[24..29], b"hello");
        assert!(buf[29..].iter().all(|&b| b == 0));
    }

    #[test]
    fn test_append_preserves_existing() {
        let mut buf = vec![0xAA; 3];
        append_dirent(&mut buf, &DirEntry::new(2, InodeId(3), "dir", FileType::Directory));
        assert_eq!(buf.len(), 3 + 32);
        assert_eq!(&buf[..3], &[0xAA; 3]);
    }

    #[test]
    fn test_push_within_budget() {
        let a = DirEntry::new(1, InodeId(2), "hello", FileType::File);
        let b = DirEntry::new(2, InodeId(3), "dir", FileType::Directory);

        let mut page = DirPage::new();
        assert!(page.push_within(&a, 40));
        assert!(!page.push_within(&b, 40));
        assert_eq!(page.len(), 1);
        assert_eq!(page.encoded_size(), 32);
        assert_eq!(page.next_offset(), Some(1));
    }

    #[test]
    fn test_push_exact_fit() {
        let a = DirEntry::new(1, InodeId(2), "hello", FileType::File);
        let mut page = DirPage::new();
        assert!(page.push_within(&a, 32));
        assert_eq!(page.encoded_size(), 32);
    }

    #[test]
    fn test_empty_page() {
        let page = DirPage::new();
        assert!(page.is_empty());
        assert!(!page.is_stalled());
        assert_eq!(page.next_offset(), None);
    }

    #[test]
    fn test_stalled_only_when_nothing_fit() {
        let mut page = DirPage::new();
        page.truncated = true;
        assert!(page.is_stalled());

        assert!(page.push_within(&DirEntry::new(1, InodeId(2), "hello", FileType::File), 32));
        assert!(!page.is_stalled());
    }
}
