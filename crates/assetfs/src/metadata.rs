use chrono::{DateTime, Utc};
use std::fmt;

/// Unix-style `st_mode` bits of an embedded entry.
///
/// Embedded entries are always read-only: files carry `0444`, directories
/// `0755` with the directory type bit set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FileMode(u32);

impl FileMode {
    /// File type bit for directories (`S_IFDIR`).
    pub const DIR: u32 = 0o040_000;
    /// File type bit for regular files (`S_IFREG`).
    pub const REGULAR: u32 = 0o100_000;

    const TYPE_MASK: u32 = 0o170_000;

    /// Mode of every embedded file.
    pub const FILE_READ_ONLY: FileMode = FileMode(Self::REGULAR | 0o444);
    /// Mode of every embedded directory.
    pub const DIR_READ_ONLY: FileMode = FileMode(Self::DIR | 0o755);

    /// Wrap raw mode bits.
    pub const fn from_bits(bits: u32) -> Self {
        Self(bits)
    }

    /// Raw mode bits, type included.
    pub const fn bits(self) -> u32 {
        self.0
    }

    /// Permission bits only.
    pub const fn permissions(self) -> u32 {
        self.0 & 0o777
    }

    /// True for directory modes.
    pub const fn is_dir(self) -> bool {
        self.0 & Self::TYPE_MASK == Self::DIR
    }

    /// True for regular file modes.
    pub const fn is_file(self) -> bool {
        self.0 & Self::TYPE_MASK == Self::REGULAR
    }
}

impl fmt::Display for FileMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = if self.is_dir() { 'd' } else { '-' };
        let mut out = String::with_capacity(10);
        out.push(kind);
        for shift in [6u32, 3, 0] {
            let bits = (self.0 >> shift) & 0o7;
            out.push(if bits & 0o4 != 0 { 'r' } else { '-' });
            out.push(if bits & 0o2 != 0 { 'w' } else { '-' });
            out.push(if bits & 0o1 != 0 { 'x' } else { '-' });
        }
        f.write_str(&out)
    }
}

/// Metadata describing a file or directory.
///
/// Returned by [`Handle::stat`](crate::Handle::stat) and by directory
/// listings; also produced by build-time sources so both sides share one
/// description of an entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Metadata {
    name: String,
    len: u64,
    mode: FileMode,
    modified: DateTime<Utc>,
}

impl Metadata {
    /// Metadata for a read-only regular file of `len` uncompressed bytes.
    pub fn file(name: impl Into<String>, len: u64, modified: DateTime<Utc>) -> Self {
        Self {
            name: name.into(),
            len,
            mode: FileMode::FILE_READ_ONLY,
            modified,
        }
    }

    /// Metadata for a directory. Directories always report a length of 0.
    pub fn directory(name: impl Into<String>, modified: DateTime<Utc>) -> Self {
        Self {
            name: name.into(),
            len: 0,
            mode: FileMode::DIR_READ_ONLY,
            modified,
        }
    }

    /// Base name of the entry (`/` for the root).
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Uncompressed size in bytes, 0 for directories.
    pub fn len(&self) -> u64 {
        self.len
    }

    /// True when the entry holds no bytes.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Read-only mode bits.
    pub fn mode(&self) -> FileMode {
        self.mode
    }

    /// Modification time captured at build time.
    pub fn modified(&self) -> DateTime<Utc> {
        self.modified
    }

    /// True if the entry is a directory.
    pub fn is_dir(&self) -> bool {
        self.mode.is_dir()
    }
}
