use crate::Metadata;
use chrono::{DateTime, Utc};
use log::debug;
use std::borrow::Cow;

/// A directory stored in an [`AssetFs`](crate::AssetFs).
#[derive(Debug, Clone)]
pub struct DirRecord {
    name: Cow<'static, str>,
    pub(crate) entries: Vec<usize>,
    modified: DateTime<Utc>,
}

impl DirRecord {
    /// Create a directory record. Children are attached later with
    /// [`AssetFs::link`](crate::AssetFs::link).
    pub fn new(name: impl Into<Cow<'static, str>>, modified: DateTime<Utc>) -> Self {
        Self {
            name: name.into(),
            entries: Vec::new(),
            modified,
        }
    }

    /// Base name of the directory.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Modification time of the directory.
    pub fn modified(&self) -> DateTime<Utc> {
        self.modified
    }

    /// Number of linked children.
    pub fn entry_count(&self) -> usize {
        self.entries.len()
    }

    /// Metadata as reported by `stat` and listings.
    pub fn metadata(&self) -> Metadata {
        Metadata::directory(self.name.as_ref(), self.modified)
    }
}

/// A gzip-compressed file stored in an [`AssetFs`](crate::AssetFs).
#[derive(Debug, Clone)]
pub struct FileRecord {
    name: Cow<'static, str>,
    content: Cow<'static, [u8]>,
    size: u64,
    modified: DateTime<Utc>,
}

impl FileRecord {
    /// Create a record over compressed bytes baked into the binary.
    pub fn new(
        name: impl Into<Cow<'static, str>>,
        content: &'static [u8],
        size: u64,
        modified: DateTime<Utc>,
    ) -> Self {
        Self {
            name: name.into(),
            content: Cow::Borrowed(content),
            size,
            modified,
        }
    }

    /// Create a record that owns its compressed bytes.
    pub fn from_vec(
        name: impl Into<Cow<'static, str>>,
        content: Vec<u8>,
        size: u64,
        modified: DateTime<Utc>,
    ) -> Self {
        Self {
            name: name.into(),
            content: Cow::Owned(content),
            size,
            modified,
        }
    }

    /// Base name of the file.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Uncompressed length in bytes.
    pub fn size(&self) -> u64 {
        self.size
    }

    /// Modification time of the file.
    pub fn modified(&self) -> DateTime<Utc> {
        self.modified
    }

    /// Raw gzip stream, for callers that can serve compressed content as is.
    pub fn gzip_bytes(&self) -> &[u8] {
        debug!("using gzip bytes for {}", self.name);
        &self.content
    }

    pub(crate) fn content(&self) -> &[u8] {
        &self.content
    }

    /// Metadata as reported by `stat` and listings.
    pub fn metadata(&self) -> Metadata {
        Metadata::file(self.name.as_ref(), self.size, self.modified)
    }
}

/// Either kind of stored entry.
/// Either kind of stored entry.
#[derive(Debug, Clone)]
pub enum Record {
    Dir(DirRecord),
    File(FileRecord),
}

impl Record {
    /// Base name of the entry.
    pub fn name(&self) -> &str {
        match self {
            Record::Dir(dir) => dir.name(),
            Record::File(file) => file.name(),
        }
    }

    /// Metadata of the entry.
    pub fn metadata(&self) -> Metadata {
        match self {
            Record::Dir(dir) => dir.metadata(),
            Record::File(file) => file.metadata(),
        }
    }

    /// True for directory records.
    pub fn is_dir(&self) -> bool {
        matches!(self, Record::Dir(_))
    }
}

impl From<DirRecord> for Record {
    fn from(dir: DirRecord) -> Self {
        Record::Dir(dir)
    }
}

impl From<FileRecord> for Record {
    fn from(file: FileRecord) -> Self {
        Record::File(file)
    }
}
