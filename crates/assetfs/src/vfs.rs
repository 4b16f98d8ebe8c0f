use crate::handle::{DirHandle, FileHandle, Handle};
use crate::{Error, Metadata, Record, Result};
use std::borrow::Cow;
use std::collections::HashMap;
use std::io::{Read, Seek};

/// A read-only filesystem that can open entries by absolute slash path.
pub trait FileSystem {
    /// Handle type returned by [`FileSystem::open`].
    type File<'a>: OpenFile
    where
        Self: 'a;

    /// Open the entry at `path`.
    fn open(&self, path: &str) -> Result<Self::File<'_>>;
}

/// An open file or directory.
pub trait OpenFile: Read + Seek {
    /// Metadata of the open entry.
    fn stat(&self) -> Metadata;

    /// List the children of a directory. Only `count == 0` is supported.
    fn read_dir(&mut self, count: usize) -> Result<Vec<Metadata>>;

    /// Release the handle and any decompression state it holds.
    fn close(self) -> Result<()>
    where
        Self: Sized;
}

/// In-memory filesystem of compressed assets.
///
/// Records live in a flat table indexed by path. Directories reference
/// their children by position in that table, so every record has exactly
/// one owner. The value is immutable once built and is `Send + Sync`;
/// every [`open`](AssetFs::open) gets its own independent stream.
///
/// Generated code builds one in two passes: [`insert`](AssetFs::insert)
/// every record, then [`link`](AssetFs::link) each directory to its
/// children.
#[derive(Debug, Clone, Default)]
pub struct AssetFs {
    paths: Vec<Cow<'static, str>>,
    records: Vec<Record>,
    index: HashMap<Cow<'static, str>, usize>,
}

impl AssetFs {
    /// Create an empty filesystem.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty filesystem with room for `capacity` records.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            paths: Vec::with_capacity(capacity),
            records: Vec::with_capacity(capacity),
            index: HashMap::with_capacity(capacity),
        }
    }

    /// Store a record at `path`, replacing any record already there.
    pub fn insert(&mut self, path: impl Into<Cow<'static, str>>, record: impl Into<Record>) {
        let path = path.into();
        let record = record.into();
        if let Some(&idx) = self.index.get(path.as_ref()) {
            self.records[idx] = record;
            return;
        }

        let idx = self.records.len();
        self.paths.push(path.clone());
        self.records.push(record);
        self.index.insert(path, idx);
    }

    /// Attach `entries` as the children of the directory at `dir`, in the
    /// given order.
    ///
    /// # Panics
    ///
    /// Panics if `dir` is missing or not a directory, or if any entry has
    /// not been inserted. Generated code inserts every record before
    /// linking, so this only fires on corrupt generated data.
    pub fn link<P: AsRef<str>>(&mut self, dir: &str, entries: &[P]) {
        let children: Vec<usize> = entries
            .iter()
            .map(|entry| {
                let entry = entry.as_ref();
                match self.index.get(entry) {
                    Some(&idx) => idx,
                    None => panic!("link target {entry} of directory {dir} does not exist"),
                }
            })
            .collect();

        let Some(&idx) = self.index.get(dir) else {
            panic!("cannot link entries to missing directory {dir}");
        };
        match &mut self.records[idx] {
            Record::Dir(record) => record.entries = children,
            Record::File(_) => panic!("cannot link entries to file {dir}"),
        }
    }

    /// Open the entry at `path`.
    ///
    /// Files get a fresh gzip stream that decompresses lazily as the handle
    /// is read; directories are returned as listable handles.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if nothing is stored at `path`.
    pub fn open(&self, path: &str) -> Result<Handle<'_>> {
        let idx = self.lookup(path)?;
        Ok(match &self.records[idx] {
            Record::Dir(dir) => Handle::Dir(DirHandle::new(self, dir)),
            Record::File(file) => Handle::File(FileHandle::new(file)),
        })
    }

    /// Metadata of the entry at `path` without opening a stream.
    pub fn stat(&self, path: &str) -> Result<Metadata> {
        let idx = self.lookup(path)?;
        Ok(self.records[idx].metadata())
    }

    /// Stored record at `path`, if any.
    pub fn get(&self, path: &str) -> Option<&Record> {
        self.index.get(path).map(|&idx| &self.records[idx])
    }

    /// True if a record is stored at `path`.
    pub fn contains(&self, path: &str) -> bool {
        self.index.contains_key(path)
    }

    /// Number of stored records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// True if no records are stored.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// All stored paths in insertion order.
    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.paths.iter().map(|path| path.as_ref())
    }

    pub(crate) fn record_at(&self, idx: usize) -> &Record {
        &self.records[idx]
    }

    fn lookup(&self, path: &str) -> Result<usize> {
        self.index.get(path).copied().ok_or_else(|| Error::NotFound {
            path: path.to_string(),
        })
    }
}

impl FileSystem for AssetFs {
    type File<'a> = Handle<'a>;

    fn open(&self, path: &str) -> Result<Handle<'_>> {
        AssetFs::open(self, path)
    }
}
