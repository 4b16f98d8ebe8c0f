use crate::vfs::OpenFile;
use crate::{AssetFs, DirRecord, Error, FileRecord, Metadata, Result};
use flate2::read::GzDecoder;
use std::fmt;
use std::io::{self, Read, Seek, SeekFrom};

/// An open entry of an [`AssetFs`].
#[derive(Debug)]
pub enum Handle<'a> {
    Dir(DirHandle<'a>),
    File(FileHandle<'a>),
}

impl Handle<'_> {
    /// Metadata of the open entry.
    pub fn stat(&self) -> Metadata {
        match self {
            Handle::Dir(dir) => dir.stat(),
            Handle::File(file) => file.stat(),
        }
    }

    /// List a directory's children, sorted by name.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotADirectory`] on a file handle.
    ///
    /// # Panics
    ///
    /// Panics if `count` is not 0; partial listings are not supported.
    pub fn read_dir(&mut self, count: usize) -> Result<Vec<Metadata>> {
        match self {
            Handle::Dir(dir) => Ok(dir.read_dir(count)),
            Handle::File(file) => Err(Error::NotADirectory {
                name: file.record.name().to_string(),
            }),
        }
    }

    /// True for directory handles.
    pub fn is_dir(&self) -> bool {
        matches!(self, Handle::Dir(_))
    }

    /// Release the handle. File handles drop their decompression stream.
    pub fn close(self) -> Result<()> {
        match self {
            Handle::Dir(_) => Ok(()),
            Handle::File(file) => file.close(),
        }
    }
}

impl Read for Handle<'_> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match self {
            Handle::Dir(dir) => dir.read(buf),
            Handle::File(file) => file.read(buf),
        }
    }
}

impl Seek for Handle<'_> {
    fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
        match self {
            Handle::Dir(dir) => dir.seek(pos),
            Handle::File(file) => file.seek(pos),
        }
    }
}

impl OpenFile for Handle<'_> {
    fn stat(&self) -> Metadata {
        Handle::stat(self)
    }

    fn read_dir(&mut self, count: usize) -> Result<Vec<Metadata>> {
        Handle::read_dir(self, count)
    }

    fn close(self) -> Result<()> {
        Handle::close(self)
    }
}

/// An open directory.
#[derive(Debug, Clone, Copy)]
pub struct DirHandle<'a> {
    fs: &'a AssetFs,
    record: &'a DirRecord,
}

impl<'a> DirHandle<'a> {
    pub(crate) fn new(fs: &'a AssetFs, record: &'a DirRecord) -> Self {
        Self { fs, record }
    }

    /// Metadata of the directory.
    pub fn stat(&self) -> Metadata {
        self.record.metadata()
    }

    /// Metadata of every child, in the order they were linked.
    ///
    /// # Panics
    ///
    /// Panics if `count` is not 0.
    pub fn read_dir(&self, count: usize) -> Vec<Metadata> {
        if count != 0 {
            panic!("read_dir count unsupported value: {count}");
        }
        self.record
            .entries
            .iter()
            .map(|&idx| self.fs.record_at(idx).metadata())
            .collect()
    }

    fn is_a_directory(&self) -> io::Error {
        Error::IsADirectory {
            name: self.record.name().to_string(),
        }
        .into()
    }
}

impl Read for DirHandle<'_> {
    fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
        Err(self.is_a_directory())
    }
}

impl Seek for DirHandle<'_> {
    fn seek(&mut self, _pos: SeekFrom) -> io::Result<u64> {
        Err(self.is_a_directory())
    }
}

/// An open file, decompressing its embedded gzip stream on demand.
pub struct FileHandle<'a> {
    record: &'a FileRecord,
    reader: GzDecoder<&'a [u8]>,
}

impl<'a> FileHandle<'a> {
    /// # Panics
    ///
    /// Panics if the stored bytes do not start with a valid gzip header.
    pub(crate) fn new(record: &'a FileRecord) -> Self {
        let reader = GzDecoder::new(record.content());
        if reader.header().is_none() {
            panic!(
                "unexpected error reading own gzip compressed bytes for {}",
                record.name()
            );
        }
        Self { record, reader }
    }

    /// Metadata of the file, with its uncompressed size.
    pub fn stat(&self) -> Metadata {
        self.record.metadata()
    }

    /// The stored record backing this handle.
    pub fn record(&self) -> &'a FileRecord {
        self.record
    }

    /// Release the decompression stream.
    pub fn close(self) -> Result<()> {
        drop(self.reader);
        Ok(())
    }
}

impl fmt::Debug for FileHandle<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FileHandle")
            .field("name", &self.record.name())
            .field("size", &self.record.size())
            .finish_non_exhaustive()
    }
}

impl Read for FileHandle<'_> {
    /// # Panics
    ///
    /// Panics if the embedded stream turns out to be corrupt.
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match self.reader.read(buf) {
            Ok(n) => Ok(n),
            Err(err) => panic!(
                "corrupt embedded gzip stream for {}: {err}",
                self.record.name()
            ),
        }
    }
}

impl Seek for FileHandle<'_> {
    /// Compressed streams carry no seek index.
    ///
    /// # Panics
    ///
    /// Always.
    fn seek(&mut self, _pos: SeekFrom) -> io::Result<u64> {
        unimplemented!("seek is not supported on embedded file {}", self.record.name())
    }
}
