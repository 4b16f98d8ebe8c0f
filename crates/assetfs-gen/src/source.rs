//! Build-time readers the walker can pull a tree from.

use chrono::{DateTime, Utc};
use assetfs::{AssetFs, Handle, Metadata};
use log::warn;
use std::fs::{self, File};
use std::io::{self, Read};
use std::path::{Component, Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

/// A read-only tree addressed by absolute slash paths (`/`, `/a/b.txt`).
pub trait Source {
    /// Metadata of a single entry.
    fn stat(&self, path: &str) -> io::Result<Metadata>;

    /// Names of the direct children of a directory, in no particular order.
    fn read_dir(&self, path: &str) -> io::Result<Vec<String>>;

    /// Open a file for reading its uncompressed bytes.
    fn open(&self, path: &str) -> io::Result<Box<dyn Read + '_>>;
}

/// A directory on the local disk.
#[derive(Debug, Clone)]
pub struct OsFs {
    root: PathBuf,
}

impl OsFs {
    /// Serve the tree under `root`, which becomes `/`.
    pub fn new<P: Into<PathBuf>>(root: P) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn resolve(&self, path: &str) -> io::Result<PathBuf> {
        let rel = Path::new(path.trim_start_matches('/'));
        for component in rel.components() {
            if !matches!(component, Component::Normal(_) | Component::CurDir) {
                return Err(io::Error::new(
                    io::ErrorKind::InvalidInput,
                    format!("invalid source path: {path}"),
                ));
            }
        }
        Ok(self.root.join(rel))
    }
}

impl Source for OsFs {
    fn stat(&self, path: &str) -> io::Result<Metadata> {
        let meta = fs::metadata(self.resolve(path)?)?;
        let modified = to_utc(meta.modified()?).ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::InvalidData,
                format!("modification time of {path} is out of range"),
            )
        })?;

        let name = base_name(path);
        if meta.is_dir() {
            Ok(Metadata::directory(name, modified))
        } else {
            Ok(Metadata::file(name, meta.len(), modified))
        }
    }

    fn read_dir(&self, path: &str) -> io::Result<Vec<String>> {
        let mut names = Vec::new();
        for entry in fs::read_dir(self.resolve(path)?)? {
            let entry = entry?;
            match entry.file_name().into_string() {
                Ok(name) => names.push(name),
                Err(raw) => warn!("skipping non UTF-8 name {:?} in {}", raw, path),
            }
        }
        Ok(names)
    }

    fn open(&self, path: &str) -> io::Result<Box<dyn Read + '_>> {
        Ok(Box::new(File::open(self.resolve(path)?)?))
    }
}

/// An already embedded tree, so generated filesystems can be re-embedded
/// or compared against their source.
impl Source for AssetFs {
    fn stat(&self, path: &str) -> io::Result<Metadata> {
        Ok(AssetFs::stat(self, path)?)
    }

    fn read_dir(&self, path: &str) -> io::Result<Vec<String>> {
        let mut handle = AssetFs::open(self, path)?;
        let entries = handle.read_dir(0)?;
        Ok(entries
            .into_iter()
            .map(|meta| meta.name().to_string())
            .collect())
    }

    fn open(&self, path: &str) -> io::Result<Box<dyn Read + '_>> {
        match AssetFs::open(self, path)? {
            Handle::File(file) => Ok(Box::new(file)),
            Handle::Dir(_) => Err(assetfs::Error::IsADirectory {
                name: base_name(path).to_string(),
            }
            .into()),
        }
    }
}

/// Last path element, with the root named `/`.
pub(crate) fn base_name(path: &str) -> &str {
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() {
        return "/";
    }
    trimmed.rsplit('/').next().unwrap_or(trimmed)
}

/// Join a slash path and a child name.
pub(crate) fn join(parent: &str, name: &str) -> String {
    if parent.ends_with('/') {
        format!("{parent}{name}")
    } else {
        format!("{parent}/{name}")
    }
}

/// Convert a filesystem timestamp, including ones before the epoch.
pub(crate) fn to_utc(time: SystemTime) -> Option<DateTime<Utc>> {
    match time.duration_since(UNIX_EPOCH) {
        Ok(since) => {
            DateTime::from_timestamp(i64::try_from(since.as_secs()).ok()?, since.subsec_nanos())
        }
        Err(err) => {
            let before = err.duration();
            let secs = i64::try_from(before.as_secs()).ok()?;
            match before.subsec_nanos() {
                0 => DateTime::from_timestamp(-secs, 0),
                nanos => DateTime::from_timestamp(-secs - 1, 1_000_000_000 - nanos),
            }
        }
    }
}
