use chrono::{DateTime, Utc};
use std::collections::HashMap;

/// A directory found by the walker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirAsset {
    pub name: String,
    /// Absolute paths of the children, sorted by name.
    pub entries: Vec<String>,
    pub modified: DateTime<Utc>,
}

/// A file found by the walker. Its content is read only at emission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileAsset {
    pub name: String,
    pub size: u64,
    pub modified: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Asset {
    Dir(DirAsset),
    File(FileAsset),
}

impl Asset {
    pub fn name(&self) -> &str {
        match self {
            Asset::Dir(dir) => &dir.name,
            Asset::File(file) => &file.name,
        }
    }

    pub fn modified(&self) -> DateTime<Utc> {
        match self {
            Asset::Dir(dir) => dir.modified,
            Asset::File(file) => file.modified,
        }
    }
}

/// An asset and the absolute slash path it lives at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathAsset {
    pub path: String,
    pub asset: Asset,
}

/// Table of contents: every asset in the order the walker visited it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Toc {
    assets: Vec<PathAsset>,
}

impl Toc {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `asset` at `path`, after everything already recorded.
    pub fn push(&mut self, path: impl Into<String>, asset: Asset) {
        self.assets.push(PathAsset {
            path: path.into(),
            asset,
        });
    }

    pub fn len(&self) -> usize {
        self.assets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assets.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PathAsset> {
        self.assets.iter()
    }

    /// Asset stored at `path`. Linear; use [`Toc::index`] for repeated lookups.
    pub fn get(&self, path: &str) -> Option<&Asset> {
        self.assets
            .iter()
            .find(|entry| entry.path == path)
            .map(|entry| &entry.asset)
    }

    /// Map from path to position in the table.
    pub fn index(&self) -> HashMap<&str, usize> {
        self.assets
            .iter()
            .enumerate()
            .map(|(idx, entry)| (entry.path.as_str(), idx))
            .collect()
    }

    /// Number of files in the table.
    pub fn file_count(&self) -> usize {
        self.assets
            .iter()
            .filter(|entry| matches!(entry.asset, Asset::File(_)))
            .count()
    }
}

impl<'a> IntoIterator for &'a Toc {
    type Item = &'a PathAsset;
    type IntoIter = std::slice::Iter<'a, PathAsset>;

    fn into_iter(self) -> Self::IntoIter {
        self.assets.iter()
    }
}
