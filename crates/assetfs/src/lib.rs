//! # assetfs
//!
//! Runtime for asset trees embedded by `assetfs-gen`.
//!
//! Generated code builds an [`AssetFs`] holding every directory and every
//! gzip-compressed file of the source tree. Opening a file returns a
//! handle that decompresses lazily as it is read; opening a directory
//! returns a handle that lists its children sorted by name.
//!
//! This crate provides:
//! - [`AssetFs`], the flat path table and its two-pass construction API
//! - [`Handle`], with [`Read`](std::io::Read), `stat` and `read_dir`
//! - [`Metadata`] and [`FileMode`] for read-only entries
//! - The RFC 3339 time codec used in generated source
//!
//! ## Example
//!
//! ```ignore
//! use std::io::Read;
//!
//! // `assets()` is emitted by assetfs-gen.
//! let fs = my_crate::embedded::assets();
//!
//! let mut file = fs.open("/index.html")?;
//! let mut html = String::new();
//! file.read_to_string(&mut html)?;
//!
//! for entry in fs.open("/")?.read_dir(0)? {
//!     println!("{} {:>8} {}", entry.mode(), entry.len(), entry.name());
//! }
//! ```
//!
//! ## Usage contract
//!
//! Seeking a file handle and listing a directory with a nonzero count are
//! caller bugs and panic. Looking up a missing path is an ordinary
//! [`Error::NotFound`].

mod error;
mod handle;
mod metadata;
mod record;
mod time;
mod vfs;

pub use error::{Error, Result};
pub use handle::{DirHandle, FileHandle, Handle};
pub use metadata::{FileMode, Metadata};
pub use record::{DirRecord, FileRecord, Record};
pub use time::{format_time, must_parse_time, parse_time};
pub use vfs::{AssetFs, FileSystem, OpenFile};

// Re-export chrono so generated code and callers agree on the time type.
pub use chrono;
