//! # assetfs-gen
//!
//! Build-time half of assetfs: walks a directory tree and writes Rust
//! source that embeds it, gzip-compressed, as an [`assetfs::AssetFs`].
//!
//! This crate provides:
//! - [`Source`], the tree reader, with [`OsFs`] for directories on disk
//! - [`walk`], producing the ordered table of contents ([`Toc`])
//! - [`Emitter`], writing the table of contents as Rust source
//! - [`assemble`], building the same filesystem in memory
//! - [`generate`], the one-call entry point for `build.rs` scripts
//!
//! ## Features
//!
//! - `cli`: builds the `assetfs-gen` command line tool
//!
//! ## Example
//!
//! ```ignore
//! // build.rs
//! use assetfs_gen::{generate, Config, OsFs};
//! use std::path::PathBuf;
//!
//! fn main() {
//!     let out = PathBuf::from(std::env::var_os("OUT_DIR").unwrap()).join("assets.rs");
//!     let config = Config::new(out).with_module_name("web");
//!     generate(&config, &OsFs::new("static")).unwrap();
//!     println!("cargo:rerun-if-changed=static");
//! }
//!
//! // src/lib.rs
//! include!(concat!(env!("OUT_DIR"), "/assets.rs"));
//! ```

mod asset;
mod config;
mod emit;
mod error;
mod escape;
mod source;
mod walk;

pub use asset::{Asset, DirAsset, FileAsset, PathAsset, Toc};
pub use config::Config;
pub use emit::{assemble, Emitter};
pub use error::{Error, Result};
pub use escape::{escape, ByteStrWriter};
pub use source::{OsFs, Source};
pub use walk::walk;

use log::{debug, info};
use std::fs;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Walk `source` and write the generated module to `config.output`.
///
/// The file is written to a temporary sibling and moved into place only
/// once emission succeeded, so a failed run never leaves a truncated
/// output behind.
pub fn generate<S: Source + ?Sized>(config: &Config, source: &S) -> Result<PathBuf> {
    config.validate()?;
    let toc = walk(source)?;

    let output = config.output.as_path();
    let parent = match output.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    fs::create_dir_all(&parent)?;

    let mut temp = tempfile::Builder::new()
        .prefix(".tmp.assetfs-")
        .suffix(".rs")
        .tempfile_in(&parent)?;
    {
        let mut writer = BufWriter::new(temp.as_file_mut());
        Emitter::new(config, source).emit(&toc, &mut writer)?;
        writer.flush()?;
    }
    persist_tempfile(temp, output)?;

    info!(
        "generated {} ({} entries, {} files)",
        output.display(),
        toc.len(),
        toc.file_count()
    );
    Ok(output.to_path_buf())
}

/// Walk `source` and write the generated module to `writer`.
pub fn generate_to_writer<S, W>(config: &Config, source: &S, writer: &mut W) -> Result<()>
where
    S: Source + ?Sized,
    W: Write,
{
    config.validate()?;
    let toc = walk(source)?;
    Emitter::new(config, source).emit(&toc, writer)?;
    debug!("generated {} entries to writer", toc.len());
    Ok(())
}

fn persist_tempfile(temp: NamedTempFile, final_path: &Path) -> Result<()> {
    temp.persist(final_path)
        .map(|_| ())
        .map_err(|err| Error::Io(err.error))
}
