use crate::asset::{Asset, DirAsset, FileAsset, Toc};
use crate::source::{join, Source};
use crate::{Error, Result};
use assetfs::Metadata;
use log::{debug, trace, warn};

/// Walk `source` from `/` and record every directory and file.
///
/// Directories are recorded before their children, and children are
/// visited in lexical order. An entry that cannot be stat'ed is logged and
/// left out; a directory that cannot be listed aborts the walk.
pub fn walk<S: Source + ?Sized>(source: &S) -> Result<Toc> {
    let mut toc = Toc::new();
    match source.stat("/") {
        Ok(meta) => visit(source, "/", &meta, &mut toc)?,
        Err(err) => warn!("can't stat file /: {}", err),
    }
    debug!(
        "walk found {} entries ({} files)",
        toc.len(),
        toc.file_count()
    );
    Ok(toc)
}

fn visit<S: Source + ?Sized>(source: &S, path: &str, meta: &Metadata, toc: &mut Toc) -> Result<()> {
    trace!("visit {}", path);

    if !meta.is_dir() {
        toc.push(
            path,
            Asset::File(FileAsset {
                name: meta.name().to_string(),
                size: meta.len(),
                modified: meta.modified(),
            }),
        );
        return Ok(());
    }

    let mut names = source.read_dir(path).map_err(|source| Error::ReadDir {
        path: path.to_string(),
        source,
    })?;
    names.sort();
    let entries: Vec<String> = names.iter().map(|name| join(path, name)).collect();

    toc.push(
        path,
        Asset::Dir(DirAsset {
            name: meta.name().to_string(),
            entries: entries.clone(),
            modified: meta.modified(),
        }),
    );

    for child in &entries {
        match source.stat(child) {
            Ok(child_meta) => visit(source, child, &child_meta, toc)?,
            Err(err) => warn!("can't stat file {}: {}", child, err),
        }
    }
    Ok(())
}
