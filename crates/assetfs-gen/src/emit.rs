use crate::asset::{Asset, DirAsset, FileAsset, Toc};
use crate::escape::ByteStrWriter;
use crate::source::Source;
use crate::{Config, Error, Result};
use assetfs::{format_time, AssetFs, DirRecord, FileRecord};
use flate2::write::GzEncoder;
use flate2::Compression;
use log::{debug, trace, warn};
use std::collections::HashMap;
use std::io::{self, Read, Write};

const CHUNK_SIZE: usize = 32 * 1024;

/// Writes a [`Toc`] out as Rust source.
///
/// The generated module contains one function that rebuilds the tree as an
/// [`AssetFs`]: first every record is inserted, then every directory is
/// linked to its children by path.
#[derive(Debug)]
pub struct Emitter<'a, S: ?Sized> {
    config: &'a Config,
    source: &'a S,
}

impl<'a, S: Source + ?Sized> Emitter<'a, S> {
    pub fn new(config: &'a Config, source: &'a S) -> Self {
        Self { config, source }
    }

    /// Write the complete generated file.
    pub fn emit<W: Write>(&self, toc: &Toc, w: &mut W) -> Result<()> {
        self.write_header(toc, w)?;
        self.write_records(toc, w)?;
        self.write_links(toc, w)?;
        self.write_footer(toc, w)?;
        Ok(())
    }

    fn write_header<W: Write>(&self, toc: &Toc, w: &mut W) -> Result<()> {
        writeln!(w, "// Code generated by assetfs-gen; DO NOT EDIT.")?;
        writeln!(w)?;
        if let Some(cfg) = &self.config.cfg {
            writeln!(w, "#[cfg({})]", cfg.trim())?;
        }
        writeln!(w, "pub mod {} {{", self.config.module_name)?;

        let files = toc.file_count();
        let mut imports = vec!["AssetFs"];
        if !toc.is_empty() {
            imports.insert(0, "must_parse_time");
        }
        if toc.len() > files {
            imports.push("DirRecord");
        }
        if files > 0 {
            imports.push("FileRecord");
        }
        if imports.len() == 1 {
            writeln!(w, "    use assetfs::AssetFs;")?;
        } else {
            writeln!(w, "    use assetfs::{{{}}};", imports.join(", "))?;
        }
        writeln!(w)?;

        for line in self.config.function_doc_lines() {
            if line.is_empty() {
                writeln!(w, "    ///")?;
            } else {
                writeln!(w, "    /// {line}")?;
            }
        }
        writeln!(w, "    pub fn {}() -> AssetFs {{", self.config.function_name)?;
        if toc.is_empty() {
            writeln!(w, "        AssetFs::new()")?;
        } else {
            writeln!(w, "        let mut fs = AssetFs::with_capacity({});", toc.len())?;
        }
        Ok(())
    }

    /// First pass: every directory and file with its scalar fields and, for
    /// files, the compressed content.
    fn write_records<W: Write>(&self, toc: &Toc, w: &mut W) -> Result<()> {
        for entry in toc {
            match &entry.asset {
                Asset::Dir(dir) => {
                    writeln!(
                        w,
                        "        fs.insert({}, DirRecord::new({}, must_parse_time({})));",
                        str_literal(&entry.path),
                        str_literal(&dir.name),
                        str_literal(&format_time(dir.modified)),
                    )?;
                }
                Asset::File(file) => self.write_file(&entry.path, file, w)?,
            }
        }
        Ok(())
    }

    fn write_file<W: Write>(&self, path: &str, file: &FileAsset, w: &mut W) -> Result<()> {
        trace!("compressing {}", path);
        let mut reader = self.source.open(path).map_err(|source| Error::Open {
            path: path.to_string(),
            source,
        })?;

        writeln!(w, "        fs.insert(")?;
        writeln!(w, "            {},", str_literal(path))?;
        writeln!(w, "            FileRecord::new(")?;
        writeln!(w, "                {},", str_literal(&file.name))?;
        write!(w, "                b\"")?;
        let (_, size) = compress(path, &mut reader, ByteStrWriter::new(&mut *w))?;
        writeln!(w, "\",")?;
        writeln!(w, "                {size},")?;
        writeln!(
            w,
            "                must_parse_time({}),",
            str_literal(&format_time(file.modified))
        )?;
        writeln!(w, "            ),")?;
        writeln!(w, "        );")?;

        check_size(path, file, size);
        Ok(())
    }

    /// Second pass: link each directory to its children by path.
    fn write_links<W: Write>(&self, toc: &Toc, w: &mut W) -> Result<()> {
        if toc.is_empty() {
            return Ok(());
        }
        writeln!(w)?;

        let index = toc.index();
        for entry in toc {
            let Asset::Dir(dir) = &entry.asset else {
                continue;
            };
            let children = linked_entries(&entry.path, dir, &index);
            let dir_path = str_literal(&entry.path);
            if children.is_empty() {
                writeln!(w, "        fs.link::<&str>({dir_path}, &[]);")?;
                continue;
            }

            let list: Vec<String> = children.iter().map(|child| str_literal(child)).collect();
            let one_line = format!("        fs.link({dir_path}, &[{}]);", list.join(", "));
            if one_line.len() <= 100 {
                writeln!(w, "{one_line}")?;
            } else {
                writeln!(w, "        fs.link(")?;
                writeln!(w, "            {dir_path},")?;
                writeln!(w, "            &[")?;
                for child in &list {
                    writeln!(w, "                {child},")?;
                }
                writeln!(w, "            ],")?;
                writeln!(w, "        );")?;
            }
        }
        Ok(())
    }

    fn write_footer<W: Write>(&self, toc: &Toc, w: &mut W) -> Result<()> {
        if !toc.is_empty() {
            writeln!(w, "        fs")?;
        }
        writeln!(w, "    }}")?;
        writeln!(w, "}}")?;
        Ok(())
    }
}

/// Build the filesystem described by `toc` directly in memory, running the
/// same two passes and the same compressor as the generated code would.
pub fn assemble<S: Source + ?Sized>(source: &S, toc: &Toc) -> Result<AssetFs> {
    let mut fs = AssetFs::with_capacity(toc.len());

    for entry in toc {
        match &entry.asset {
            Asset::Dir(dir) => {
                fs.insert(entry.path.clone(), DirRecord::new(dir.name.clone(), dir.modified));
            }
            Asset::File(file) => {
                let mut reader = source.open(&entry.path).map_err(|source| Error::Open {
                    path: entry.path.clone(),
                    source,
                })?;
                let (content, size) = compress(&entry.path, &mut reader, Vec::new())?;
                check_size(&entry.path, file, size);
                fs.insert(
                    entry.path.clone(),
                    FileRecord::from_vec(file.name.clone(), content, size, file.modified),
                );
            }
        }
    }

    let index = toc.index();
    for entry in toc {
        if let Asset::Dir(dir) = &entry.asset {
            fs.link(&entry.path, &linked_entries(&entry.path, dir, &index));
        }
    }

    debug!("assembled {} records in memory", fs.len());
    Ok(fs)
}

/// Gzip everything `reader` yields into `writer`. Returns the writer and
/// the number of uncompressed bytes.
fn compress<R, W>(path: &str, reader: &mut R, writer: W) -> Result<(W, u64)>
where
    R: Read + ?Sized,
    W: Write,
{
    let mut encoder = GzEncoder::new(writer, Compression::best());
    let mut buf = vec![0u8; CHUNK_SIZE];
    let mut total = 0u64;
    loop {
        let n = match reader.read(&mut buf) {
            Ok(0) => break,
            Ok(n) => n,
            Err(err) if err.kind() == io::ErrorKind::Interrupted => continue,
            Err(source) => {
                return Err(Error::Open {
                    path: path.to_string(),
                    source,
                })
            }
        };
        encoder.write_all(&buf[..n])?;
        total += n as u64;
    }
    Ok((encoder.finish()?, total))
}

fn check_size(path: &str, file: &FileAsset, size: u64) {
    if size != file.size {
        warn!(
            "{} changed during generation: walked {} bytes, embedded {}",
            path, file.size, size
        );
    }
}

/// Children of `dir` that made it into the table. Entries the walker
/// skipped are dropped so no link dangles.
fn linked_entries<'t>(path: &str, dir: &'t DirAsset, index: &HashMap<&str, usize>) -> Vec<&'t str> {
    dir.entries
        .iter()
        .map(String::as_str)
        .filter(|child| {
            let present = index.contains_key(child);
            if !present {
                warn!("dropping {} from {}: not in table of contents", child, path);
            }
            present
        })
        .collect()
}

/// A Rust string literal for `text`.
fn str_literal(text: &str) -> String {
    format!("{text:?}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::escape::tests::unescape;
    use crate::walk::walk;
    use chrono::{TimeZone, Utc};
    use flate2::read::GzDecoder;

    /// Two-file tree with a fixed modification time.
    fn scenario_toc() -> Toc {
        let modified = Utc.timestamp_opt(1_700_000_000, 0).unwrap();
        let mut toc = Toc::new();
        toc.push(
            "/",
            Asset::Dir(DirAsset {
                name: "/".to_string(),
                entries: vec!["/a.txt".to_string(), "/sub".to_string()],
                modified,
            }),
        );
        toc.push(
            "/a.txt",
            Asset::File(FileAsset {
                name: "a.txt".to_string(),
                size: 5,
                modified,
            }),
        );
        toc.push(
            "/sub",
            Asset::Dir(DirAsset {
                name: "sub".to_string(),
                entries: vec![],
                modified,
            }),
        );
        toc
    }

    fn scenario_source() -> AssetFs {
        let mut fs = AssetFs::new();
        let modified = Utc.timestamp_opt(1_700_000_000, 0).unwrap();
        let (content, size) = compress("/a.txt", &mut &b"hello"[..], Vec::new()).unwrap();
        fs.insert("/", DirRecord::new("/", modified));
        fs.insert("/a.txt", FileRecord::from_vec("a.txt", content, size, modified));
        fs.insert("/sub", DirRecord::new("sub", modified));
        fs.link("/", &["/a.txt", "/sub"]);
        fs.link::<&str>("/sub", &[]);
        fs
    }

    fn emit_to_string(config: &Config, source: &AssetFs, toc: &Toc) -> String {
        let mut out = Vec::new();
        Emitter::new(config, source).emit(toc, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    fn embedded_literal(generated: &str) -> Vec<u8> {
        let line = generated
            .lines()
            .find(|line| line.trim_start().starts_with("b\""))
            .unwrap()
            .trim();
        let body = &line[2..line.len() - 2];
        unescape(body)
    }

    #[test]
    fn test_emitted_layout() {
        let config = Config::new("out.rs");
        let generated = emit_to_string(&config, &scenario_source(), &scenario_toc());

        assert!(generated.starts_with("// Code generated by assetfs-gen; DO NOT EDIT.\n\n"));
        assert!(generated.contains("pub mod assets {\n"));
        assert!(generated.contains("use assetfs::{must_parse_time, AssetFs, DirRecord, FileRecord};"));
        assert!(generated.contains("pub fn assets() -> AssetFs {"));
        assert!(generated.contains(
            r#"fs.insert("/", DirRecord::new("/", must_parse_time("2023-11-14T22:13:20Z")));"#
        ));
        assert!(generated.contains(r#"fs.link("/", &["/a.txt", "/sub"]);"#));
        assert!(generated.contains(r#"fs.link::<&str>("/sub", &[]);"#));
        assert!(generated.contains("                5,\n"));
        assert!(!generated.contains("#[cfg("));
    }

    #[test]
    fn test_links_follow_records() {
        let config = Config::new("out.rs");
        let generated = emit_to_string(&config, &scenario_source(), &scenario_toc());
        let last_insert = generated.rfind("fs.insert(").unwrap();
        let first_link = generated.find("fs.link").unwrap();
        assert!(first_link > last_insert);
    }

    #[test]
    fn test_cfg_and_names() {
        let config = Config::new("out.rs")
            .with_cfg(r#"feature = "embed""#)
            .with_module_name("web")
            .with_function_name("static_files")
            .with_function_doc("Line one.\n\nLine two.");
        let generated = emit_to_string(&config, &scenario_source(), &scenario_toc());

        assert!(generated.contains("#[cfg(feature = \"embed\")]\npub mod web {"));
        assert!(generated.contains("    /// Line one.\n    ///\n    /// Line two.\n"));
        assert!(generated.contains("pub fn static_files() -> AssetFs {"));
    }

    #[test]
    fn test_embedded_literal_decodes_to_source_bytes() {
        let config = Config::new("out.rs");
        let generated = emit_to_string(&config, &scenario_source(), &scenario_toc());

        let compressed = embedded_literal(&generated);
        let mut decoded = Vec::new();
        GzDecoder::new(compressed.as_slice())
            .read_to_end(&mut decoded)
            .unwrap();
        assert_eq!(decoded, b"hello");
    }

    #[test]
    fn test_emission_is_deterministic() {
        let config = Config::new("out.rs");
        let source = scenario_source();
        let toc = walk(&source).unwrap();
        assert_eq!(
            emit_to_string(&config, &source, &toc),
            emit_to_string(&config, &source, &toc)
        );
    }

    #[test]
    fn test_missing_source_file_fails() {
        let config = Config::new("out.rs");
        let mut toc = scenario_toc();
        toc.push(
            "/ghost.txt",
            Asset::File(FileAsset {
                name: "ghost.txt".to_string(),
                size: 1,
                modified: Utc.timestamp_opt(0, 0).unwrap(),
            }),
        );
        let mut out = Vec::new();
        let err = Emitter::new(&config, &scenario_source())
            .emit(&toc, &mut out)
            .unwrap_err();
        assert!(matches!(err, Error::Open { ref path, .. } if path == "/ghost.txt"));
    }

    #[test]
    fn test_skipped_children_are_not_linked() {
        let mut toc = Toc::new();
        for entry in &scenario_toc() {
            let asset = match &entry.asset {
                Asset::Dir(dir) if entry.path == "/" => Asset::Dir(DirAsset {
                    entries: vec![
                        "/a.txt".to_string(),
                        "/unreadable".to_string(),
                        "/sub".to_string(),
                    ],
                    ..dir.clone()
                }),
                other => other.clone(),
            };
            toc.push(entry.path.clone(), asset);
        }

        let fs = assemble(&scenario_source(), &toc).unwrap();
        let names: Vec<String> = fs
            .open("/")
            .unwrap()
            .read_dir(0)
            .unwrap()
            .into_iter()
            .map(|meta| meta.name().to_string())
            .collect();
        assert_eq!(names, vec!["a.txt", "sub"]);
    }

    #[test]
    fn test_empty_toc_emits_empty_fs() {
        let config = Config::new("out.rs");
        let generated = emit_to_string(&config, &scenario_source(), &Toc::new());
        assert!(generated.contains("    use assetfs::AssetFs;\n"));
        assert!(generated.contains("        AssetFs::new()\n"));
        assert!(!generated.contains("let mut fs"));
    }
}
