//! Escaping of raw bytes into the body of a Rust byte-string literal.
//!
//! Printable ASCII is written verbatim except `"` and `\`; `\n`, `\r`,
//! `\t` and `\0` use their short escapes; every other byte becomes
//! `\xNN` with lowercase hex digits. The output is the text between the
//! quotes of `b"..."`.

use std::io::{self, Write};

const HEX: &[u8; 16] = b"0123456789abcdef";

/// Append the escaped form of `bytes` to `out`.
pub fn escape_into(bytes: &[u8], out: &mut Vec<u8>) {
    for &b in bytes {
        match b {
            b'"' => out.extend_from_slice(b"\\\""),
            b'\\' => out.extend_from_slice(b"\\\\"),
            b'\n' => out.extend_from_slice(b"\\n"),
            b'\r' => out.extend_from_slice(b"\\r"),
            b'\t' => out.extend_from_slice(b"\\t"),
            0 => out.extend_from_slice(b"\\0"),
            0x20..=0x7e => out.push(b),
            _ => out.extend_from_slice(&[
                b'\\',
                b'x',
                HEX[usize::from(b >> 4)],
                HEX[usize::from(b & 0x0f)],
            ]),
        }
    }
}

/// Escaped form of `bytes` as a string.
pub fn escape(bytes: &[u8]) -> String {
    let mut out = Vec::with_capacity(bytes.len());
    escape_into(bytes, &mut out);
    // Every byte pushed above is ASCII.
    String::from_utf8(out).unwrap_or_default()
}

/// Writer adapter that escapes everything written through it.
///
/// Lets a compressor stream straight into generated source without
/// buffering the compressed bytes.
#[derive(Debug)]
pub struct ByteStrWriter<W> {
    inner: W,
    buf: Vec<u8>,
}

impl<W: Write> ByteStrWriter<W> {
    pub fn new(inner: W) -> Self {
        Self {
            inner,
            buf: Vec::new(),
        }
    }

    pub fn into_inner(self) -> W {
        self.inner
    }
}

impl<W: Write> Write for ByteStrWriter<W> {
    fn write(&mut self, data: &[u8]) -> io::Result<usize> {
        if data.is_empty() {
            return Ok(0);
        }
        self.buf.clear();
        escape_into(data, &mut self.buf);
        self.inner.write_all(&self.buf)?;
        Ok(data.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}
