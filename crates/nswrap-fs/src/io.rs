//! Atomic I/O operations with file locking

use std::fs::{self, OpenOptions};
use std::io::Write;

use fs2::FileExt;

use crate::{Error, NormalizedPath, Result};

/// Write content atomically to a file with locking.
///
/// Uses write-to-temp-then-rename so a rewritten source file is either the
/// old content or the new content, never a truncated mix.
pub fn write_atomic(path: &NormalizedPath, content: &[u8]) -> Result<()> {
    let native_path = path.to_native();

    if let Some(parent) = native_path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
        }
    }

    // Temp file lives next to the target so the rename stays on one filesystem
    let temp_name = format!(
        ".{}.{}.tmp",
        native_path
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_default(),
        std::process::id()
    );
    let temp_path = native_path.with_file_name(&temp_name);

    let mut temp_file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(&temp_path)
        .map_err(|e| Error::io(&temp_path, e))?;

    temp_file.lock_exclusive().map_err(|_| Error::LockFailed {
        path: native_path.clone(),
    })?;

    let written = temp_file
        .write_all(content)
        .and_then(|_| temp_file.sync_all());
    if let Err(e) = written {
        let _ = fs::remove_file(&temp_path);
        return Err(Error::io(&temp_path, e));
    }

    temp_file.unlock().map_err(|_| Error::LockFailed {
        path: native_path.clone(),
    })?;

    if let Err(e) = fs::rename(&temp_path, &native_path) {
        let _ = fs::remove_file(&temp_path);
        return Err(Error::io(&native_path, e));
    }

    tracing::trace!(path = %path, bytes = content.len(), "wrote file atomically");
    Ok(())
}

/// Read a whole UTF-8 text file into memory.
pub fn read_text(path: &NormalizedPath) -> Result<String> {
    let native_path = path.to_native();
    fs::read_to_string(&native_path).map_err(|e| Error::io(&native_path, e))
}

/// Encoding a source file was decoded from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TextEncoding {
    #[default]
    Utf8,
    /// Any byte sequence that is not valid UTF-8, one char per byte.
    Latin1,
}

impl TextEncoding {
    /// Decode raw file bytes, falling back to Latin-1 so no byte is lost.
    pub fn decode(bytes: Vec<u8>) -> (String, Self) {
        match String::from_utf8(bytes) {
            Ok(text) => (text, Self::Utf8),
            Err(e) => {
                let text = e.into_bytes().into_iter().map(char::from).collect();
                (text, Self::Latin1)
            }
        }
    }

    /// Encode text back to bytes, failing on the first char outside this encoding.
    pub fn encode(self, text: &str) -> std::result::Result<Vec<u8>, char> {
        match self {
            Self::Utf8 => Ok(text.as_bytes().to_vec()),
            Self::Latin1 => text
                .chars()
                .map(|c| u8::try_from(c).map_err(|_| c))
                .collect(),
        }
    }
}

/// A source file's content together with the encoding to write it back in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceText {
    pub text: String,
    pub encoding: TextEncoding,
}

/// Read a C/C++ source file, whatever its 8-bit encoding.
pub fn read_source(path: &NormalizedPath) -> Result<SourceText> {
    let native_path = path.to_native();
    let bytes = fs::read(&native_path).map_err(|e| Error::io(&native_path, e))?;
    let (text, encoding) = TextEncoding::decode(bytes);
    if encoding != TextEncoding::Utf8 {
        tracing::debug!(path = %path, "not valid UTF-8, reading as Latin-1");
    }
    Ok(SourceText { text, encoding })
}

/// Write source text atomically in the encoding it was read with.
pub fn write_source(path: &NormalizedPath, text: &str, encoding: TextEncoding) -> Result<()> {
    let bytes = encoding.encode(text).map_err(|character| Error::Unencodable {
        path: path.to_native(),
        character,
    })?;
    write_atomic(path, &bytes)
}
