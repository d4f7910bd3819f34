//! Stub file writer using `cap_std` for filesystem operations.
//!
//! The stub for `path/to/module.py` lives at `path/to/module.pyi`. Files are
//! only rewritten when their content changes, so re-running the generator
//! against unchanged specs leaves the filesystem untouched.

use camino::{Utf8Path, Utf8PathBuf};
use sha2::{Digest, Sha256};
use tracing::info;

use crate::error::StubgenError;
use crate::fs_helpers::{ensure_dir, open_optional_dir, read_optional_file, write_file};

/// Preamble written above the generated document.
pub const DEFAULT_PREAMBLE: &str = "# Update this file by running: ./test.py mypy\n\n";

/// Whether a save touched the filesystem.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteStatus {
    /// The destination was created or replaced.
    Written,
    /// The destination already held identical content.
    Unchanged,
}

/// Result of saving a stub.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriteOutcome {
    /// Destination path.
    pub path: Utf8PathBuf,
    /// What happened at the destination.
    pub status: WriteStatus,
    /// SHA-256 of the content that belongs at the destination.
    pub digest: String,
}

/// Persists rendered stub text.
pub trait StubWriter {
    /// Saves `text` as the stub belonging to `origin`.
    ///
    /// # Errors
    ///
    /// Returns an error when the destination cannot be read or written.
    fn save(&self, text: &str, origin: &Utf8Path) -> Result<WriteOutcome, StubgenError>;
}

/// How [`FileStubWriter`] treats stale destinations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WriteMode {
    /// Replace stale files.
    #[default]
    Write,
    /// Report stale files as errors without touching them.
    Check,
}

/// Writes stubs next to their origin module.
#[derive(Debug, Clone)]
pub struct FileStubWriter {
    preamble: String,
    mode: WriteMode,
}

impl Default for FileStubWriter {
    fn default() -> Self {
        Self::new(DEFAULT_PREAMBLE, WriteMode::Write)
    }
}

impl FileStubWriter {
    /// Creates a writer prefixing every stub with `preamble`.
    pub fn new(preamble: impl Into<String>, mode: WriteMode) -> Self {
        Self {
            preamble: preamble.into(),
            mode,
        }
    }
}

impl StubWriter for FileStubWriter {
    fn save(&self, text: &str, origin: &Utf8Path) -> Result<WriteOutcome, StubgenError> {
        let path = stub_destination(origin);
        let contents = format!("{}{text}", self.preamble);
        let status = sync_file(&path, &contents, self.mode)?;
        let outcome = WriteOutcome {
            path,
            status,
            digest: sha256_hex(&contents),
        };
        info!(path = %outcome.path, status = ?outcome.status, digest = %outcome.digest, "saved type stub");
        Ok(outcome)
    }
}

/// Derives the stub path for a module path.
///
/// ```
/// use camino::Utf8Path;
/// use kitty_stubgen::writer::stub_destination;
///
/// assert_eq!(stub_destination(Utf8Path::new("kitty/cli_stub.py")), "kitty/cli_stub.pyi");
/// assert_eq!(stub_destination(Utf8Path::new("kitty/cli_stub")), "kitty/cli_stub.pyi");
/// ```
#[must_use]
pub fn stub_destination(origin: &Utf8Path) -> Utf8PathBuf {
    if origin.extension() == Some("py") {
        origin.with_extension("pyi")
    } else {
        Utf8PathBuf::from(format!("{origin}.pyi"))
    }
}

/// Brings `path` in line with `contents`, writing only when they differ.
///
/// A missing file counts as empty. In [`WriteMode::Check`] a difference is
/// reported as [`StubgenError::StaleStub`] and nothing is written.
///
/// # Errors
///
/// Returns I/O errors from reading or writing, or the stale-stub error.
pub fn sync_file(
    path: &Utf8Path,
    contents: &str,
    mode: WriteMode,
) -> Result<WriteStatus, StubgenError> {
    let parent = match path.parent() {
        Some(parent) if !parent.as_str().is_empty() => parent,
        _ => Utf8Path::new("."),
    };
    let file_name = path
        .file_name()
        .map(Utf8Path::new)
        .ok_or_else(|| StubgenError::Message(format!("stub path {path} has no file name")))?;

    let existing = match open_optional_dir(parent)? {
        Some(dir) => read_optional_file(&dir, parent, file_name)?,
        None => None,
    };
    if existing.unwrap_or_default() == contents {
        return Ok(WriteStatus::Unchanged);
    }
    if mode == WriteMode::Check {
        return Err(StubgenError::StaleStub {
            path: path.to_path_buf(),
            expected: sha256_hex(contents),
        });
    }

    let dir = ensure_dir(parent)?;
    write_file(&dir, parent, file_name, contents)?;
    Ok(WriteStatus::Written)
}

fn sha256_hex(contents: &str) -> String {
    format!("{:x}", Sha256::digest(contents.as_bytes()))
}
