//! Filesystem helpers shared across `kitty-stubgen` modules.

use camino::Utf8Path;
use cap_std::ambient_authority;
use cap_std::fs_utf8::{Dir, OpenOptions};
use std::io::Write;

use crate::error::StubgenError;

/// Opens a directory if it exists, returning `None` when the path is missing.
pub fn open_optional_dir(path: &Utf8Path) -> Result<Option<Dir>, StubgenError> {
    match Dir::open_ambient_dir(path, ambient_authority()) {
        Ok(dir) => Ok(Some(dir)),
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(err) => Err(StubgenError::Io {
            path: path.to_path_buf(),
            source: err,
        }),
    }
}

/// Opens a directory, creating it and any missing parents first.
pub fn ensure_dir(path: &Utf8Path) -> Result<Dir, StubgenError> {
    if let Some(dir) = open_optional_dir(path)? {
        return Ok(dir);
    }
    Dir::create_ambient_dir_all(path, ambient_authority()).map_err(|io_err| StubgenError::Io {
        path: path.to_path_buf(),
        source: io_err,
    })?;
    Dir::open_ambient_dir(path, ambient_authority()).map_err(|io_err| StubgenError::Io {
        path: path.to_path_buf(),
        source: io_err,
    })
}

/// Reads `name` from `dir` as UTF-8, returning `None` when the file is
/// missing. `base` is only used to build error paths.
pub fn read_optional_file(
    dir: &Dir,
    base: &Utf8Path,
    name: &Utf8Path,
) -> Result<Option<String>, StubgenError> {
    match dir.read_to_string(name) {
        Ok(contents) => Ok(Some(contents)),
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(err) => Err(StubgenError::Io {
            path: base.join(name),
            source: err,
        }),
    }
}

/// Replaces the contents of `name` in `dir`.
pub fn write_file(
    dir: &Dir,
    base: &Utf8Path,
    name: &Utf8Path,
    contents: &str,
) -> Result<(), StubgenError> {
    let path = base.join(name);
    let mut file = dir
        .open_with(
            name,
            OpenOptions::new().write(true).create(true).truncate(true),
        )
        .map_err(|io_err| StubgenError::Io {
            path: path.clone(),
            source: io_err,
        })?;
    file.write_all(contents.as_bytes())
        .map_err(|io_err| StubgenError::Io {
            path,
            source: io_err,
        })
}
