//! Shared helpers for `kitty-stubgen` integration tests.

use camino::Utf8PathBuf;
use std::error::Error;

/// Resolves the compiled `kitty-stubgen` binary path from test environment
/// variables.
///
/// # Errors
///
/// Returns an error when none of the supported cargo/nextest binary
/// environment variables are present.
pub(crate) fn kitty_stubgen_exe() -> Result<Utf8PathBuf, Box<dyn Error>> {
    let env_vars = [
        "CARGO_BIN_EXE_kitty-stubgen",
        "CARGO_BIN_EXE_kitty_stubgen",
        "NEXTEST_BIN_EXE_kitty-stubgen",
        "NEXTEST_BIN_EXE_kitty_stubgen",
    ];
    for var in env_vars {
        if let Ok(path) = std::env::var(var) {
            return Ok(Utf8PathBuf::from(path));
        }
    }
    Err("kitty-stubgen binary path not found in environment".into())
}

/// Spec tree shipped with the test fixtures.
pub(crate) fn fixture_specs_dir() -> Utf8PathBuf {
    Utf8PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/specs")
}
