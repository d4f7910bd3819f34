//! Layered configuration for `kitty-stubgen`.
//!
//! Sources are merged lowest to highest: built-in defaults, the TOML file,
//! `KITTY_STUBGEN_*` environment variables, then command-line flags.

use camino::{Utf8Path, Utf8PathBuf};
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::catalog::KittenSpec;
use crate::cli::Args;
use crate::error::StubgenError;
use crate::writer::DEFAULT_PREAMBLE;

/// Configuration file looked up in the working directory.
pub const CONFIG_FILE_NAME: &str = "kitty-stubgen.toml";

/// Prefix of configuration environment variables.
pub const ENV_PREFIX: &str = "KITTY_STUBGEN_";

/// Resolved generator configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StubgenConfig {
    /// Root of the option-spec tree.
    pub specs_dir: Utf8PathBuf,
    /// Module the stub belongs to.
    pub origin: Utf8PathBuf,
    /// Text written above the generated document.
    pub preamble: String,
    /// Optional path for the JSON dump of parsed specs.
    pub ir_out: Option<Utf8PathBuf>,
    /// Report stale output instead of writing it.
    pub check: bool,
    /// Kittens appended after the bundled ones.
    pub kittens: Vec<KittenSpec>,
}

impl Default for StubgenConfig {
    fn default() -> Self {
        Self {
            specs_dir: Utf8PathBuf::from("specs"),
            origin: Utf8PathBuf::from("kitty/cli_stub.py"),
            preamble: DEFAULT_PREAMBLE.to_owned(),
            ir_out: None,
            check: false,
            kittens: Vec::new(),
        }
    }
}

/// Values set explicitly on the command line.
#[derive(Debug, Default, Serialize)]
struct CliOverrides<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    specs_dir: Option<&'a Utf8Path>,
    #[serde(skip_serializing_if = "Option::is_none")]
    origin: Option<&'a Utf8Path>,
    #[serde(skip_serializing_if = "Option::is_none")]
    ir_out: Option<&'a Utf8Path>,
    #[serde(skip_serializing_if = "Option::is_none")]
    check: Option<bool>,
}

impl<'a> CliOverrides<'a> {
    fn from_args(args: &'a Args) -> Self {
        Self {
            specs_dir: args.specs_dir.as_deref(),
            origin: args.origin.as_deref(),
            ir_out: args.ir_out.as_deref(),
            check: args.should_check.then_some(true),
        }
    }
}

/// Loads the configuration for `args`.
///
/// A config file named with `--config` must exist; the default
/// `kitty-stubgen.toml` is optional.
///
/// # Errors
///
/// Returns [`StubgenError::Io`] for a missing explicit config file and
/// [`StubgenError::Config`] when a source cannot be parsed.
pub fn load_config(args: &Args) -> Result<StubgenConfig, StubgenError> {
    let file = match &args.config {
        Some(path) if !path.is_file() => {
            return Err(StubgenError::Io {
                path: path.clone(),
                source: std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    "configuration file not found",
                ),
            });
        }
        Some(path) => path.clone(),
        None => Utf8PathBuf::from(CONFIG_FILE_NAME),
    };
    debug!(path = %file, "loading configuration");

    let config = Figment::from(Serialized::defaults(StubgenConfig::default()))
        .merge(Toml::file(file.as_std_path()))
        .merge(Env::prefixed(ENV_PREFIX))
        .merge(Serialized::defaults(CliOverrides::from_args(args)))
        .extract()?;
    Ok(config)
}
