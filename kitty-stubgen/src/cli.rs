//! Command-line interface definitions for `kitty-stubgen`.

use camino::Utf8PathBuf;
use clap::{Args as ClapArgs, Parser};

/// Parsed CLI arguments for `kitty-stubgen`.
#[derive(Debug, Parser)]
#[command(name = "kitty-stubgen")]
#[command(about = "Generate the typed option stub for kitty and its kittens")]
#[command(version)]
pub struct Args {
    /// Configuration file (defaults to `kitty-stubgen.toml` when present).
    #[arg(long, value_name = "path")]
    pub config: Option<Utf8PathBuf>,
    /// Directory holding the option-spec files.
    #[arg(long, value_name = "dir")]
    pub specs_dir: Option<Utf8PathBuf>,
    /// Module the stub belongs to; the stub is written beside it as `.pyi`.
    #[arg(long, value_name = "path")]
    pub origin: Option<Utf8PathBuf>,
    /// Also write the parsed option specs as JSON to this path.
    #[arg(long, value_name = "path")]
    pub ir_out: Option<Utf8PathBuf>,
    /// Fail instead of writing when the stub is out of date.
    #[arg(long = "check")]
    pub should_check: bool,
    /// Logging verbosity flags.
    #[command(flatten)]
    pub verbosity: VerbosityArgs,
}

/// Logging verbosity flags.
#[derive(Debug, ClapArgs, Clone, Copy)]
pub struct VerbosityArgs {
    /// Increase log detail (repeat for more).
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    pub verbose: u8,
    /// Only log warnings and errors.
    #[arg(short = 'q', long = "quiet", conflicts_with = "verbose")]
    pub is_quiet: bool,
}

impl VerbosityArgs {
    /// Default log directive for these flags.
    #[must_use]
    pub const fn level(self) -> &'static str {
        if self.is_quiet {
            return "warn";
        }
        match self.verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    }
}
