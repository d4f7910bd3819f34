//! The kitty option-unit catalog.
//!
//! Spec text is read from a directory tree laid out as:
//!
//! ```text
//! <specs_dir>/kitty.txt             CLIOptions
//! <specs_dir>/launch.txt            LaunchCLIOptions
//! <specs_dir>/remote_control.txt    RCOptions
//! <specs_dir>/kittens/<module>.txt  <Prefix>CLIOptions
//! <specs_dir>/rc/<command>.txt      <Command>RCOptions
//! ```
//!
//! Files are read lazily, when the aggregator resolves each unit.

use camino::Utf8PathBuf;
use serde::{Deserialize, Serialize};

use crate::error::StubgenError;
use crate::fs_helpers::{open_optional_dir, read_optional_file};
use crate::provider::{OptionUnit, Provider, SpecSource};
use crate::registry::DirectoryRegistry;

/// A kitten whose options are included in the stub.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KittenSpec {
    /// Module name; the spec lives at `kittens/<module>.txt`.
    pub module: String,
    /// Class prefix; the class is named `<prefix>CLIOptions`.
    pub prefix: String,
}

impl KittenSpec {
    /// Creates a kitten entry.
    pub fn new(module: impl Into<String>, prefix: impl Into<String>) -> Self {
        Self {
            module: module.into(),
            prefix: prefix.into(),
        }
    }
}

/// Kittens bundled with kitty, in stub order.
pub const BUILTIN_KITTENS: &[(&str, &str)] = &[
    ("ask", "Ask"),
    ("clipboard", "Clipboard"),
    ("diff", "Diff"),
    ("hints", "Hints"),
    ("icat", "Icat"),
    ("panel", "Panel"),
    ("resize_window", "Resize"),
    ("show_error", "Error"),
    ("unicode_input", "Unicode"),
];

/// Extra field carried by the base class for positional arguments.
pub const ARGS_FIELD: &str = "args: typing.List[str]";

/// Extra field carried by the remote-control global options class.
pub const NO_RESPONSE_FIELD: &str = "no_command_response: typing.Optional[bool]";

/// Directory tree holding option-spec files.
#[derive(Debug, Clone)]
pub struct SpecTree {
    root: Utf8PathBuf,
}

impl SpecTree {
    /// Creates a tree rooted at `root`.
    #[must_use]
    pub fn new(root: impl Into<Utf8PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Returns a producer that reads `relative` when invoked.
    ///
    /// A missing file surfaces as [`StubgenError::MissingSpec`].
    #[must_use]
    pub fn file_source(&self, class_name: &str, relative: &str) -> SpecSource {
        let root = self.root.clone();
        let relative = Utf8PathBuf::from(relative);
        let class_name = class_name.to_owned();
        SpecSource::producer(move || {
            let missing = || StubgenError::MissingSpec {
                class_name: class_name.clone(),
                path: root.join(&relative),
            };
            let dir = open_optional_dir(&root)?.ok_or_else(missing)?;
            read_optional_file(&dir, &root, &relative)?.ok_or_else(missing)
        })
    }

    /// Registry over the `rc/` directory.
    #[must_use]
    pub fn command_registry(&self) -> DirectoryRegistry {
        DirectoryRegistry::new(self.root.join("rc"))
    }
}

/// Builds the kitty catalog: base options, launch, remote control, the
/// bundled kittens, `extra_kittens` in order, then every remote-control
/// command with options.
#[must_use]
pub fn kitty_catalog(tree: &SpecTree, extra_kittens: &[KittenSpec]) -> Provider {
    let mut provider = Provider::new()
        .with_unit(
            OptionUnit::base(tree.file_source("CLIOptions", "kitty.txt")).with_extra_field(ARGS_FIELD),
        )
        .with_unit(OptionUnit::cli(
            "Launch",
            tree.file_source("LaunchCLIOptions", "launch.txt"),
        ))
        .with_unit(
            OptionUnit::new(
                "RCOptions",
                tree.file_source("RCOptions", "remote_control.txt"),
            )
            .with_extra_field(NO_RESPONSE_FIELD),
        );

    let builtin = BUILTIN_KITTENS
        .iter()
        .map(|(module, prefix)| KittenSpec::new(*module, *prefix));
    for kitten in builtin.chain(extra_kittens.iter().cloned()) {
        let class_name = format!("{}CLIOptions", kitten.prefix);
        let source = tree.file_source(&class_name, &format!("kittens/{}.txt", kitten.module));
        provider = provider.with_unit(OptionUnit::cli(&kitten.prefix, source));
    }

    provider.with_registry(tree.command_registry())
}
