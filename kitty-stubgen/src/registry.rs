//! Remote-control command registries.
//!
//! A registry answers two questions: which commands exist, and what a given
//! command looks like. Listing order is not guaranteed; callers that need
//! reproducible output sort the names themselves.

use camino::{Utf8Path, Utf8PathBuf};
use cap_std::ambient_authority;
use cap_std::fs_utf8::Dir;
use heck::ToUpperCamelCase;
use tracing::debug;

use crate::error::StubgenError;
use crate::fs_helpers::read_optional_file;

/// A remote-control command as seen by the stub generator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistryCommand {
    /// Command name as typed on the command line.
    pub name: String,
    /// Class name of the command implementation.
    pub class_name: String,
    /// Option spec text, if the command accepts options.
    pub options_spec: Option<String>,
}

impl RegistryCommand {
    /// Returns the spec text when it contains anything besides whitespace.
    #[must_use]
    pub fn non_empty_spec(&self) -> Option<&str> {
        self.options_spec
            .as_deref()
            .filter(|spec| !spec.trim().is_empty())
    }
}

/// Source of remote-control commands.
pub trait CommandRegistry {
    /// Lists every registered command name.
    ///
    /// # Errors
    ///
    /// Returns an error when the registry cannot be enumerated.
    fn list_command_names(&self) -> Result<Vec<String>, StubgenError>;

    /// Resolves a command by name.
    ///
    /// # Errors
    ///
    /// Returns [`StubgenError::UnknownCommand`] for unregistered names, or
    /// an I/O error when the command definition cannot be read.
    fn resolve_command(&self, name: &str) -> Result<RegistryCommand, StubgenError>;
}

/// Converts a command name into the class name of its implementation.
///
/// Names are converted with `heck`'s upper camel case, so `_` and `-`
/// separated words are capitalised and joined. Names of at most two letters
/// are acronyms and are upper-cased whole.
///
/// ```
/// use kitty_stubgen::registry::class_name_for_command;
///
/// assert_eq!(class_name_for_command("set_font_size"), "SetFontSize");
/// assert_eq!(class_name_for_command("close-window"), "CloseWindow");
/// assert_eq!(class_name_for_command("ls"), "LS");
/// ```
#[must_use]
pub fn class_name_for_command(name: &str) -> String {
    if name.len() <= 2 && name.bytes().all(|b| b.is_ascii_alphabetic()) {
        return name.to_ascii_uppercase();
    }
    name.to_upper_camel_case()
}

/// Registry backed by a directory holding one `<command>.txt` spec per
/// command. An empty file declares a command without options.
#[derive(Debug, Clone)]
pub struct DirectoryRegistry {
    root: Utf8PathBuf,
}

impl DirectoryRegistry {
    /// Extension of command spec files.
    pub const SPEC_EXTENSION: &'static str = "txt";

    /// Creates a registry reading from `root`.
    #[must_use]
    pub fn new(root: impl Into<Utf8PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn open_root(&self) -> Result<Dir, StubgenError> {
        Dir::open_ambient_dir(&self.root, ambient_authority()).map_err(|err| StubgenError::Io {
            path: self.root.clone(),
            source: err,
        })
    }
}

impl CommandRegistry for DirectoryRegistry {
    fn list_command_names(&self) -> Result<Vec<String>, StubgenError> {
        let dir = self.open_root()?;
        let io_err = |err| StubgenError::Io {
            path: self.root.clone(),
            source: err,
        };
        let mut names = Vec::new();
        for entry_result in dir.read_dir(".").map_err(io_err)? {
            let entry = entry_result.map_err(io_err)?;
            if !entry.file_type().map_err(io_err)?.is_file() {
                continue;
            }
            let file_name = entry.file_name().map_err(io_err)?;
            let path = Utf8Path::new(&file_name);
            if path.extension() == Some(Self::SPEC_EXTENSION) {
                if let Some(stem) = path.file_stem() {
                    names.push(stem.to_owned());
                }
            }
        }
        debug!(root = %self.root, count = names.len(), "listed remote control commands");
        Ok(names)
    }

    fn resolve_command(&self, name: &str) -> Result<RegistryCommand, StubgenError> {
        let dir = self.open_root()?;
        let file_name = format!("{name}.{}", Self::SPEC_EXTENSION);
        let options_spec = read_optional_file(&dir, &self.root, Utf8Path::new(&file_name))?
            .ok_or_else(|| StubgenError::UnknownCommand(name.to_owned()))?;
        Ok(RegistryCommand {
            name: name.to_owned(),
            class_name: class_name_for_command(name),
            options_spec: Some(options_spec),
        })
    }
}

/// In-memory registry, listing commands in insertion order.
#[derive(Debug, Clone, Default)]
pub struct StaticRegistry {
    commands: Vec<RegistryCommand>,
}

impl StaticRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a command, deriving its class name from `name`.
    #[must_use]
    pub fn with_command(mut self, name: &str, options_spec: Option<&str>) -> Self {
        self.commands.push(RegistryCommand {
            name: name.to_owned(),
            class_name: class_name_for_command(name),
            options_spec: options_spec.map(str::to_owned),
        });
        self
    }
}

impl CommandRegistry for StaticRegistry {
    fn list_command_names(&self) -> Result<Vec<String>, StubgenError> {
        Ok(self.commands.iter().map(|cmd| cmd.name.clone()).collect())
    }

    fn resolve_command(&self, name: &str) -> Result<RegistryCommand, StubgenError> {
        self.commands
            .iter()
            .find(|cmd| cmd.name == name)
            .cloned()
            .ok_or_else(|| StubgenError::UnknownCommand(name.to_owned()))
    }
}
