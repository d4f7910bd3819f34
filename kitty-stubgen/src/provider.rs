//! Option units and the provider that enumerates them.
//!
//! A [`Provider`] is an explicit, ordered list of entries assembled at
//! startup. Each entry is either a single option unit or a command registry
//! that expands into one unit per remote-control command with options.

use std::fmt;

use tracing::debug;

use crate::error::StubgenError;
use crate::registry::CommandRegistry;

/// Class name of the base unit describing the terminal's own options.
pub const BASE_CLASS_NAME: &str = "CLIOptions";

/// Suffix of classes generated for remote-control commands.
pub const RC_CLASS_SUFFIX: &str = "RCOptions";

/// Deferred producer of option-spec text.
pub type SpecProducer = Box<dyn Fn() -> Result<String, StubgenError>>;

/// Where an option unit gets its spec text from.
pub enum SpecSource {
    /// Spec text known up front. Empty text declares no options.
    Literal(String),
    /// Zero-argument accessor invoked when the unit is rendered.
    Producer(SpecProducer),
}

impl SpecSource {
    /// Wraps a closure as a deferred spec source.
    pub fn producer<F>(produce: F) -> Self
    where
        F: Fn() -> Result<String, StubgenError> + 'static,
    {
        Self::Producer(Box::new(produce))
    }

    /// Returns the spec text, invoking the producer if needed.
    ///
    /// # Errors
    ///
    /// Propagates the producer's error unchanged.
    pub fn resolve(&self) -> Result<String, StubgenError> {
        match self {
            Self::Literal(text) => Ok(text.clone()),
            Self::Producer(produce) => produce(),
        }
    }
}

impl fmt::Debug for SpecSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Literal(text) => f.debug_tuple("Literal").field(text).finish(),
            Self::Producer(_) => f.write_str("Producer(..)"),
        }
    }
}

impl From<&str> for SpecSource {
    fn from(text: &str) -> Self {
        Self::Literal(text.to_owned())
    }
}

impl From<String> for SpecSource {
    fn from(text: String) -> Self {
        Self::Literal(text)
    }
}

/// One class to emit into the stub.
#[derive(Debug)]
pub struct OptionUnit {
    /// Name of the generated class.
    pub class_name: String,
    /// Spec text source.
    pub source: SpecSource,
    /// `name: annotation` lines appended after the parsed options.
    pub extra_fields: Vec<String>,
}

impl OptionUnit {
    /// Creates a unit with an explicit class name.
    pub fn new(class_name: impl Into<String>, source: impl Into<SpecSource>) -> Self {
        Self {
            class_name: class_name.into(),
            source: source.into(),
            extra_fields: Vec::new(),
        }
    }

    /// Creates the base `CLIOptions` unit.
    pub fn base(source: impl Into<SpecSource>) -> Self {
        Self::new(BASE_CLASS_NAME, source)
    }

    /// Creates a `<prefix>CLIOptions` unit for a CLI entry point.
    ///
    /// ```
    /// use kitty_stubgen::provider::OptionUnit;
    ///
    /// assert_eq!(OptionUnit::cli("Launch", "").class_name, "LaunchCLIOptions");
    /// ```
    pub fn cli(prefix: &str, source: impl Into<SpecSource>) -> Self {
        Self::new(format!("{prefix}{BASE_CLASS_NAME}"), source)
    }

    /// Appends an extra `name: annotation` field.
    #[must_use]
    pub fn with_extra_field(mut self, field: impl Into<String>) -> Self {
        self.extra_fields.push(field.into());
        self
    }
}

/// Entry of a provider enumeration.
pub enum ProviderEntry {
    /// A single option unit.
    Unit(OptionUnit),
    /// A registry expanded into `<ClassName>RCOptions` units.
    Commands(Box<dyn CommandRegistry>),
}

impl fmt::Debug for ProviderEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unit(unit) => f.debug_tuple("Unit").field(unit).finish(),
            Self::Commands(_) => f.write_str("Commands(..)"),
        }
    }
}

/// Ordered enumeration of everything that goes into one stub document.
#[derive(Debug, Default)]
pub struct Provider {
    entries: Vec<ProviderEntry>,
}

impl Provider {
    /// Creates an empty provider.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a single unit.
    #[must_use]
    pub fn with_unit(mut self, unit: OptionUnit) -> Self {
        self.entries.push(ProviderEntry::Unit(unit));
        self
    }

    /// Appends a command registry.
    #[must_use]
    pub fn with_registry(mut self, registry: impl CommandRegistry + 'static) -> Self {
        self.entries.push(ProviderEntry::Commands(Box::new(registry)));
        self
    }

    /// Flattens the enumeration into option units, expanding registries.
    ///
    /// Registry command names are sorted before resolution so the result
    /// does not depend on the registry's own iteration order. Commands whose
    /// spec is empty or whitespace contribute nothing.
    ///
    /// # Errors
    ///
    /// Returns the registry's error when listing or resolving fails.
    pub fn into_units(self) -> Result<Vec<OptionUnit>, StubgenError> {
        let mut units = Vec::with_capacity(self.entries.len());
        for entry in self.entries {
            match entry {
                ProviderEntry::Unit(unit) => units.push(unit),
                ProviderEntry::Commands(registry) => {
                    expand_registry(registry.as_ref(), &mut units)?;
                }
            }
        }
        Ok(units)
    }
}

fn expand_registry(
    registry: &dyn CommandRegistry,
    units: &mut Vec<OptionUnit>,
) -> Result<(), StubgenError> {
    let mut names = registry.list_command_names()?;
    names.sort();
    names.dedup();
    for name in names {
        let command = registry.resolve_command(&name)?;
        let Some(spec) = command.non_empty_spec() else {
            debug!(command = %name, "skipping remote control command without options");
            continue;
        };
        units.push(OptionUnit::new(
            format!("{}{RC_CLASS_SUFFIX}", command.class_name),
            spec,
        ));
    }
    Ok(())
}
