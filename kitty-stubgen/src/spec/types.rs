//! Structured representation of a parsed option spec.

use serde::{Serialize, Serializer};

/// Value type declared with `type=` in an option spec.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OptionType {
    /// Free-form string; also used when no type is declared.
    Str,
    /// Integer value.
    Int,
    /// Floating point value.
    Float,
    /// Repeatable option collecting strings.
    List,
    /// One of a fixed set of strings.
    Choices,
    /// Switch that sets a flag.
    BoolSet,
    /// Switch that clears a flag.
    BoolReset,
    /// Any other `bool-` switch, kept with its full spelling.
    BoolOther(String),
    /// Type name the stub renderer does not know about.
    Other(String),
}

impl OptionType {
    /// Maps a `type=` value onto an option type.
    ///
    /// `choice` is accepted as an alias for `choices`, and the empty string
    /// means "no declared type".
    #[must_use]
    pub fn from_spec(value: &str) -> Self {
        match value {
            "" | "str" => Self::Str,
            "int" => Self::Int,
            "float" => Self::Float,
            "list" => Self::List,
            "choice" | "choices" => Self::Choices,
            "bool-set" => Self::BoolSet,
            "bool-reset" => Self::BoolReset,
            other if other.starts_with("bool-") => Self::BoolOther(other.to_owned()),
            other => Self::Other(other.to_owned()),
        }
    }

    /// Returns the option-spec spelling of this type.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Str => "str",
            Self::Int => "int",
            Self::Float => "float",
            Self::List => "list",
            Self::Choices => "choices",
            Self::BoolSet => "bool-set",
            Self::BoolReset => "bool-reset",
            Self::BoolOther(name) | Self::Other(name) => name,
        }
    }
}

impl Serialize for OptionType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// A single `--flag` entry from an option spec.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OptionDescriptor {
    /// Attribute name used on the generated class.
    pub dest: String,
    /// Every flag spelling, in declaration order.
    pub aliases: Vec<String>,
    /// Declared value type.
    #[serde(rename = "type")]
    pub kind: OptionType,
    /// Default value as written in the spec.
    pub default: Option<String>,
    /// Allowed values for `choices` options, in declaration order.
    pub choices: Vec<String>,
    /// Raw `condition=` expression.
    pub condition: Option<String>,
    /// Raw `completion=` specification.
    pub completion: Option<String>,
    /// Reflowed help text.
    pub help: String,
}

impl OptionDescriptor {
    pub(crate) fn from_alias_line(line: &str) -> Self {
        let aliases: Vec<String> = line.split_whitespace().map(str::to_owned).collect();
        let dest = aliases
            .first()
            .map(|flag| flag.trim_start_matches('-').replace('-', "_"))
            .unwrap_or_default();
        Self {
            dest,
            aliases,
            kind: OptionType::Str,
            default: None,
            choices: Vec::new(),
            condition: None,
            completion: None,
            help: String::new(),
        }
    }
}

/// Top-level item of an option spec.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "entry", rename_all = "snake_case")]
pub enum SpecEntry {
    /// A `# heading` line grouping the options that follow it.
    Heading {
        /// Heading text without the leading marker.
        title: String,
    },
    /// An option definition.
    Option(OptionDescriptor),
}

/// Parsed option spec: enabled entries plus options disabled by their
/// `condition`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ParsedOptionSpec {
    /// Headings and enabled options, in declaration order.
    pub entries: Vec<SpecEntry>,
    /// Options whose condition evaluated false, in declaration order.
    pub disabled: Vec<OptionDescriptor>,
}

impl ParsedOptionSpec {
    /// Iterates enabled options followed by disabled ones, skipping headings.
    pub fn all_options(&self) -> impl Iterator<Item = &OptionDescriptor> {
        self.entries
            .iter()
            .filter_map(|entry| match entry {
                SpecEntry::Option(option) => Some(option),
                SpecEntry::Heading { .. } => None,
            })
            .chain(self.disabled.iter())
    }

    /// Returns `true` when the spec declares no options at all.
    #[must_use]
    pub fn has_no_options(&self) -> bool {
        self.all_options().next().is_none()
    }
}
