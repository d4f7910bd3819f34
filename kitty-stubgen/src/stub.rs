//! Python type-stub renderer for parsed option specs.
//!
//! Each spec becomes one class whose attributes mirror the option
//! destinations, annotated with the type the option parser would produce.

use std::fmt::Write as _;

use thiserror::Error;

use crate::spec::{OptionDescriptor, OptionType, ParsedOptionSpec};

/// Errors raised while rendering a class declaration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RenderError {
    /// The option's type has no annotation.
    #[error("option '{dest}' has unknown type '{kind}'")]
    UnknownOptionType {
        /// Destination of the option.
        dest: String,
        /// The unrecognised type name.
        kind: String,
    },
    /// Writing into the class block failed.
    #[error("failed to format class block")]
    Format(#[from] std::fmt::Error),
}

/// Turns a parsed option spec into a textual type declaration.
pub trait StubRenderer {
    /// Renders one class block named `class_name`.
    ///
    /// `extra_fields` are `name: annotation` lines appended after the
    /// parsed options.
    ///
    /// # Errors
    ///
    /// Returns a [`RenderError`] when an option cannot be annotated.
    fn render(
        &self,
        parsed: &ParsedOptionSpec,
        class_name: &str,
        extra_fields: &[String],
    ) -> Result<String, RenderError>;
}

/// Renders `.pyi` class declarations.
#[derive(Debug, Clone, Copy, Default)]
pub struct PythonStubRenderer;

impl StubRenderer for PythonStubRenderer {
    fn render(
        &self,
        parsed: &ParsedOptionSpec,
        class_name: &str,
        extra_fields: &[String],
    ) -> Result<String, RenderError> {
        let mut block = format!("class {class_name}:\n");
        let mut is_empty = true;
        for option in parsed.all_options() {
            let annotation = annotation_for(option)?;
            writeln!(block, "    {}: {annotation}", option.dest)?;
            is_empty = false;
        }
        for field in extra_fields {
            writeln!(block, "    {field}")?;
            is_empty = false;
        }
        if is_empty {
            block.push_str("    pass\n");
        }
        block.push_str("\n\n");
        Ok(block)
    }
}

/// Returns the Python annotation for an option's value.
///
/// # Errors
///
/// Returns [`RenderError::UnknownOptionType`] for types outside the option-spec
/// vocabulary.
///
/// # Examples
///
/// ```
/// use kitty_stubgen::spec::parse_option_spec;
/// use kitty_stubgen::stub::annotation_for;
///
/// let parsed = parse_option_spec("--mode\nchoices=fast,slow\n").expect("valid spec");
/// let option = parsed.all_options().next().expect("one option");
/// assert_eq!(
///     annotation_for(option).expect("known type"),
///     "typing.Literal['fast','slow']"
/// );
/// ```
pub fn annotation_for(option: &OptionDescriptor) -> Result<String, RenderError> {
    let annotation = match &option.kind {
        OptionType::Str if option.default.is_none() => "typing.Optional[str]".to_owned(),
        OptionType::Str => "str".to_owned(),
        OptionType::Int => "int".to_owned(),
        OptionType::Float => "float".to_owned(),
        OptionType::List => "typing.Sequence[str]".to_owned(),
        OptionType::Choices if option.choices.is_empty() => "str".to_owned(),
        OptionType::Choices => {
            let literals: Vec<String> = option.choices.iter().map(|c| python_repr(c)).collect();
            format!("typing.Literal[{}]", literals.join(","))
        }
        OptionType::BoolSet | OptionType::BoolReset | OptionType::BoolOther(_) => {
            "bool".to_owned()
        }
        OptionType::Other(kind) => {
            return Err(RenderError::UnknownOptionType {
                dest: option.dest.clone(),
                kind: kind.clone(),
            });
        }
    };
    Ok(annotation)
}

/// Quotes a string the way Python's `repr` does for plain text.
fn python_repr(value: &str) -> String {
    let quote = if value.contains('\'') && !value.contains('"') {
        '"'
    } else {
        '\''
    };
    let mut out = String::with_capacity(value.len() + 2);
    out.push(quote);
    for ch in value.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            c if c == quote => {
                out.push('\\');
                out.push(c);
            }
            c => out.push(c),
        }
    }
    out.push(quote);
    out
}
