//! Parser for kitty's option-spec text format.
//!
//! A spec is a sequence of option blocks separated by two blank lines:
//!
//! ```text
//! --title -T
//! type=str
//! default=kitty
//! The window title.
//!
//!
//! --hold
//! type=bool-set
//! Keep the window open.
//! ```
//!
//! The first line of a block lists the flag spellings, `key=value` lines
//! carry metadata, and everything after the first non-metadata line is help
//! text. A single blank line inside the help text is a paragraph break.

mod types;


pub use types::{OptionDescriptor, OptionType, ParsedOptionSpec, SpecEntry};

use thiserror::Error;

/// Errors raised while parsing option-spec text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SpecError {
    /// Text outside an option block that is neither a flag line nor a heading.
    #[error("line {line}: expected a `--flag` line or `# heading`, found {text:?}")]
    UnexpectedLine {
        /// One-based line number.
        line: usize,
        /// The offending line.
        text: String,
    },

    /// `choices=` given for an option already typed as something else.
    #[error("line {line}: option '{dest}' of type {kind} cannot declare choices")]
    ChoicesOnNonChoiceType {
        /// One-based line number of the `choices=` line.
        line: usize,
        /// Destination of the option.
        dest: String,
        /// The declared type.
        kind: String,
    },
}

/// Converts option-spec text into a [`ParsedOptionSpec`].
pub trait SpecParser {
    /// Parses `text`. Empty text yields an empty spec.
    ///
    /// # Errors
    ///
    /// Returns a [`SpecError`] when the text is malformed.
    fn parse(&self, text: &str) -> Result<ParsedOptionSpec, SpecError>;
}

/// Parser for the option-spec dialect used by kitty and its kittens.
#[derive(Debug, Clone, Copy, Default)]
pub struct KittySpecParser;

impl SpecParser for KittySpecParser {
    fn parse(&self, text: &str) -> Result<ParsedOptionSpec, SpecError> {
        parse_option_spec(text)
    }
}

struct PendingOption {
    option: OptionDescriptor,
    has_declared_type: bool,
}

enum State {
    Normal,
    Metadata(PendingOption),
    Help(PendingOption),
}

/// Parses option-spec text.
///
/// # Errors
///
/// Returns [`SpecError::UnexpectedLine`] for stray text between options and
/// [`SpecError::ChoicesOnNonChoiceType`] when `choices=` is used on an
/// option with an incompatible type.
///
/// # Examples
///
/// ```
/// use kitty_stubgen::spec::{OptionType, parse_option_spec};
///
/// let parsed = parse_option_spec("--repeat -r\ntype=int\ndefault=3\nHow often.\n")
///     .expect("valid spec");
/// let option = parsed.all_options().next().expect("one option");
/// assert_eq!(option.dest, "repeat");
/// assert_eq!(option.kind, OptionType::Int);
/// ```
pub fn parse_option_spec(text: &str) -> Result<ParsedOptionSpec, SpecError> {
    let mut parsed = ParsedOptionSpec::default();
    let mut state = State::Normal;
    let mut previous_blank = false;

    for (index, raw_line) in text.lines().enumerate() {
        let line_number = index + 1;
        let line = raw_line.trim_end();
        state = match state {
            State::Normal => parse_normal_line(line, line_number, &mut parsed)?,
            State::Metadata(mut pending) => {
                if let Some((key, value)) = split_metadata(line) {
                    apply_metadata(&mut pending, key, value, line_number)?;
                    State::Metadata(pending)
                } else {
                    pending.option.help.push_str(line);
                    State::Help(pending)
                }
            }
            State::Help(mut pending) => {
                if !line.is_empty() {
                    append_help_line(&mut pending.option.help, line);
                    State::Help(pending)
                } else if previous_blank {
                    finish_option(pending.option, &mut parsed);
                    State::Normal
                } else {
                    pending.option.help.push_str("\n\n");
                    State::Help(pending)
                }
            }
        };
        previous_blank = line.is_empty();
    }

    match state {
        State::Metadata(pending) | State::Help(pending) => {
            finish_option(pending.option, &mut parsed);
        }
        State::Normal => {}
    }

    Ok(parsed)
}

fn parse_normal_line(
    line: &str,
    line_number: usize,
    parsed: &mut ParsedOptionSpec,
) -> Result<State, SpecError> {
    if line.is_empty() {
        return Ok(State::Normal);
    }
    if let Some(title) = line.strip_prefix("# ") {
        parsed.entries.push(SpecEntry::Heading {
            title: title.to_owned(),
        });
        return Ok(State::Normal);
    }
    if line.starts_with("--") {
        return Ok(State::Metadata(PendingOption {
            option: OptionDescriptor::from_alias_line(line),
            has_declared_type: false,
        }));
    }
    Err(SpecError::UnexpectedLine {
        line: line_number,
        text: line.to_owned(),
    })
}

/// Splits a `key=value` metadata line; keys are lowercase ASCII words and
/// values are non-empty.
fn split_metadata(line: &str) -> Option<(&str, &str)> {
    let (key, value) = line.split_once('=')?;
    let is_key = !key.is_empty() && key.bytes().all(|b| b.is_ascii_lowercase());
    (is_key && !value.is_empty()).then_some((key, value))
}

fn apply_metadata(
    pending: &mut PendingOption,
    key: &str,
    value: &str,
    line_number: usize,
) -> Result<(), SpecError> {
    let option = &mut pending.option;
    match key {
        "type" => {
            option.kind = OptionType::from_spec(value);
            pending.has_declared_type = true;
        }
        "default" => option.default = Some(value.to_owned()),
        "dest" => option.dest = value.to_owned(),
        "condition" => option.condition = Some(value.to_owned()),
        "completion" => option.completion = Some(value.to_owned()),
        "choices" => {
            if !pending.has_declared_type {
                option.kind = OptionType::Choices;
                pending.has_declared_type = true;
            }
            if option.kind != OptionType::Choices {
                return Err(SpecError::ChoicesOnNonChoiceType {
                    line: line_number,
                    dest: option.dest.clone(),
                    kind: option.kind.as_str().to_owned(),
                });
            }
            option.choices = value.split(',').map(|c| c.trim().to_owned()).collect();
            if option.default.is_none() {
                option.default = option.choices.first().cloned();
            }
        }
        _ => {}
    }
    Ok(())
}

fn append_help_line(help: &mut String, line: &str) {
    if !help.is_empty() && !help.ends_with('\n') {
        help.push(' ');
    }
    help.push_str(line);
}

fn finish_option(mut option: OptionDescriptor, parsed: &mut ParsedOptionSpec) {
    option.help.truncate(option.help.trim_end().len());
    if option.condition.as_deref().is_none_or(is_condition_enabled) {
        parsed.entries.push(SpecEntry::Option(option));
    } else {
        parsed.disabled.push(option);
    }
}

/// Evaluates a `condition=` expression for the current build target.
///
/// Unrecognised expressions count as enabled so that the option still lands
/// among the regular options of the stub.
fn is_condition_enabled(expression: &str) -> bool {
    match expression.trim() {
        "False" | "false" | "0" => false,
        "is_macos" => cfg!(target_os = "macos"),
        "not is_macos" => !cfg!(target_os = "macos"),
        _ => true,
    }
}
