//! Aggregation of option units into one stub document.
//!
//! The aggregator drives the provider, parser, and renderer in a single
//! linear pass. Class names are validated before any spec is resolved, so a
//! collision never reaches the writer.

use std::collections::BTreeSet;

use camino::Utf8Path;
use serde::Serialize;
use tracing::{debug, info};

use crate::error::StubgenError;
use crate::provider::{OptionUnit, Provider};
use crate::spec::{KittySpecParser, ParsedOptionSpec, SpecParser};
use crate::stub::{PythonStubRenderer, StubRenderer};
use crate::writer::{StubWriter, WriteOutcome};

/// Fixed header preceding every rendered class.
pub const STUB_HEADER: &str = "import typing\n\n\n";

/// Parsed spec of one unit, kept for the JSON dump.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UnitIr {
    /// Generated class name.
    pub class_name: String,
    /// Extra fields appended to the class.
    pub extra_fields: Vec<String>,
    /// Parsed option spec.
    pub spec: ParsedOptionSpec,
}

/// Rendered stub text plus the per-unit IR it was built from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StubDocument {
    text: String,
    units: Vec<UnitIr>,
}

impl StubDocument {
    /// Full document text, header included.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Parsed units in document order.
    #[must_use]
    pub fn units(&self) -> &[UnitIr] {
        &self.units
    }

    /// Class names in document order.
    pub fn class_names(&self) -> impl Iterator<Item = &str> {
        self.units.iter().map(|unit| unit.class_name.as_str())
    }

    /// Serialises the per-unit IR as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns [`StubgenError::IrJson`] if serialisation fails.
    pub fn ir_json(&self) -> Result<String, StubgenError> {
        let mut json = serde_json::to_string_pretty(&self.units)?;
        json.push('\n');
        Ok(json)
    }
}

/// Drives a parser and renderer over a provider's units.
#[derive(Debug, Clone, Default)]
pub struct Aggregator<P = KittySpecParser, R = PythonStubRenderer> {
    parser: P,
    renderer: R,
}

impl<P: SpecParser, R: StubRenderer> Aggregator<P, R> {
    /// Creates an aggregator from its collaborators.
    pub const fn new(parser: P, renderer: R) -> Self {
        Self { parser, renderer }
    }

    /// Builds the stub document for every unit the provider yields.
    ///
    /// # Errors
    ///
    /// Fails on the first invalid or duplicate class name, unresolvable
    /// spec source, parse failure, or render failure.
    pub fn generate(&self, provider: Provider) -> Result<StubDocument, StubgenError> {
        let units = provider.into_units()?;
        check_class_names(&units)?;

        let mut text = String::from(STUB_HEADER);
        let mut irs = Vec::with_capacity(units.len());
        for unit in units {
            let spec_text = unit.source.resolve()?;
            let spec = self
                .parser
                .parse(&spec_text)
                .map_err(|source| StubgenError::Spec {
                    class_name: unit.class_name.clone(),
                    source,
                })?;
            let block = self
                .renderer
                .render(&spec, &unit.class_name, &unit.extra_fields)
                .map_err(|source| StubgenError::Render {
                    class_name: unit.class_name.clone(),
                    source,
                })?;
            debug!(class = %unit.class_name, bytes = block.len(), "rendered option class");
            text.push_str(&block);
            irs.push(UnitIr {
                class_name: unit.class_name,
                extra_fields: unit.extra_fields,
                spec,
            });
        }

        info!(classes = irs.len(), "generated option stub");
        Ok(StubDocument { text, units: irs })
    }

    /// Generates the document and hands it to `writer` for `origin`.
    ///
    /// The writer is only invoked once the whole document rendered.
    ///
    /// # Errors
    ///
    /// Returns generation errors before touching the writer, or the
    /// writer's own error.
    pub fn generate_and_save<W: StubWriter + ?Sized>(
        &self,
        provider: Provider,
        writer: &W,
        origin: &Utf8Path,
    ) -> Result<(StubDocument, WriteOutcome), StubgenError> {
        let document = self.generate(provider)?;
        let outcome = writer.save(document.text(), origin)?;
        Ok((document, outcome))
    }
}

fn check_class_names(units: &[OptionUnit]) -> Result<(), StubgenError> {
    let mut seen = BTreeSet::new();
    for unit in units {
        if !is_python_identifier(&unit.class_name) {
            return Err(StubgenError::InvalidClassName(unit.class_name.clone()));
        }
        if !seen.insert(unit.class_name.as_str()) {
            return Err(StubgenError::DuplicateClass {
                class_name: unit.class_name.clone(),
            });
        }
    }
    Ok(())
}

const PYTHON_KEYWORDS: &[&str] = &[
    "False", "None", "True", "and", "as", "assert", "async", "await", "break", "class",
    "continue", "def", "del", "elif", "else", "except", "finally", "for", "from", "global", "if",
    "import", "in", "is", "lambda", "nonlocal", "not", "or", "pass", "raise", "return", "try",
    "while", "with", "yield",
];

/// Checks for an ASCII Python identifier that is not a keyword.
fn is_python_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    (first == '_' || first.is_ascii_alphabetic())
        && chars.all(|c| c == '_' || c.is_ascii_alphanumeric())
        && !PYTHON_KEYWORDS.contains(&name)
}
