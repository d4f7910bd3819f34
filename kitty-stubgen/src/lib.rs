//! Library interface for `kitty-stubgen`.
//!
//! The crate turns kitty's option-spec text into a single Python type stub
//! declaring one class per option unit. The pipeline is:
//!
//! 1. a [`provider::Provider`] enumerates option units, expanding command
//!    registries into one unit per command;
//! 2. the [`aggregate::Aggregator`] parses each unit's spec with a
//!    [`spec::SpecParser`] and renders it with a [`stub::StubRenderer`];
//! 3. a [`writer::StubWriter`] persists the document beside its origin
//!    module, skipping the write when nothing changed.

pub mod aggregate;
pub mod catalog;
pub mod cli;
pub mod config;
pub mod error;
mod fs_helpers;
pub mod logging;
pub mod provider;
pub mod registry;
pub mod spec;
pub mod stub;
pub mod writer;

use camino::Utf8PathBuf;
use tracing::info;

use crate::aggregate::Aggregator;
use crate::catalog::{SpecTree, kitty_catalog};
use crate::config::StubgenConfig;
use crate::error::StubgenError;
use crate::writer::{FileStubWriter, WriteMode, WriteOutcome, WriteStatus, sync_file};

/// What a generator run produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    /// Result of saving the stub.
    pub stub: WriteOutcome,
    /// Classes in the stub, in document order.
    pub class_names: Vec<String>,
    /// Path and status of the IR dump, when one was requested and written.
    pub ir: Option<(Utf8PathBuf, WriteStatus)>,
}

/// Generates the kitty stub described by `config`.
///
/// In check mode the stub is compared rather than written and the IR dump
/// is skipped.
///
/// # Errors
///
/// Returns the first pipeline error; nothing is written when generation
/// fails.
pub fn generate_stub(config: &StubgenConfig) -> Result<RunSummary, StubgenError> {
    let tree = SpecTree::new(config.specs_dir.clone());
    let provider = kitty_catalog(&tree, &config.kittens);
    let mode = if config.check {
        WriteMode::Check
    } else {
        WriteMode::Write
    };
    let writer = FileStubWriter::new(config.preamble.clone(), mode);

    let (document, stub) =
        <Aggregator>::default().generate_and_save(provider, &writer, &config.origin)?;

    let ir = match &config.ir_out {
        Some(path) if mode == WriteMode::Write => {
            let status = sync_file(path, &document.ir_json()?, WriteMode::Write)?;
            info!(path = %path, status = ?status, "saved option IR");
            Some((path.clone(), status))
        }
        _ => None,
    };

    Ok(RunSummary {
        stub,
        class_names: document.class_names().map(str::to_owned).collect(),
        ir,
    })
}
