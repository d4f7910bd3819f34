//! Error types for `kitty-stubgen`.

use camino::Utf8PathBuf;
use thiserror::Error;

use crate::spec::SpecError;
use crate::stub::RenderError;

/// Errors surfaced by the stub generation pipeline.
///
/// Nothing in the pipeline recovers locally: every variant aborts the run
/// before the writer sees any output.
#[derive(Debug, Error)]
pub enum StubgenError {
    /// A fixed unit's spec file does not exist.
    #[error("option spec for {class_name} not found at {path}")]
    MissingSpec {
        /// Class the spec belongs to.
        class_name: String,
        /// Expected location of the spec.
        path: Utf8PathBuf,
    },

    /// A registry was asked for a command it does not know.
    #[error("remote control command '{0}' is not registered")]
    UnknownCommand(String),

    /// A unit's class name cannot be used in Python source.
    #[error("class name '{0}' is not a valid Python identifier")]
    InvalidClassName(String),

    /// Two units produce the same class.
    #[error("class name '{class_name}' is produced by more than one option unit")]
    DuplicateClass {
        /// The colliding class name.
        class_name: String,
    },

    /// A spec failed to parse.
    #[error("invalid option spec for {class_name}: {source}")]
    Spec {
        /// Class whose spec failed.
        class_name: String,
        /// Underlying parse error.
        #[source]
        source: SpecError,
    },

    /// A parsed spec could not be rendered.
    #[error("cannot render {class_name}: {source}")]
    Render {
        /// Class whose block failed.
        class_name: String,
        /// Underlying render error.
        #[source]
        source: RenderError,
    },

    /// Check mode found a stub that differs from the generated text.
    #[error("stub at {path} is out of date (expected sha256 {expected})")]
    StaleStub {
        /// Stale destination.
        path: Utf8PathBuf,
        /// Digest of the content that belongs there.
        expected: String,
    },

    /// The IR dump could not be serialised.
    #[error("failed to serialise option IR: {0}")]
    IrJson(#[from] serde_json::Error),

    /// Configuration could not be loaded.
    #[error("configuration error: {0}")]
    Config(#[from] Box<figment::Error>),

    /// Filesystem failure.
    #[error("I/O error at {path}: {source}")]
    Io {
        /// Path being accessed.
        path: Utf8PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// Other failure.
    #[error("{0}")]
    Message(String),
}

impl From<figment::Error> for StubgenError {
    fn from(err: figment::Error) -> Self {
        Self::Config(Box::new(err))
    }
}
