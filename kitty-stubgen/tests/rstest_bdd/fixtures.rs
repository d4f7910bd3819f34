//! Shared fixtures for the `kitty-stubgen` behavioural tests.

use camino::Utf8PathBuf;
use kitty_stubgen::RunSummary;
use kitty_stubgen::error::StubgenError;
use rstest::fixture;
use rstest_bdd::Slot;
use rstest_bdd_macros::ScenarioState;
use tempfile::TempDir;

/// Scenario state shared between generation steps.
#[derive(Debug, Default, ScenarioState)]
pub struct StubgenContext {
    pub scratch: Slot<TempDir>,
    pub specs_dir: Slot<Utf8PathBuf>,
    pub extra_kittens: Slot<Vec<(String, String)>>,
    pub previous: Slot<RunSummary>,
    pub last_result: Slot<Result<RunSummary, StubgenError>>,
}

/// Provides a context with an empty scratch directory for generated files.
#[fixture]
pub fn stubgen_context() -> StubgenContext {
    let context = StubgenContext::default();
    context
        .scratch
        .set(tempfile::tempdir().expect("create scratch dir"));
    context
}
