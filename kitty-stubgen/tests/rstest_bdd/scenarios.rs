//! Binds the `kitty-stubgen` feature files to the step registry.

use crate::fixtures::{StubgenContext, stubgen_context};
use rstest_bdd_macros::scenarios;

scenarios!(
    "tests/features/generate_stub.feature",
    fixtures = [stubgen_context: StubgenContext]
);
