//! Step definitions for `kitty-stubgen` behavioural tests.

use camino::Utf8PathBuf;
use kitty_stubgen::catalog::KittenSpec;
use kitty_stubgen::config::StubgenConfig;
use kitty_stubgen::error::StubgenError;
use kitty_stubgen::generate_stub;
use kitty_stubgen::writer::WriteStatus;
use rstest_bdd_macros::{given, then, when};

use crate::fixtures::StubgenContext;

/// Error type for step definition failures.
pub type StepError = Box<dyn std::error::Error + Send + Sync>;

/// Result type for step definition operations.
pub type StepResult<T> = Result<T, StepError>;

fn scratch_root(context: &StubgenContext) -> StepResult<Utf8PathBuf> {
    context
        .scratch
        .with_ref(|dir| {
            Utf8PathBuf::from_path_buf(dir.path().to_path_buf())
                .map_err(|p| format!("non-UTF-8 path: {}", p.display()))
        })
        .ok_or_else(|| "scratch dir should be set".to_owned())?
        .map_err(Into::into)
}

fn build_config(context: &StubgenContext) -> StepResult<StubgenConfig> {
    let specs_dir = context
        .specs_dir
        .get()
        .ok_or("spec tree should be chosen")?;
    let kittens = context
        .extra_kittens
        .get()
        .unwrap_or_default()
        .into_iter()
        .map(|(module, prefix)| KittenSpec::new(module, prefix))
        .collect();
    Ok(StubgenConfig {
        specs_dir,
        origin: scratch_root(context)?.join("kitty/cli_stub.py"),
        kittens,
        ..StubgenConfig::default()
    })
}

fn class_names(context: &StubgenContext) -> StepResult<Vec<String>> {
    context
        .last_result
        .with_ref(|result| match result {
            Ok(summary) => Ok(summary.class_names.clone()),
            Err(err) => Err(format!("generation failed: {err}")),
        })
        .ok_or_else(|| "stub should have been generated".to_owned())?
        .map_err(Into::into)
}

#[given("the fixture spec tree")]
fn fixture_spec_tree(stubgen_context: &StubgenContext) {
    stubgen_context.specs_dir.set(
        Utf8PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/specs"),
    );
}

#[given("an extra kitten {module} with prefix {prefix}")]
fn extra_kitten(stubgen_context: &StubgenContext, module: String, prefix: String) {
    let mut kittens = stubgen_context.extra_kittens.take().unwrap_or_default();
    kittens.push((module, prefix));
    stubgen_context.extra_kittens.set(kittens);
}

#[when("I generate the stub")]
fn generate(stubgen_context: &StubgenContext) -> StepResult<()> {
    let config = build_config(stubgen_context)?;
    stubgen_context.last_result.set(generate_stub(&config));
    Ok(())
}

#[when("I generate the stub again")]
fn generate_again(stubgen_context: &StubgenContext) -> StepResult<()> {
    let previous = stubgen_context
        .last_result
        .take()
        .ok_or("stub should have been generated")??;
    stubgen_context.previous.set(previous);
    generate(stubgen_context)
}

#[then("the stub was left unchanged")]
fn stub_unchanged(stubgen_context: &StubgenContext) -> StepResult<()> {
    let previous_digest = stubgen_context
        .previous
        .with_ref(|summary| summary.stub.digest.clone())
        .ok_or("first run should be recorded")?;
    let (status, digest) = stubgen_context
        .last_result
        .with_ref(|result| {
            result
                .as_ref()
                .map(|summary| (summary.stub.status, summary.stub.digest.clone()))
                .map_err(ToString::to_string)
        })
        .ok_or("stub should have been regenerated")??;
    assert_eq!(status, WriteStatus::Unchanged);
    assert_eq!(digest, previous_digest);
    Ok(())
}

#[then("the stub declares class {class_name}")]
fn declares_class(stubgen_context: &StubgenContext, class_name: String) -> StepResult<()> {
    let names = class_names(stubgen_context)?;
    assert!(names.contains(&class_name), "{class_name} missing from {names:?}");
    Ok(())
}

#[then("the stub does not declare class {class_name}")]
fn omits_class(stubgen_context: &StubgenContext, class_name: String) -> StepResult<()> {
    let names = class_names(stubgen_context)?;
    assert!(!names.contains(&class_name), "{class_name} unexpectedly declared");
    Ok(())
}

#[then("generation fails with duplicate class {class_name}")]
fn fails_with_duplicate(stubgen_context: &StubgenContext, class_name: String) -> StepResult<()> {
    let is_duplicate = stubgen_context
        .last_result
        .with_ref(|result| {
            matches!(
                result,
                Err(StubgenError::DuplicateClass { class_name: name }) if *name == class_name
            )
        })
        .ok_or("generation should have run")?;
    assert!(is_duplicate, "expected a duplicate {class_name} error");
    Ok(())
}

#[then("generation fails with a missing spec for {class_name}")]
fn fails_with_missing_spec(stubgen_context: &StubgenContext, class_name: String) -> StepResult<()> {
    let is_missing = stubgen_context
        .last_result
        .with_ref(|result| {
            matches!(
                result,
                Err(StubgenError::MissingSpec { class_name: name, .. }) if *name == class_name
            )
        })
        .ok_or("generation should have run")?;
    assert!(is_missing, "expected a missing spec error for {class_name}");
    Ok(())
}

#[then("no stub file was written")]
fn no_stub_written(stubgen_context: &StubgenContext) -> StepResult<()> {
    let stub = scratch_root(stubgen_context)?.join("kitty/cli_stub.pyi");
    assert!(!stub.exists(), "{stub} should not exist");
    Ok(())
}
