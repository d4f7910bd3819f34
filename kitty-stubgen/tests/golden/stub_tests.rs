//! Golden tests for stub generation.
//!
//! The first test pins the exact text for a small in-memory catalog. The
//! rest run the full pipeline over the spec tree under `tests/fixtures`.

use camino::Utf8PathBuf;
use cap_std::ambient_authority;
use cap_std::fs_utf8::Dir;
use kitty_stubgen::aggregate::Aggregator;
use kitty_stubgen::catalog::{ARGS_FIELD, NO_RESPONSE_FIELD};
use kitty_stubgen::config::StubgenConfig;
use kitty_stubgen::generate_stub;
use kitty_stubgen::provider::{OptionUnit, Provider};
use kitty_stubgen::registry::StaticRegistry;
use kitty_stubgen::writer::{DEFAULT_PREAMBLE, WriteStatus};
use rstest::{fixture, rstest};
use tempfile::TempDir;

const KITTY_SPEC: &str = "\
--title -T
The window title.


--start-as
type=choices
default=normal
choices=normal,fullscreen
How to start.


--detach
type=bool-set
condition=False
Detach.


--override -o
type=list
Overrides.
";

const LAUNCH_SPEC: &str = "\
--type
type=choices
default=window
choices=window,tab


--cwd
completion=type:directory
The working directory.
";

const LS_SPEC: &str = "--all-env-vars\ntype=bool-set\nShow all.\n";

const EXPECTED_STUB: &str = "\
import typing


class CLIOptions:
    title: typing.Optional[str]
    start_as: typing.Literal['normal','fullscreen']
    override: typing.Sequence[str]
    detach: bool
    args: typing.List[str]


class LaunchCLIOptions:
    type: typing.Literal['window','tab']
    cwd: typing.Optional[str]


class RCOptions:
    no_command_response: typing.Optional[bool]


class LSRCOptions:
    all_env_vars: bool


";

#[rstest]
fn golden_in_memory_catalog() {
    let provider = Provider::new()
        .with_unit(OptionUnit::base(KITTY_SPEC).with_extra_field(ARGS_FIELD))
        .with_unit(OptionUnit::cli("Launch", LAUNCH_SPEC))
        .with_unit(OptionUnit::new("RCOptions", "").with_extra_field(NO_RESPONSE_FIELD))
        .with_registry(
            StaticRegistry::new()
                .with_command("ls", Some(LS_SPEC))
                .with_command("new_tab", None),
        );
    let document = <Aggregator>::default()
        .generate(provider)
        .expect("generate stub");
    assert_eq!(document.text(), EXPECTED_STUB);
}

struct Workspace {
    _tempdir: TempDir,
    root: Utf8PathBuf,
    config: StubgenConfig,
}

impl Workspace {
    fn read(&self, relative: &str) -> String {
        Dir::open_ambient_dir(&self.root, ambient_authority())
            .expect("open workspace")
            .read_to_string(relative)
            .expect("read output")
    }
}

#[fixture]
fn workspace() -> Workspace {
    let tempdir = tempfile::tempdir().expect("create temp dir");
    let root =
        Utf8PathBuf::from_path_buf(tempdir.path().to_path_buf()).expect("tempdir path is UTF-8");
    let config = StubgenConfig {
        specs_dir: Utf8PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/specs"),
        origin: root.join("kitty/cli_stub.py"),
        ir_out: Some(root.join("ir/cli_stub.json")),
        ..StubgenConfig::default()
    };
    Workspace {
        _tempdir: tempdir,
        root,
        config,
    }
}

#[rstest]
fn fixture_tree_stub_has_expected_blocks(workspace: Workspace) {
    let summary = generate_stub(&workspace.config).expect("generate stub");
    assert_eq!(summary.stub.status, WriteStatus::Written);

    let stub = workspace.read("kitty/cli_stub.pyi");
    assert!(stub.starts_with(&format!("{DEFAULT_PREAMBLE}import typing\n\n\nclass CLIOptions:\n")));
    for block in [
        "class ErrorCLIOptions:\n    title: str\n\n\n",
        "class ResizeCLIOptions:\n    horizontal_increment: int\n    vertical_increment: int\n\n\n",
        "class LSRCOptions:\n    all_env_vars: bool\n    self: bool\n\n\n",
        "class RCOptions:\n    password: typing.Optional[str]\n    to: typing.Optional[str]\n    \
         use_password: typing.Literal['if-available','never','always']\n    \
         no_command_response: typing.Optional[bool]\n\n\n",
        "    cls: str\n",
        "    args: typing.List[str]\n\n\n",
    ] {
        assert!(stub.contains(block), "missing block:\n{block}");
    }
}

#[rstest]
fn fixture_tree_class_order(workspace: Workspace) {
    let summary = generate_stub(&workspace.config).expect("generate stub");
    assert_eq!(
        summary.class_names.get(12..),
        Some(
            &[
                "CloseWindowRCOptions".to_owned(),
                "LaunchRCOptions".to_owned(),
                "LSRCOptions".to_owned(),
                "SetFontSizeRCOptions".to_owned(),
            ][..]
        )
    );
}

#[rstest]
fn fixture_tree_ir_dump_matches_stub(workspace: Workspace) {
    let summary = generate_stub(&workspace.config).expect("generate stub");
    let (path, status) = summary.ir.expect("IR dump written");
    assert_eq!(path, workspace.root.join("ir/cli_stub.json"));
    assert_eq!(status, WriteStatus::Written);

    let json: serde_json::Value =
        serde_json::from_str(&workspace.read("ir/cli_stub.json")).expect("parse IR");
    let names: Vec<&str> = json
        .as_array()
        .expect("IR is an array")
        .iter()
        .filter_map(|unit| unit.get("class_name").and_then(serde_json::Value::as_str))
        .collect();
    assert_eq!(names, summary.class_names);
}

#[rstest]
fn check_mode_skips_ir_dump(workspace: Workspace) {
    generate_stub(&workspace.config).expect("generate stub");
    let checked = StubgenConfig {
        check: true,
        ir_out: Some(workspace.root.join("ir/other.json")),
        ..workspace.config.clone()
    };
    let summary = generate_stub(&checked).expect("stub is fresh");
    assert_eq!(summary.stub.status, WriteStatus::Unchanged);
    assert!(summary.ir.is_none());
    assert!(!workspace.root.join("ir/other.json").exists());
}
