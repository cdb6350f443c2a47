//! Behaviour-driven step definitions driving the session CLI scenarios.

use super::helpers::{DatasetDir, run_scripted_session, three_packages, triangle_distances};
use super::*;
use crate::report::run_report_with;
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use std::cell::RefCell;

/// Aggregates session scenario state so each step only needs a single world
/// argument.
struct SessionWorld {
    dataset: DatasetDir,
    omit_packages: RefCell<bool>,
    output: RefCell<String>,
    result: RefCell<Option<Result<(), CliError>>>,
}

impl SessionWorld {
    fn new() -> Self {
        Self {
            dataset: DatasetDir::new(),
            omit_packages: RefCell::new(false),
            output: RefCell::new(String::new()),
            result: RefCell::new(None),
        }
    }

    fn session_args(&self) -> SessionArgs {
        let mut args = self.dataset.session_args();
        if *self.omit_packages.borrow() {
            args.packages = None;
        }
        args
    }

    fn assert_success(&self) {
        let borrowed = self.result.borrow();
        let result = borrowed.as_ref().expect("result recorded");
        result.as_ref().expect("expected success");
    }
}

#[fixture]
fn world() -> SessionWorld {
    SessionWorld::new()
}

#[given("a dataset of three packages on the triangle map")]
fn triangle_dataset(#[from(world)] world: &SessionWorld) {
    world.dataset.write_packages(&three_packages());
    world.dataset.write_distances(&triangle_distances());
}

#[given("no package file is configured")]
fn no_package_file(#[from(world)] world: &SessionWorld) {
    *world.omit_packages.borrow_mut() = true;
}

#[when("I run a session with the commands {commands}")]
fn run_session_commands(#[from(world)] world: &SessionWorld, commands: String) {
    let script: String = commands
        .trim_matches('"')
        .split(',')
        .map(|line| format!("{}\n", line.trim()))
        .collect();
    let (result, printed) = run_scripted_session(world.session_args(), &script);
    world.output.replace(printed);
    world.result.replace(Some(result));
}

#[when("I run the report command at {time}")]
fn run_report_at(#[from(world)] world: &SessionWorld, time: String) {
    let args = ReportArgs {
        at: Some(time.trim_matches('"').to_owned()),
        ..world.dataset.report_args()
    };
    let mut buffer = Vec::new();
    let result = run_report_with(args, &mut buffer);
    world
        .output
        .replace(String::from_utf8(buffer).expect("report output utf-8"));
    world.result.replace(Some(result));
}

#[then("the session ends cleanly")]
fn session_ends_cleanly(#[from(world)] world: &SessionWorld) {
    world.assert_success();
}

#[then("the command succeeds")]
fn command_succeeds(#[from(world)] world: &SessionWorld) {
    world.assert_success();
}

#[then("the output contains {text}")]
fn output_contains(#[from(world)] world: &SessionWorld, text: String) {
    let expected = text.trim_matches('"');
    let output = world.output.borrow();
    assert!(
        output.contains(expected),
        "expected {expected:?} in {output:?}"
    );
}

#[then("the session fails because the \"packages\" flag is missing")]
fn session_fails_missing_packages(#[from(world)] world: &SessionWorld) {
    let borrowed = world.result.borrow();
    let error = borrowed
        .as_ref()
        .expect("result recorded")
        .as_ref()
        .expect_err("expected error");
    match error {
        CliError::MissingArgument { field, env } => {
            assert_eq!(*field, ARG_PACKAGES);
            assert_eq!(*env, ENV_SESSION_PACKAGES);
        }
        other => panic!("expected MissingArgument, found {other:?}"),
    }
}

macro_rules! register_session_scenario {
    ($fn_name:ident, $scenario_title:literal) => {
        #[scenario(path = "tests/features/session_command.feature", name = $scenario_title)]
        fn $fn_name(#[from(world)] world: SessionWorld) {
            let _ = world;
        }
    };
}

register_session_scenario!(session_distance, "checking the total distance");
register_session_scenario!(session_bad_time, "recovering from a malformed time");
register_session_scenario!(session_missing_packages, "rejecting missing dataset paths");
register_session_scenario!(report_subcommand, "reporting through the report subcommand");
