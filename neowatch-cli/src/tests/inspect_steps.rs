//! Behaviour-driven step definitions driving the inspect CLI scenarios.

use super::helpers::DatasetFiles;
use super::*;
use crate::inspect::NO_MATCH;
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use std::cell::RefCell;

#[derive(Debug)]
struct InspectWorld {
    files: RefCell<Option<DatasetFiles>>,
    cli_args: RefCell<Vec<String>>,
    stdout: RefCell<Vec<u8>>,
    result: RefCell<Option<Result<(), CliError>>>,
}

impl InspectWorld {
    fn new() -> Self {
        Self {
            files: RefCell::new(None),
            cli_args: RefCell::new(Vec::new()),
            stdout: RefCell::new(Vec::new()),
            result: RefCell::new(None),
        }
    }

    fn build_command_line(&self) -> Vec<String> {
        let mut argv = vec!["neowatch".to_owned(), "inspect".to_owned()];
        if let Some(files) = self.files.borrow().as_ref() {
            argv.extend([
                format!("--{ARG_NEOFILE}"),
                files.neofile().into_string(),
                format!("--{ARG_CADFILE}"),
                files.cadfile().into_string(),
            ]);
        }
        argv.extend(self.cli_args.borrow().iter().cloned());
        argv
    }

    fn push_args<const N: usize>(&self, args: [&str; N]) {
        self.cli_args
            .borrow_mut()
            .extend(args.into_iter().map(str::to_owned));
    }

    fn stdout_text(&self) -> String {
        let borrowed = self.result.borrow();
        let result = borrowed.as_ref().expect("result recorded");
        result.as_ref().expect("expected success");
        String::from_utf8(self.stdout.borrow().clone()).expect("stdout utf-8")
    }
}

#[fixture]
fn world() -> InspectWorld {
    InspectWorld::new()
}

#[given("sample datasets exist for inspection")]
fn sample_datasets(#[from(world)] world: &InspectWorld) {
    world.files.replace(Some(DatasetFiles::new()));
}

#[given("I ask for the designation 433")]
fn ask_for_eros(#[from(world)] world: &InspectWorld) {
    world.push_args(["--pdes", "433"]);
}

#[given("I ask for the designation 999999")]
fn ask_for_unknown(#[from(world)] world: &InspectWorld) {
    world.push_args(["--pdes", "999999"]);
}

#[given("I ask for the name Eros")]
fn ask_for_name(#[from(world)] world: &InspectWorld) {
    world.push_args(["--name", "Eros"]);
}

#[given("I request verbose output")]
fn request_verbose(#[from(world)] world: &InspectWorld) {
    world.push_args(["--verbose"]);
}

#[when("I run the inspect command")]
fn run_inspect_command(#[from(world)] world: &InspectWorld) {
    let invocation = world.build_command_line();
    let parsed = Cli::try_parse_from(invocation).map_err(CliError::from);
    let outcome = parsed.and_then(|cli| match cli.command {
        Command::Inspect(args) => {
            let mut buffer = world.stdout.borrow_mut();
            run_inspect(args, &mut *buffer)
        }
        Command::Query(_) => panic!("expected inspect command"),
    });
    world.result.replace(Some(outcome));
}

#[then("the command succeeds and describes 433 Eros")]
fn describes_eros(#[from(world)] world: &InspectWorld) {
    assert_eq!(
        world.stdout_text(),
        "NEO 433 (Eros) has a diameter of 16.840 km and is not potentially hazardous.\n"
    );
}

#[then("the command succeeds and lists one close approach")]
fn lists_one_approach(#[from(world)] world: &InspectWorld) {
    let text = world.stdout_text();
    let approaches: Vec<&str> = text.lines().filter(|line| line.starts_with("- ")).collect();
    assert_eq!(approaches.len(), 1);
    assert!(text.starts_with("NEO 433 (Eros)"));
}

#[then("the command succeeds and reports that nothing matched")]
fn reports_no_match(#[from(world)] world: &InspectWorld) {
    assert_eq!(world.stdout_text(), format!("{NO_MATCH}\n"));
}

#[then("the command fails because no lookup was given")]
fn fails_without_lookup(#[from(world)] world: &InspectWorld) {
    let borrowed = world.result.borrow();
    let error = borrowed
        .as_ref()
        .expect("result recorded")
        .as_ref()
        .expect_err("expected error");
    match error {
        CliError::MissingLookup { .. } => {}
        other => panic!("expected MissingLookup, found {other:?}"),
    }
}

macro_rules! register_inspect_scenario {
    ($fn_name:ident, $scenario_title:literal) => {
        #[scenario(path = "tests/features/inspect_command.feature", name = $scenario_title)]
        fn $fn_name(#[from(world)] world: InspectWorld) {
            let _ = world;
        }
    };
}

register_inspect_scenario!(inspect_by_designation, "inspecting an object by designation");
register_inspect_scenario!(
    inspect_verbose,
    "inspecting an object with its close approaches"
);
register_inspect_scenario!(inspect_unknown, "inspecting an unknown object");
register_inspect_scenario!(
    inspect_without_lookup,
    "inspecting without a designation or name"
);
