//! Command-line interface for the WGUPS delivery simulator.
#![forbid(unsafe_code)]

use std::collections::BTreeMap;
use std::io::{BufRead, Write};

use camino::Utf8PathBuf;
use clap::{Parser, Subcommand};
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};

mod dataset;
mod error;
mod input;
mod render;
mod report;
mod session;

use dataset::{Dataset, DatasetPaths, read_json};
use report::{ReportArgs, run_report};
use session::{Prompter, Session};

pub use error::CliError;
pub use input::InputError;

const ARG_PACKAGES: &str = "packages";
const ARG_DISTANCES: &str = "distances";
const ARG_DEPOT_CONFIG: &str = "depot-config";
const ARG_PROMPTS: &str = "prompts";
const ARG_AT: &str = "at";
const ARG_PACKAGE: &str = "package";
const ENV_SESSION_PACKAGES: &str = "WGUPS_CMDS_SESSION_PACKAGES";
const ENV_SESSION_DISTANCES: &str = "WGUPS_CMDS_SESSION_DISTANCES";
const ENV_REPORT_PACKAGES: &str = "WGUPS_CMDS_REPORT_PACKAGES";
const ENV_REPORT_DISTANCES: &str = "WGUPS_CMDS_REPORT_DISTANCES";
const ENV_REPORT_AT: &str = "WGUPS_CMDS_REPORT_AT";

/// Run the WGUPS CLI with the current process arguments and environment.
pub fn run() -> Result<(), CliError> {
    let cli = Cli::try_parse().map_err(CliError::ArgumentParsing)?;
    match cli.command {
        Command::Session(args) => run_session(args),
        Command::Report(args) => run_report(args),
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "wgups",
    about = "Same-day package delivery simulator for the WGUPS hub",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Dispatch the day's packages and answer status queries interactively.
    Session(SessionArgs),
    /// Dispatch the day's packages and print a report.
    Report(ReportArgs),
}

/// CLI arguments for the `session` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    name = "session",
    long_about = "Load the package and distance files, run the day's \
                 deliveries, then read commands from standard input. Paths \
                 can come from CLI flags, configuration files, or environment \
                 variables.",
    about = "Answer package status queries interactively"
)]
#[ortho_config(prefix = "WGUPS")]
struct SessionArgs {
    /// Path to the package JSON file.
    #[arg(long = ARG_PACKAGES, value_name = "path")]
    #[serde(default)]
    packages: Option<Utf8PathBuf>,
    /// Path to the distance JSON file.
    #[arg(long = ARG_DISTANCES, value_name = "path")]
    #[serde(default)]
    distances: Option<Utf8PathBuf>,
    /// Optional depot configuration JSON file.
    #[arg(long = ARG_DEPOT_CONFIG, value_name = "path")]
    #[serde(default)]
    depot_config: Option<Utf8PathBuf>,
    /// Optional JSON object replacing prompt texts by name.
    #[arg(long = ARG_PROMPTS, value_name = "path")]
    #[serde(default)]
    prompts: Option<Utf8PathBuf>,
}

impl SessionArgs {
    fn into_config(self) -> Result<SessionConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        SessionConfig::try_from(merged)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct SessionConfig {
    dataset: DatasetPaths,
    prompts: Option<Utf8PathBuf>,
}

impl SessionConfig {
    fn prompter(&self) -> Result<Prompter, CliError> {
        let mut prompter = Prompter::default();
        if let Some(path) = &self.prompts {
            prompter.extend(read_json::<BTreeMap<String, String>>(path, ARG_PROMPTS)?);
        }
        Ok(prompter)
    }
}

impl TryFrom<SessionArgs> for SessionConfig {
    type Error = CliError;

    fn try_from(args: SessionArgs) -> Result<Self, Self::Error> {
        let packages = args.packages.ok_or(CliError::MissingArgument {
            field: ARG_PACKAGES,
            env: ENV_SESSION_PACKAGES,
        })?;
        let distances = args.distances.ok_or(CliError::MissingArgument {
            field: ARG_DISTANCES,
            env: ENV_SESSION_DISTANCES,
        })?;
        Ok(Self {
            dataset: DatasetPaths {
                packages,
                distances,
                depot_config: args.depot_config,
            },
            prompts: args.prompts,
        })
    }
}

fn run_session(args: SessionArgs) -> Result<(), CliError> {
    let mut stdin = std::io::stdin().lock();
    let mut stdout = std::io::stdout().lock();
    run_session_with(args, &mut stdin, &mut stdout)
}

fn run_session_with(
    args: SessionArgs,
    input: &mut dyn BufRead,
    output: &mut dyn Write,
) -> Result<(), CliError> {
    let config = args.into_config()?;
    let prompter = config.prompter()?;
    let depot = Dataset::load(&config.dataset)?.dispatch()?;
    Session::new(depot, prompter, input, output).run()
}

#[cfg(test)]
fn config_from_layers_for_test(
    layers: Vec<ortho_config::MergeLayer<'static>>,
) -> Result<SessionConfig, CliError> {
    let merged = SessionArgs::merge_from_layers(layers).map_err(CliError::from)?;
    SessionConfig::try_from(merged)
}

#[cfg(test)]
mod tests;
