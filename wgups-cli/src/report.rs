//! Report command implementation for the WGUPS CLI.

use std::io::Write;

use camino::Utf8PathBuf;
use clap::Parser;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};

use crate::dataset::{Dataset, DatasetPaths};
use crate::input::{InputError, QueryTime, parse_query_time};
use crate::render::{comprehensive_report, distance_message, individual_report, trip_overview};
use crate::{
    ARG_AT, ARG_DEPOT_CONFIG, ARG_DISTANCES, ARG_PACKAGE, ARG_PACKAGES, CliError, ENV_REPORT_AT,
    ENV_REPORT_DISTANCES, ENV_REPORT_PACKAGES,
};

/// CLI arguments for the `report` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    name = "report",
    long_about = "Dispatch the day's packages and print the trip overview and \
                 total mileage. With --at, also print the status of every \
                 package (or of --package) at that time of day.",
    about = "Print a one-shot delivery report"
)]
#[ortho_config(prefix = "WGUPS")]
pub(crate) struct ReportArgs {
    /// Path to the package JSON file.
    #[arg(long = ARG_PACKAGES, value_name = "path")]
    #[serde(default)]
    pub(crate) packages: Option<Utf8PathBuf>,
    /// Path to the distance JSON file.
    #[arg(long = ARG_DISTANCES, value_name = "path")]
    #[serde(default)]
    pub(crate) distances: Option<Utf8PathBuf>,
    /// Optional depot configuration JSON file.
    #[arg(long = ARG_DEPOT_CONFIG, value_name = "path")]
    #[serde(default)]
    pub(crate) depot_config: Option<Utf8PathBuf>,
    /// Status query time as `HH:MM:SS`.
    #[arg(long = ARG_AT, value_name = "time")]
    #[serde(default)]
    pub(crate) at: Option<String>,
    /// Restrict the status report to one package.
    #[arg(long = ARG_PACKAGE, value_name = "id", requires = ARG_AT)]
    #[serde(default)]
    pub(crate) package: Option<u32>,
}

impl ReportArgs {
    pub(crate) fn into_config(self) -> Result<ReportConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        ReportConfig::try_from(merged)
    }
}

/// Resolved `report` command configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ReportConfig {
    pub(crate) dataset: DatasetPaths,
    pub(crate) at: Option<QueryTime>,
    pub(crate) package: Option<u32>,
}

impl TryFrom<ReportArgs> for ReportConfig {
    type Error = CliError;

    fn try_from(args: ReportArgs) -> Result<Self, Self::Error> {
        let packages = args.packages.ok_or(CliError::MissingArgument {
            field: ARG_PACKAGES,
            env: ENV_REPORT_PACKAGES,
        })?;
        let distances = args.distances.ok_or(CliError::MissingArgument {
            field: ARG_DISTANCES,
            env: ENV_REPORT_DISTANCES,
        })?;
        let at = args.at.as_deref().map(parse_query_time).transpose()?;
        if args.package.is_some() && at.is_none() {
            return Err(CliError::MissingArgument {
                field: ARG_AT,
                env: ENV_REPORT_AT,
            });
        }
        Ok(Self {
            dataset: DatasetPaths {
                packages,
                distances,
                depot_config: args.depot_config,
            },
            at,
            package: args.package,
        })
    }
}

pub(super) fn run_report(args: ReportArgs) -> Result<(), CliError> {
    let mut stdout = std::io::stdout().lock();
    run_report_with(args, &mut stdout)
}

pub(super) fn run_report_with(args: ReportArgs, writer: &mut dyn Write) -> Result<(), CliError> {
    let config = args.into_config()?;
    let depot = Dataset::load(&config.dataset)?.dispatch()?;
    let summary = depot.last_summary().cloned().unwrap_or_default();

    let mut out = trip_overview(&summary);
    out.push_str(&distance_message(&summary));
    if let Some(time) = &config.at {
        match config.package {
            Some(id) => {
                let package = depot.package(id).ok_or_else(|| {
                    CliError::Input(InputError::PackageId {
                        input: id.to_string(),
                    })
                })?;
                out.push_str(&individual_report(package, time));
            }
            None => out.push_str(&comprehensive_report(depot.packages(), time)),
        }
    }
    writer
        .write_all(out.as_bytes())
        .map_err(CliError::WriteOutput)
}

#[cfg(test)]
pub(crate) fn report_config_from_layers_for_test(
    layers: Vec<ortho_config::MergeLayer<'static>>,
) -> Result<ReportConfig, CliError> {
    let merged = ReportArgs::merge_from_layers(layers).map_err(CliError::from)?;
    ReportConfig::try_from(merged)
}
