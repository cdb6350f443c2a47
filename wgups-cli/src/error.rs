//! Error types emitted by the WGUPS CLI.
//!
//! Keep this error type reasonably small, as many CLI helpers return
//! `Result<_, CliError>` and the workspace enables `clippy::result_large_err`.

use std::sync::Arc;

use camino::Utf8PathBuf;
use thiserror::Error;
use wgups_router::RoutingError;

use crate::input::InputError;

/// Errors emitted by the WGUPS CLI.
#[derive(Debug, Error)]
pub enum CliError {
    /// Provided arguments failed Clap validation.
    #[error(transparent)]
    ArgumentParsing(#[from] clap::Error),
    /// Configuration layering failed (files, env, CLI).
    #[error("failed to load configuration: {0}")]
    Configuration(#[from] Arc<ortho_config::OrthoError>),
    /// A required option is missing after configuration merging.
    #[error("missing {field} (set --{field} or {env})")]
    MissingArgument {
        /// Command-line flag name.
        field: &'static str,
        /// Environment variable that also supplies the value.
        env: &'static str,
    },
    /// A referenced input file does not exist.
    #[error("{field} path {path:?} does not exist")]
    MissingSourceFile {
        /// Command-line flag naming the file.
        field: &'static str,
        /// Path that was not found.
        path: Utf8PathBuf,
    },
    /// Opening an input file failed for a reason other than absence.
    #[error("failed to open {field} file at {path:?}: {source}")]
    OpenSource {
        /// Command-line flag naming the file.
        field: &'static str,
        /// Path that failed to open.
        path: Utf8PathBuf,
        /// Underlying IO failure.
        #[source]
        source: std::io::Error,
    },
    /// An input file is not valid JSON of the expected shape.
    #[error("failed to parse {field} JSON at {path:?}: {source}")]
    ParseSource {
        /// Command-line flag naming the file.
        field: &'static str,
        /// Path of the malformed file.
        path: Utf8PathBuf,
        /// Decoder failure.
        #[source]
        source: serde_json::Error,
    },
    /// A package key in the package file is not a decimal id.
    #[error("package key {key:?} in {path:?} is not a package id")]
    InvalidPackageKey {
        /// Path of the package file.
        path: Utf8PathBuf,
        /// Offending key.
        key: String,
    },
    /// A distance entry is negative, not finite, or not a number.
    #[error("distance from {from:?} to {to:?} is not a non-negative number: {value}")]
    InvalidDistance {
        /// Origin street.
        from: String,
        /// Destination street.
        to: String,
        /// Raw value from the file.
        value: String,
    },
    /// Dispatching the packages failed.
    #[error("dispatch failed: {0}")]
    Routing(#[from] RoutingError),
    /// A value supplied for a one-shot report was rejected.
    #[error(transparent)]
    Input(#[from] InputError),
    /// Writing to the terminal failed.
    #[error("failed to write output: {0}")]
    WriteOutput(#[source] std::io::Error),
    /// Reading from the terminal failed.
    #[error("failed to read input: {0}")]
    ReadInput(#[source] std::io::Error),
}
