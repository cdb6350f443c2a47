//! Test helpers writing small package and distance datasets to disk.

use super::*;
use camino::{Utf8Path, Utf8PathBuf};
use serde_json::{Value, json};
use std::fs;
use tempfile::TempDir;
use wgups_core::DEFAULT_DEPOT_ADDRESS;

pub(super) fn write_utf8(path: &Utf8Path, contents: &[u8]) {
    fs::write(path.as_std_path(), contents).expect("write fixture file");
}

/// Hub plus streets `A`, `B` and `C`.
///
/// Greedy order from the hub is `A` (2.0), `B` (4.0), `C` (3.0); the return
/// leg from `C` is 9.0 miles.
pub(super) fn triangle_distances() -> Value {
    json!({
        DEFAULT_DEPOT_ADDRESS: { "A": 2.0, "B": "5.0", "C": 9 },
        "A": { "B": 4.0, "C": 6.0 },
        "B": { "C": "3" },
    })
}

/// Three packages that one truck clears in a single 9 mile trip.
pub(super) fn three_packages() -> Value {
    json!({
        "1": { "address": "A", "city": "Salt Lake City", "state": "UT",
               "zip": "84115", "deadline": "10:30", "kg": 2 },
        "2": { "address": "B", "city": "Salt Lake City", "state": "UT",
               "zip": 84115, "deadline": "17:00", "kg": 5 },
        "4": { "address": "C", "city": "Salt Lake City", "state": "UT",
               "zip": "84115", "deadline": "17:00", "kg": 1 },
    })
}

/// Temporary directory holding one dataset.
pub(super) struct DatasetDir {
    _dir: TempDir,
    root: Utf8PathBuf,
}

impl DatasetDir {
    pub(super) fn new() -> Self {
        let dir = TempDir::new().expect("tempdir");
        let root = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).expect("utf-8 workspace");
        Self { _dir: dir, root }
    }

    /// Directory with [`three_packages`] and [`triangle_distances`] written.
    pub(super) fn triangle() -> Self {
        let dataset = Self::new();
        dataset.write_packages(&three_packages());
        dataset.write_distances(&triangle_distances());
        dataset
    }

    pub(super) fn packages(&self) -> Utf8PathBuf {
        self.root.join("packages.json")
    }

    pub(super) fn distances(&self) -> Utf8PathBuf {
        self.root.join("distances.json")
    }

    pub(super) fn depot_config(&self) -> Utf8PathBuf {
        self.root.join("depot.json")
    }

    pub(super) fn prompts(&self) -> Utf8PathBuf {
        self.root.join("prompts.json")
    }

    pub(super) fn write_packages(&self, value: &Value) {
        write_json(&self.packages(), value);
    }

    pub(super) fn write_distances(&self, value: &Value) {
        write_json(&self.distances(), value);
    }

    pub(super) fn write_depot_config(&self, value: &Value) {
        write_json(&self.depot_config(), value);
    }

    pub(super) fn write_prompts(&self, value: &Value) {
        write_json(&self.prompts(), value);
    }

    pub(super) fn session_args(&self) -> SessionArgs {
        SessionArgs {
            packages: Some(self.packages()),
            distances: Some(self.distances()),
            ..SessionArgs::default()
        }
    }

    pub(super) fn report_args(&self) -> ReportArgs {
        ReportArgs {
            packages: Some(self.packages()),
            distances: Some(self.distances()),
            ..ReportArgs::default()
        }
    }
}

fn write_json(path: &Utf8Path, value: &Value) {
    let payload = serde_json::to_vec_pretty(value).expect("serialise fixture");
    write_utf8(path, &payload);
}

/// Run a session over `script` and return everything it printed.
pub(super) fn run_scripted_session(
    args: SessionArgs,
    script: &(impl AsRef<[u8]> + ?Sized),
) -> (Result<(), CliError>, String) {
    let mut input = script.as_ref();
    let mut output = Vec::new();
    let result = run_session_with(args, &mut input, &mut output);
    let printed = String::from_utf8(output).expect("session output utf-8");
    (result, printed)
}
