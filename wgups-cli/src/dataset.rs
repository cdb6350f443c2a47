//! Loading packages, distances and depot settings from JSON files.
//!
//! Packages are an object keyed by decimal id:
//!
//! ```json
//! { "9": { "address": "300 State St", "city": "Salt Lake City", "state": "UT",
//!          "zip": "84103", "deadline": "17:00", "kg": 2,
//!          "correction": { "address": "410 S State St", "zip": "84111", "at": "10:20" } } }
//! ```
//!
//! Optional fields are `arrival` (`HH:MM`, default 08:00), `trucks` (ids
//! allowed to carry the package), `priority`, `linked` and `correction`.
//! Linked packages and packages restricted to particular trucks are always
//! treated as priority.
//!
//! Distances are an object of objects, `{ "from": { "to": miles } }`, with
//! miles given as numbers or numeric strings. Each pair needs to appear only
//! once; entries are mirrored so the table is symmetric.

use std::collections::BTreeMap;
use std::io::BufReader;

use camino::{Utf8Path, Utf8PathBuf};
use cap_std::{ambient_authority, fs_utf8};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use wgups_core::{
    Address, Clock, DEFAULT_DEPOT_ADDRESS, DistanceTable, Package, PackageTable, TruckId,
    TruckSet,
};
use wgups_router::{Depot, DepotConfig};

use crate::{ARG_DEPOT_CONFIG, ARG_DISTANCES, ARG_PACKAGES, CliError};

/// Paths of the files that make up a dataset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct DatasetPaths {
    /// Package file.
    pub(crate) packages: Utf8PathBuf,
    /// Distance file.
    pub(crate) distances: Utf8PathBuf,
    /// Optional depot configuration file.
    pub(crate) depot_config: Option<Utf8PathBuf>,
}

/// Everything needed to build a [`Depot`].
#[derive(Debug, Clone)]
pub(crate) struct Dataset {
    pub(crate) distances: DistanceTable,
    pub(crate) packages: PackageTable,
    pub(crate) config: DepotConfig,
}

impl Dataset {
    /// Read and convert every file named in `paths`.
    pub(crate) fn load(paths: &DatasetPaths) -> Result<Self, CliError> {
        let settings = match &paths.depot_config {
            Some(path) => read_json::<DepotSettings>(path, ARG_DEPOT_CONFIG)?,
            None => DepotSettings::default(),
        };
        let depot_address = settings
            .depot_address
            .unwrap_or_else(|| DEFAULT_DEPOT_ADDRESS.to_owned());
        let distances = distance_table(
            depot_address,
            read_json::<DistanceFile>(&paths.distances, ARG_DISTANCES)?,
        )?;
        let packages = package_table(
            &paths.packages,
            read_json::<PackageFile>(&paths.packages, ARG_PACKAGES)?,
        )?;
        log::debug!(
            "loaded {} packages and {} addresses",
            packages.len(),
            distances.len()
        );
        Ok(Self {
            distances,
            packages,
            config: settings.depot,
        })
    }

    /// Build a depot from the dataset and run the day's deliveries.
    pub(crate) fn dispatch(self) -> Result<Depot, CliError> {
        let mut depot = Depot::new(self.distances, self.packages, self.config)?;
        depot.deliver_packages()?;
        Ok(depot)
    }
}

type PackageFile = BTreeMap<String, PackageRecord>;
type DistanceFile = BTreeMap<String, BTreeMap<String, Miles>>;

/// Depot configuration file: the router settings plus the hub address.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct DepotSettings {
    depot_address: Option<String>,
    #[serde(flatten)]
    depot: DepotConfig,
}

#[derive(Debug, Deserialize)]
struct PackageRecord {
    address: String,
    city: String,
    state: String,
    zip: ZipCode,
    deadline: Clock,
    kg: u32,
    #[serde(default)]
    arrival: Option<Clock>,
    #[serde(default)]
    trucks: Option<Vec<TruckId>>,
    #[serde(default)]
    priority: bool,
    #[serde(default)]
    linked: bool,
    #[serde(default)]
    correction: Option<AddressCorrection>,
}

/// A wrong address that the hub only learns the fix for at `at`.
#[derive(Debug, Deserialize)]
struct AddressCorrection {
    address: String,
    #[serde(default)]
    zip: Option<ZipCode>,
    at: Clock,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ZipCode {
    Text(String),
    Number(u64),
}

impl From<ZipCode> for String {
    fn from(zip: ZipCode) -> Self {
        match zip {
            ZipCode::Text(text) => text,
            ZipCode::Number(number) => number.to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Miles {
    Number(f64),
    Text(String),
}

impl PackageRecord {
    fn into_package(self, id: u32) -> Package {
        let mut address = Address::new(self.address, self.city, self.state, self.zip);
        let mut arrival = self.arrival.unwrap_or(Clock::START_OF_DAY);
        if let Some(correction) = self.correction {
            address.street = correction.address;
            if let Some(zip) = correction.zip {
                address.zip = zip.into();
            }
            arrival = arrival.max(correction.at);
        }
        let pinned = self.trucks.is_some();
        let allowed = self.trucks.map_or(TruckSet::Any, TruckSet::Only);
        Package::new(id, address, self.kg, self.deadline)
            .with_arrival_time(arrival)
            .with_allowed_trucks(allowed)
            .with_priority(self.priority || self.linked || pinned)
            .with_linked(self.linked)
    }
}

fn package_table(path: &Utf8Path, file: PackageFile) -> Result<PackageTable, CliError> {
    let mut packages = PackageTable::with_capacity(file.len());
    for (key, record) in file {
        let id = key
            .trim()
            .parse::<u32>()
            .map_err(|_| CliError::InvalidPackageKey {
                path: path.to_path_buf(),
                key: key.clone(),
            })?;
        packages.insert(record.into_package(id));
    }
    Ok(packages)
}

fn distance_table(depot_address: String, file: DistanceFile) -> Result<DistanceTable, CliError> {
    let mut distances = DistanceTable::new(depot_address);
    for (from, row) in file {
        for (to, value) in row {
            let miles = parse_miles(&from, &to, value)?;
            distances.insert_symmetric(from.clone(), to, miles);
        }
    }
    Ok(distances)
}

fn parse_miles(from: &str, to: &str, value: Miles) -> Result<f64, CliError> {
    let (miles, raw) = match value {
        Miles::Number(number) => (Some(number), number.to_string()),
        Miles::Text(text) => (text.trim().parse::<f64>().ok(), text),
    };
    miles
        .filter(|number| number.is_finite() && *number >= 0.0)
        .ok_or_else(|| CliError::InvalidDistance {
            from: from.to_owned(),
            to: to.to_owned(),
            value: raw,
        })
}

/// Open `path` with ambient authority and decode it as JSON.
pub(crate) fn read_json<T: DeserializeOwned>(
    path: &Utf8Path,
    field: &'static str,
) -> Result<T, CliError> {
    let file = fs_utf8::File::open_ambient(path, ambient_authority()).map_err(|source| {
        if source.kind() == std::io::ErrorKind::NotFound {
            CliError::MissingSourceFile {
                field,
                path: path.to_path_buf(),
            }
        } else {
            CliError::OpenSource {
                field,
                path: path.to_path_buf(),
                source,
            }
        }
    })?;
    serde_json::from_reader(BufReader::new(file)).map_err(|source| CliError::ParseSource {
        field,
        path: path.to_path_buf(),
        source,
    })
}
