//! Facade crate for the WGUPS routing engine.
//!
//! This crate re-exports the core domain types and the greedy dispatcher so
//! downstream code can depend on a single crate.
//!
//! ```
//! use wgups_engine::{Clock, Depot, DepotConfig, DistanceTable, Package, PackageTable};
//! use wgups_engine::Address;
//!
//! let mut distances = DistanceTable::new("Hub");
//! distances.insert_symmetric("Hub", "1 Main St", 3.0);
//! let packages: PackageTable = [Package::new(
//!     1,
//!     Address::new("1 Main St", "Salt Lake City", "UT", "84111"),
//!     2,
//!     Clock::END_OF_DAY,
//! )]
//! .into_iter()
//! .collect();
//!
//! let mut depot = Depot::new(distances, packages, DepotConfig::default())?;
//! let summary = depot.deliver_packages()?;
//! assert_eq!(summary.trips.len(), 1);
//! assert_eq!(depot.package(1).and_then(|p| p.delivery_time()), Some(Clock::new(8, 10)));
//! # Ok::<(), wgups_engine::RoutingError>(())
//! ```

#![forbid(unsafe_code)]

pub use wgups_core::{
    Address, Clock, ClockParseError, DEFAULT_DEPOT_ADDRESS, DeliveryReport, DistanceError,
    DistanceTable, InlineReport, Package, PackageStatus, PackageTable, Table, TruckId, TruckSet,
};

pub use wgups_router::{
    ConfigError, DEFAULT_CAPACITY, DEFAULT_SPEED_MPH, Depot, DepotConfig, DispatchSummary,
    RoutingError, Stop, TripOutcome, TripReport, Truck, TruckOverride,
};

#[cfg(feature = "test-support")]
pub use wgups_core::test_support;
