//! Greedy dispatcher for the WGUPS routing engine.
//!
//! A [`Depot`] owns the day's packages, the [`DistanceTable`](wgups_core::DistanceTable)
//! and a fleet of [`Truck`]s. It sorts packages into high-priority and regular
//! queues, fills one truck per scheduled departure, and lets each truck drive
//! a nearest-neighbour route that stamps pickup and delivery times.
//!
//! The fleet, the departure schedule and any per-package truck pins come from
//! [`DepotConfig`], whose defaults describe the Salt Lake City hub.

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

mod config;
mod depot;
mod error;
mod summary;
mod truck;

pub use config::{DEFAULT_CAPACITY, DEFAULT_SPEED_MPH, DepotConfig, TruckOverride};
pub use depot::Depot;
pub use error::{ConfigError, RoutingError};
pub use summary::{DispatchSummary, TripReport};
pub use truck::{Stop, TripOutcome, Truck};
