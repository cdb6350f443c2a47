//! Error types raised while dispatching deliveries.

use thiserror::Error;
use wgups_core::{DistanceError, TruckId};

/// Errors returned by [`Depot`](crate::Depot) operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RoutingError {
    /// A distance lookup failed while sorting or routing packages.
    #[error(transparent)]
    Distance(#[from] DistanceError),
    /// More trips were needed than the departure schedule provides.
    #[error("trip {trip} has no departure slot; the schedule lists {scheduled} departures")]
    ScheduleExhausted {
        /// Zero-based index of the trip that could not depart.
        trip: usize,
        /// Number of departures in the schedule.
        scheduled: usize,
    },
    /// The depot configuration was rejected.
    #[error("invalid depot configuration: {0}")]
    InvalidConfig(#[from] ConfigError),
}

/// Reasons a [`DepotConfig`](crate::DepotConfig) is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// No trucks were configured.
    #[error("at least one truck is required")]
    NoTrucks,
    /// The same truck id was listed twice.
    #[error("truck {0} is listed more than once")]
    DuplicateTruck(TruckId),
    /// No departure times were configured.
    #[error("the departure schedule is empty")]
    EmptySchedule,
    /// Trucks cannot carry anything.
    #[error("truck capacity must be at least one package")]
    ZeroCapacity,
    /// Trucks cannot move.
    #[error("truck speed must be a positive number of miles per hour")]
    NonPositiveSpeed,
    /// A package is pinned to a truck that is not in the fleet.
    #[error("package {package} is pinned to truck {truck}, which is not in the fleet")]
    UnknownOverrideTruck {
        /// Pinned package.
        package: u32,
        /// Truck it is pinned to.
        truck: TruckId,
    },
    /// The hub address is missing from the distance table.
    #[error("depot address {0} is missing from the distance table")]
    DepotNotInTable(String),
}
