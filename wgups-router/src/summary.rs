//! Records describing a completed dispatch run.

use wgups_core::{Clock, TruckId};

use crate::truck::Stop;

/// One trip of a dispatch run.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TripReport {
    /// Zero-based trip index.
    pub trip: usize,
    /// Truck that drove the trip.
    pub truck: TruckId,
    /// Scheduled departure.
    pub departure: Clock,
    /// Time the truck finished.
    pub finished_at: Clock,
    /// Whether the truck drove back to the hub afterwards.
    pub returned_to_depot: bool,
    /// Miles driven on this trip.
    pub distance: f64,
    /// Stops in visiting order.
    pub stops: Vec<Stop>,
}

impl TripReport {
    /// Ids of every package delivered on this trip, in drop-off order.
    pub fn package_ids(&self) -> impl Iterator<Item = u32> + '_ {
        self.stops
            .iter()
            .flat_map(|stop| stop.packages.iter().copied())
    }
}

/// Outcome of [`Depot::deliver_packages`](crate::Depot::deliver_packages).
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DispatchSummary {
    /// Miles driven across every trip.
    pub total_distance: f64,
    /// Trips in dispatch order.
    pub trips: Vec<TripReport>,
}

impl DispatchSummary {
    /// Trip that delivered package `id`.
    #[must_use]
    pub fn trip_for(&self, id: u32) -> Option<&TripReport> {
        self.trips
            .iter()
            .find(|trip| trip.package_ids().any(|delivered| delivered == id))
    }

    /// Truck that delivered package `id`.
    #[must_use]
    pub fn truck_for(&self, id: u32) -> Option<TruckId> {
        self.trip_for(id).map(|trip| trip.truck)
    }

    /// Time the last truck finished, if any trip ran.
    #[must_use]
    pub fn finished_at(&self) -> Option<Clock> {
        self.trips.iter().map(|trip| trip.finished_at).max()
    }
}
