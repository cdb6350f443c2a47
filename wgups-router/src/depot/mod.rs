//! The hub that splits packages into trips and sends trucks out.
//!
//! Each call to [`Depot::deliver_packages`] simulates the whole day from
//! scratch on a working copy of the packages. Stored packages only change
//! when every trip succeeds.

use wgups_core::{DistanceTable, Package, PackageTable, Table, TruckId};

use crate::config::DepotConfig;
use crate::error::{ConfigError, RoutingError};
use crate::summary::{DispatchSummary, TripReport};
use crate::truck::Truck;

/// Orchestrates trucks, packages and distances for a day of deliveries.
///
/// # Examples
/// ```
/// use wgups_core::{Address, Clock, DistanceTable, Package, PackageTable};
/// use wgups_router::{Depot, DepotConfig};
///
/// let mut distances = DistanceTable::new("Hub");
/// distances.insert_symmetric("Hub", "1 Main St", 3.0);
/// let address = Address::new("1 Main St", "Salt Lake City", "UT", "84111");
/// let packages: PackageTable = [Package::new(1, address, 2, Clock::END_OF_DAY)]
///     .into_iter()
///     .collect();
///
/// let mut depot = Depot::new(distances, packages, DepotConfig::default())?;
/// let summary = depot.deliver_packages()?;
/// assert_eq!(summary.trips.len(), 1);
/// assert_eq!(
///     depot.package(1).and_then(Package::delivery_time),
///     Some(Clock::new(8, 10))
/// );
/// # Ok::<(), wgups_router::RoutingError>(())
/// ```
#[derive(Debug, Clone)]
pub struct Depot {
    distances: DistanceTable,
    packages: PackageTable,
    config: DepotConfig,
    trucks: Vec<Truck>,
    overrides: Table<u32, TruckId>,
    last_summary: Option<DispatchSummary>,
}

impl Depot {
    /// Create a depot after validating `config` against `distances`.
    ///
    /// # Errors
    /// Returns [`RoutingError::InvalidConfig`] when the configuration is
    /// rejected by [`DepotConfig::validate`].
    pub fn new(
        distances: DistanceTable,
        packages: PackageTable,
        config: DepotConfig,
    ) -> Result<Self, RoutingError> {
        config.validate(&distances)?;
        let trucks = config
            .trucks
            .iter()
            .map(|id| Truck::with_limits(*id, config.truck_capacity, config.truck_speed_mph))
            .collect();
        let overrides = config
            .truck_overrides
            .iter()
            .map(|pin| (pin.package, pin.truck))
            .collect();
        Ok(Self {
            distances,
            packages,
            config,
            trucks,
            overrides,
            last_summary: None,
        })
    }

    /// Distance table used for routing.
    #[must_use]
    pub const fn distances(&self) -> &DistanceTable {
        &self.distances
    }

    /// Packages with the timestamps of the last successful run.
    #[must_use]
    pub const fn packages(&self) -> &PackageTable {
        &self.packages
    }

    /// Look up a package by id.
    #[must_use]
    pub fn package(&self, id: u32) -> Option<&Package> {
        self.packages.get(id)
    }

    /// Configuration the depot was built with.
    #[must_use]
    pub const fn config(&self) -> &DepotConfig {
        &self.config
    }

    /// Trucks in dispatch order.
    #[must_use]
    pub fn trucks(&self) -> &[Truck] {
        &self.trucks
    }

    /// Summary of the last successful run.
    #[must_use]
    pub const fn last_summary(&self) -> Option<&DispatchSummary> {
        self.last_summary.as_ref()
    }

    /// Simulate the day and deliver every package.
    ///
    /// Packages are split into high-priority (ordered by deadline, then
    /// distance from the hub) and regular (ordered by distance from the hub).
    /// Trip `i` uses truck `i % trucks` and the `i`-th scheduled departure,
    /// loading eligible high-priority packages before regular ones. Trucks
    /// return to the hub while packages remain.
    ///
    /// Running again re-simulates from scratch and produces the same result.
    ///
    /// # Errors
    /// Returns [`RoutingError::ScheduleExhausted`] when packages remain after
    /// the last scheduled departure and [`RoutingError::Distance`] when a
    /// route needs an unknown distance. Stored packages are left unchanged
    /// and every truck is unloaded on failure.
    pub fn deliver_packages(&mut self) -> Result<&DispatchSummary, RoutingError> {
        match self.simulate() {
            Ok((packages, summary)) => {
                log::info!(
                    "delivered {} packages over {} trips and {:.2} miles",
                    packages.len(),
                    summary.trips.len(),
                    summary.total_distance
                );
                self.packages = packages;
                Ok(self.last_summary.insert(summary))
            }
            Err(err) => {
                for truck in &mut self.trucks {
                    let stranded = truck.unload_all();
                    if !stranded.is_empty() {
                        log::warn!(
                            "unloading {} packages from truck {} after a failed run",
                            stranded.len(),
                            truck.id()
                        );
                    }
                }
                Err(err)
            }
        }
    }

    fn simulate(&mut self) -> Result<(PackageTable, DispatchSummary), RoutingError> {
        let (mut high, mut regular) = self.priority_queues()?;
        let mut delivered = PackageTable::with_capacity(self.packages.len());
        let mut summary = DispatchSummary::default();
        let scheduled = self.config.departure_schedule.len();
        let fleet = self.trucks.len();

        let mut trip = 0;
        while !(high.is_empty() && regular.is_empty()) {
            let departure = *self
                .config
                .departure_schedule
                .get(trip)
                .ok_or(RoutingError::ScheduleExhausted { trip, scheduled })?;
            let truck = self
                .trucks
                .get_mut(trip.rem_euclid(fleet.max(1)))
                .ok_or(ConfigError::NoTrucks)?;

            truck.depart_at(departure);
            load_eligible(truck, &mut high, &self.overrides);
            load_eligible(truck, &mut regular, &self.overrides);
            let loaded = truck.len();
            let return_to_depot = !(high.is_empty() && regular.is_empty());
            let outcome = truck.deliver_packages(&self.distances, return_to_depot)?;
            log::info!(
                "trip {trip}: truck {} left at {departure} with {loaded} packages, drove {:.2} miles",
                truck.id(),
                outcome.distance
            );

            summary.total_distance = add_miles(summary.total_distance, outcome.distance);
            for package in outcome.delivered {
                delivered.insert(package);
            }
            summary.trips.push(TripReport {
                trip,
                truck: truck.id(),
                departure,
                finished_at: outcome.finished_at,
                returned_to_depot: outcome.returned_to_depot,
                distance: outcome.distance,
                stops: outcome.stops,
            });
            trip += 1;
        }
        Ok((delivered, summary))
    }

    /// Split fresh copies of the packages into sorted high-priority and
    /// regular queues. Packages pinned to a truck count as high priority.
    fn priority_queues(&self) -> Result<(Vec<Package>, Vec<Package>), RoutingError> {
        let mut high = Vec::new();
        let mut regular = Vec::new();
        for stored in self.packages.all() {
            let mut package = stored.clone();
            package.reset();
            let miles = self.distances.to_depot(package.street())?;
            if package.is_high_priority() || self.overrides.contains_key(&package.id()) {
                high.push((package, miles));
            } else {
                regular.push((package, miles));
            }
        }
        high.sort_by(|(a, a_miles), (b, b_miles)| {
            a.deadline()
                .cmp(&b.deadline())
                .then_with(|| a_miles.total_cmp(b_miles))
        });
        regular.sort_by(|(_, a_miles), (_, b_miles)| a_miles.total_cmp(b_miles));
        Ok((
            high.into_iter().map(|(package, _)| package).collect(),
            regular.into_iter().map(|(package, _)| package).collect(),
        ))
    }
}

/// Move packages the truck may carry from `queue` onto `truck` until it is
/// full, keeping the order of what is left behind.
fn load_eligible(truck: &mut Truck, queue: &mut Vec<Package>, overrides: &Table<u32, TruckId>) {
    let mut index = 0;
    while index < queue.len() && !truck.is_full() {
        if queue
            .get(index)
            .is_some_and(|package| is_eligible(truck, package, overrides))
        {
            truck.load_package(queue.remove(index));
        } else {
            index += 1;
        }
    }
}

/// Pinned packages ride only their truck and skip the arrival check.
fn is_eligible(truck: &Truck, package: &Package, overrides: &Table<u32, TruckId>) -> bool {
    overrides
        .get(&package.id())
        .map_or_else(|| truck.can_deliver(package), |pinned| *pinned == truck.id())
}

#[expect(clippy::float_arithmetic, reason = "dispatch distance accumulates miles")]
fn add_miles(total: f64, miles: f64) -> f64 {
    total + miles
}

#[cfg(test)]
mod tests;
