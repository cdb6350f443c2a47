//! A delivery truck and its greedy nearest-neighbour route.
//!
//! A [`Truck`] is reused across trips. Between trips only its departure time
//! and loaded packages change.

use wgups_core::{Clock, DistanceError, DistanceTable, Package, TruckId};

use crate::config::{DEFAULT_CAPACITY, DEFAULT_SPEED_MPH};

/// One stop on a completed route.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Stop {
    /// Street address visited.
    pub address: String,
    /// Time the truck reached the address.
    pub arrival: Clock,
    /// Miles driven from the previous stop.
    pub miles: f64,
    /// Ids of the packages dropped off here, in load order.
    pub packages: Vec<u32>,
}

/// Result of [`Truck::deliver_packages`].
#[derive(Debug, Clone, PartialEq)]
pub struct TripOutcome {
    /// Miles driven, including the return leg when requested.
    pub distance: f64,
    /// Stops in the order they were visited.
    pub stops: Vec<Stop>,
    /// The delivered packages with pickup and delivery times recorded.
    pub delivered: Vec<Package>,
    /// Time the truck finished, back at the depot if it returned.
    pub finished_at: Clock,
    /// Whether the route ended with a leg back to the depot.
    pub returned_to_depot: bool,
}

/// A truck with a fixed capacity and average speed.
///
/// # Examples
/// ```
/// use wgups_core::{Address, Clock, DistanceTable, Package, TruckId};
/// use wgups_router::Truck;
///
/// let mut distances = DistanceTable::new("Hub");
/// distances.insert_symmetric("Hub", "1 Main St", 9.0);
///
/// let mut truck = Truck::new(TruckId::new(1));
/// truck.depart_at(Clock::new(8, 0));
/// let address = Address::new("1 Main St", "Salt Lake City", "UT", "84111");
/// truck.load_package(Package::new(7, address, 2, Clock::END_OF_DAY));
///
/// let outcome = truck.deliver_packages(&distances, false)?;
/// assert_eq!(outcome.finished_at, Clock::new(8, 30));
/// assert!(truck.is_empty());
/// # Ok::<(), wgups_core::DistanceError>(())
/// ```
#[derive(Debug, Clone)]
pub struct Truck {
    id: TruckId,
    capacity: usize,
    speed_mph: f64,
    departure_time: Clock,
    packages: Vec<Package>,
}

impl Truck {
    /// Create a truck with the default capacity and speed.
    #[must_use]
    pub fn new(id: TruckId) -> Self {
        Self::with_limits(id, DEFAULT_CAPACITY, DEFAULT_SPEED_MPH)
    }

    /// Create a truck carrying at most `capacity` packages at `speed_mph`.
    #[must_use]
    pub fn with_limits(id: TruckId, capacity: usize, speed_mph: f64) -> Self {
        debug_assert!(
            speed_mph.is_finite() && speed_mph > 0.0,
            "truck speed must be positive"
        );
        Self {
            id,
            capacity,
            speed_mph,
            departure_time: Clock::START_OF_DAY,
            packages: Vec::with_capacity(capacity),
        }
    }

    /// Truck identifier.
    #[must_use]
    pub const fn id(&self) -> TruckId {
        self.id
    }

    /// Maximum number of packages per trip.
    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// Average speed in miles per hour.
    #[must_use]
    pub const fn speed_mph(&self) -> f64 {
        self.speed_mph
    }

    /// Departure time of the current trip.
    #[must_use]
    pub const fn departure_time(&self) -> Clock {
        self.departure_time
    }

    /// Packages currently on board, in load order.
    #[must_use]
    pub fn packages(&self) -> &[Package] {
        &self.packages
    }

    /// Number of packages on board.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.packages.len()
    }

    /// Whether the truck is empty.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.packages.is_empty()
    }

    /// Whether this truck may carry `package` on its current trip.
    ///
    /// The truck must be in the package's allowed set and must not leave
    /// before the package reaches the hub.
    #[must_use]
    pub fn can_deliver(&self, package: &Package) -> bool {
        package.allowed_trucks().permits(self.id) && self.departure_time >= package.arrival_time()
    }

    /// Whether the truck is at capacity.
    #[must_use]
    pub const fn is_full(&self) -> bool {
        self.packages.len() >= self.capacity
    }

    /// Whether `count` more packages fit.
    #[must_use]
    pub const fn can_load(&self, count: usize) -> bool {
        self.packages.len().saturating_add(count) <= self.capacity
    }

    /// Whether package `id` is on board.
    #[must_use]
    pub fn has_package(&self, id: u32) -> bool {
        self.packages.iter().any(|package| package.id() == id)
    }

    /// Distinct destination streets on board, in first-loaded order.
    #[must_use]
    pub fn destinations(&self) -> Vec<&str> {
        let mut streets: Vec<&str> = Vec::new();
        for package in &self.packages {
            if !streets.contains(&package.street()) {
                streets.push(package.street());
            }
        }
        streets
    }

    /// Set the departure time of the next trip.
    pub const fn depart_at(&mut self, time: Clock) {
        self.departure_time = time;
    }

    /// Load `package`, stamping its pickup with the departure time.
    ///
    /// Callers check [`Truck::is_full`] or [`Truck::can_load`] first.
    pub fn load_package(&mut self, mut package: Package) {
        debug_assert!(!self.is_full(), "truck {} overfilled", self.id);
        if self.is_full() {
            log::warn!(
                "truck {} loading package {} beyond capacity {}",
                self.id,
                package.id(),
                self.capacity
            );
        }
        package.pickup(self.departure_time);
        self.packages.push(package);
    }

    /// Drop every loaded package without delivering it.
    pub fn unload_all(&mut self) -> Vec<Package> {
        std::mem::take(&mut self.packages)
    }

    /// Drive the loaded packages out using a nearest-neighbour route.
    ///
    /// The truck leaves the hub at its departure time and repeatedly drives to
    /// the closest remaining destination, ties going to the destination loaded
    /// first. Every package for that street is delivered on arrival. When
    /// `return_to_depot` is set the final leg back to the hub is included.
    ///
    /// # Errors
    /// Returns [`DistanceError`] when a leg is missing from `distances`. The
    /// loaded packages stay on the truck in that case.
    pub fn deliver_packages(
        &mut self,
        distances: &DistanceTable,
        return_to_depot: bool,
    ) -> Result<TripOutcome, DistanceError> {
        let RoutePlan { legs, return_leg } = self.plan_route(distances, return_to_depot)?;
        let mut remaining = std::mem::take(&mut self.packages);
        let mut delivered = Vec::with_capacity(remaining.len());
        let mut stops = Vec::with_capacity(legs.len());
        let mut now = self.departure_time;
        let mut distance = 0.0;

        for (street, miles) in legs {
            now = now.add_minutes(travel_minutes(miles, self.speed_mph));
            distance = add_miles(distance, miles);
            let (arrived, pending): (Vec<Package>, Vec<Package>) = remaining
                .into_iter()
                .partition(|package| package.street() == street.as_str());
            remaining = pending;
            let ids: Vec<u32> = arrived.iter().map(Package::id).collect();
            log::debug!(
                "truck {} reached {street} at {now} after {miles} miles with {ids:?}",
                self.id
            );
            for mut package in arrived {
                package.deliver(now);
                delivered.push(package);
            }
            stops.push(Stop {
                address: street,
                arrival: now,
                miles,
                packages: ids,
            });
        }

        if let Some(miles) = return_leg {
            now = now.add_minutes(travel_minutes(miles, self.speed_mph));
            distance = add_miles(distance, miles);
            log::debug!("truck {} back at the hub at {now}", self.id);
        }

        Ok(TripOutcome {
            distance,
            stops,
            delivered,
            finished_at: now,
            returned_to_depot: return_leg.is_some(),
        })
    }

    /// Plan the visiting order, and the optional leg home, without touching
    /// any package.
    fn plan_route(
        &self,
        distances: &DistanceTable,
        return_to_depot: bool,
    ) -> Result<RoutePlan, DistanceError> {
        let mut pending = self.destinations();
        let mut legs = Vec::with_capacity(pending.len());
        let mut current = distances.depot_address();

        while !pending.is_empty() {
            let mut nearest: Option<(usize, f64)> = None;
            for (index, street) in pending.iter().enumerate() {
                let miles = distances.distance(current, street)?;
                if nearest.is_none_or(|(_, best)| miles < best) {
                    nearest = Some((index, miles));
                }
            }
            let Some((index, miles)) = nearest else {
                break;
            };
            let street = pending.remove(index);
            legs.push((street.to_owned(), miles));
            current = street;
        }

        let return_leg = if return_to_depot && !legs.is_empty() {
            Some(distances.distance(current, distances.depot_address())?)
        } else {
            None
        };
        Ok(RoutePlan { legs, return_leg })
    }
}

/// Ordered legs of a trip, planned before any package changes hands.
struct RoutePlan {
    legs: Vec<(String, f64)>,
    return_leg: Option<f64>,
}

/// Whole minutes needed to drive `miles` at `speed_mph`, rounding halves to
/// even.
#[expect(
    clippy::float_arithmetic,
    clippy::cast_possible_truncation,
    reason = "travel time is derived from miles and speed; routes span minutes, not years"
)]
fn travel_minutes(miles: f64, speed_mph: f64) -> i64 {
    (miles / speed_mph * 60.0).round_ties_even() as i64
}

#[expect(clippy::float_arithmetic, reason = "route distance accumulates miles")]
fn add_miles(total: f64, miles: f64) -> f64 {
    total + miles
}
