//! Fleet and scheduling configuration for the [`Depot`](crate::Depot).
//!
//! The defaults reproduce the daily plan of the Salt Lake City hub: two
//! trucks carrying sixteen packages at eighteen miles per hour, departures at
//! 08:00 (first truck), 09:05 (after the delayed flight lands) and 10:20
//! (after the mis-addressed package is corrected), and four packages that may
//! only ride truck 2.

use wgups_core::{Clock, DistanceTable, TruckId};

use crate::error::ConfigError;

/// Packages per truck unless configured otherwise.
pub const DEFAULT_CAPACITY: usize = 16;
/// Average truck speed in miles per hour unless configured otherwise.
pub const DEFAULT_SPEED_MPH: f64 = 18.0;

/// Pins a package to a single truck regardless of arrival time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TruckOverride {
    /// Pinned package id.
    pub package: u32,
    /// Only truck allowed to carry it.
    pub truck: TruckId,
}

/// Configuration supplied to [`Depot::new`](crate::Depot::new).
///
/// # Examples
/// ```
/// use wgups_core::{Clock, TruckId};
/// use wgups_router::DepotConfig;
///
/// let config = DepotConfig::default();
/// assert_eq!(config.trucks, vec![TruckId::new(1), TruckId::new(2)]);
/// assert_eq!(config.departure_schedule.first(), Some(&Clock::new(8, 0)));
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct DepotConfig {
    /// Trucks in dispatch order; trip `i` uses `trucks[i % trucks.len()]`.
    pub trucks: Vec<TruckId>,
    /// Packages each truck can carry per trip.
    pub truck_capacity: usize,
    /// Average speed in miles per hour.
    pub truck_speed_mph: f64,
    /// Departure time of each trip, in trip order.
    pub departure_schedule: Vec<Clock>,
    /// Packages pinned to a specific truck.
    pub truck_overrides: Vec<TruckOverride>,
}

impl Default for DepotConfig {
    fn default() -> Self {
        let truck_two = TruckId::new(2);
        Self {
            trucks: vec![TruckId::new(1), truck_two],
            truck_capacity: DEFAULT_CAPACITY,
            truck_speed_mph: DEFAULT_SPEED_MPH,
            departure_schedule: vec![Clock::new(8, 0), Clock::new(9, 5), Clock::new(10, 20)],
            truck_overrides: [3, 18, 36, 38]
                .into_iter()
                .map(|package| TruckOverride {
                    package,
                    truck: truck_two,
                })
                .collect(),
        }
    }
}

impl DepotConfig {
    /// Check the configuration against itself and the distance table.
    ///
    /// # Errors
    /// Returns the first [`ConfigError`] rule the configuration breaks.
    pub fn validate(&self, distances: &DistanceTable) -> Result<(), ConfigError> {
        if self.trucks.is_empty() {
            return Err(ConfigError::NoTrucks);
        }
        for (index, truck) in self.trucks.iter().enumerate() {
            if self.trucks.iter().skip(index + 1).any(|other| other == truck) {
                return Err(ConfigError::DuplicateTruck(*truck));
            }
        }
        if self.departure_schedule.is_empty() {
            return Err(ConfigError::EmptySchedule);
        }
        if self.truck_capacity == 0 {
            return Err(ConfigError::ZeroCapacity);
        }
        if !(self.truck_speed_mph.is_finite() && self.truck_speed_mph > 0.0) {
            return Err(ConfigError::NonPositiveSpeed);
        }
        if let Some(pin) = self
            .truck_overrides
            .iter()
            .find(|pin| !self.trucks.contains(&pin.truck))
        {
            return Err(ConfigError::UnknownOverrideTruck {
                package: pin.package,
                truck: pin.truck,
            });
        }
        if !distances.contains(distances.depot_address()) {
            return Err(ConfigError::DepotNotInTable(
                distances.depot_address().to_owned(),
            ));
        }
        Ok(())
    }
}
