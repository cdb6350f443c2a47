//! Deterministic fixtures shared by unit, behaviour and property tests.

use crate::{Address, Clock, DistanceTable, Package, PackageTable, TruckId, TruckSet};

/// Hub address used by every fixture.
pub const HUB: &str = crate::DEFAULT_DEPOT_ADDRESS;

/// Streets on the fixture city map with planar coordinates in miles.
pub const CITY_STREETS: [(&str, f64, f64); 8] = [
    ("195 W Oakland Ave", 1.0, 2.0),
    ("2530 S 500 E", 3.0, 1.0),
    ("233 Canyon Rd", -2.0, 3.5),
    ("380 W 2880 S", 4.5, -1.0),
    ("410 S State St", -1.5, -2.5),
    ("3060 Lester St", 6.0, 2.5),
    ("1330 2100 S", -4.0, 1.0),
    ("300 State St", 2.0, 5.0),
];

/// Build a Salt Lake City address on `street`.
#[must_use]
pub fn address(street: &str) -> Address {
    Address::new(street, "Salt Lake City", "UT", "84115")
}

/// Build a package bound for `street` with the given deadline.
#[must_use]
pub fn package(id: u32, street: &str, deadline: Clock) -> Package {
    Package::new(id, address(street), 2, deadline)
}

/// Hub plus three streets with hand-picked distances.
///
/// From the hub the greedy route is `A` (2.0), `B` (4.0), `C` (3.0), and the
/// return leg from `C` is 9.0 miles.
#[must_use]
pub fn triangle_distances() -> DistanceTable {
    let mut table = DistanceTable::new(HUB);
    table.insert_symmetric(HUB, "A", 2.0);
    table.insert_symmetric(HUB, "B", 5.0);
    table.insert_symmetric(HUB, "C", 9.0);
    table.insert_symmetric("A", "B", 4.0);
    table.insert_symmetric("A", "C", 6.0);
    table.insert_symmetric("B", "C", 3.0);
    for street in [HUB, "A", "B", "C"] {
        table.insert(street, street, 0.0);
    }
    table
}

/// Symmetric distances between the hub and [`CITY_STREETS`], rounded to a
/// tenth of a mile.
#[must_use]
#[expect(
    clippy::float_arithmetic,
    reason = "fixture distances derive from planar coordinates"
)]
pub fn city_distances() -> DistanceTable {
    let points: Vec<(&str, f64, f64)> = std::iter::once((HUB, 0.0, 0.0))
        .chain(CITY_STREETS)
        .collect();
    let mut table = DistanceTable::new(HUB);
    for &(from, from_x, from_y) in &points {
        for &(to, to_x, to_y) in &points {
            let miles = (to_x - from_x).hypot(to_y - from_y);
            table.insert(from, to, (miles * 10.0).round() / 10.0);
        }
    }
    table
}

/// Twenty packages spread over [`CITY_STREETS`].
///
/// Packages 3 and 18 may only travel on truck 2, packages 6 and 12 reach the
/// hub at 09:05, and packages 13 to 15 form a linked group.
#[must_use]
pub fn twenty_packages() -> PackageTable {
    let truck_two = TruckSet::Only(vec![TruckId::new(2)]);
    (1..=20_u32)
        .map(|id| {
            let street_index = usize::try_from(id)
                .unwrap_or_default()
                .rem_euclid(CITY_STREETS.len());
            let street = CITY_STREETS
                .get(street_index)
                .map_or(HUB, |(street, _, _)| *street);
            let deadline = match id {
                1 | 13 | 20 => Clock::new(10, 30),
                4 | 15 => Clock::new(9, 0),
                _ => Clock::END_OF_DAY,
            };
            let parcel = package(id, street, deadline);
            match id {
                3 | 18 => parcel
                    .with_allowed_trucks(truck_two.clone())
                    .with_priority(true),
                6 | 12 => parcel.with_arrival_time(Clock::new(9, 5)),
                13..=15 => parcel.with_linked(true).with_priority(true),
                _ => parcel,
            }
        })
        .collect()
}
