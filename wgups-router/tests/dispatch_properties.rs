//! Property-based tests for `Depot` dispatch.
//!
//! Random package sets are spread over the fixture city with enough
//! departures that every run completes.
//!
//! # Invariants tested
//!
//! - **Completion:** every package is delivered exactly once.
//! - **Capacity:** no trip carries more than the truck capacity.
//! - **Causality:** pickup never precedes arrival and delivery never precedes
//!   pickup.
//! - **Accounting:** total distance equals the sum of trip distances.
//! - **Determinism:** a second run reproduces the first.

#![expect(
    clippy::expect_used,
    reason = "property tests use expect for readable failures"
)]

use std::collections::HashSet;

use proptest::prelude::*;
use wgups_core::test_support::{CITY_STREETS, city_distances, package};
use wgups_core::{Clock, Package, PackageTable};
use wgups_router::{Depot, DepotConfig};

/// One departure per hour from 08:00 to 17:00.
fn hourly_config() -> DepotConfig {
    DepotConfig {
        departure_schedule: (8..=17).map(|hour| Clock::new(hour, 0)).collect(),
        truck_overrides: Vec::new(),
        ..DepotConfig::default()
    }
}

fn package_strategy(id: u32) -> impl Strategy<Value = Package> {
    (
        0..CITY_STREETS.len(),
        prop_oneof![
            Just(Clock::END_OF_DAY),
            Just(Clock::new(9, 0)),
            Just(Clock::new(10, 30)),
        ],
        prop_oneof![Just(Clock::START_OF_DAY), Just(Clock::new(9, 5))],
        any::<bool>(),
    )
        .prop_map(move |(street, deadline, arrival, priority)| {
            let (name, _, _) = CITY_STREETS.get(street).copied().expect("index in range");
            package(id, name, deadline)
                .with_arrival_time(arrival)
                .with_priority(priority)
        })
}

fn package_set_strategy() -> impl Strategy<Value = PackageTable> {
    (1_u32..=40).prop_flat_map(|count| {
        (1..=count)
            .map(package_strategy)
            .collect::<Vec<_>>()
            .prop_map(|packages| packages.into_iter().collect::<PackageTable>())
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn every_package_is_delivered_once(packages in package_set_strategy()) {
        let expected = packages.len();
        let mut depot = Depot::new(city_distances(), packages, hourly_config())
            .expect("configuration is valid");
        let summary = depot.deliver_packages().expect("run succeeds").clone();

        let mut seen = HashSet::new();
        for trip in &summary.trips {
            prop_assert!(trip.package_ids().count() <= 16);
            for id in trip.package_ids() {
                prop_assert!(seen.insert(id), "package {} delivered twice", id);
            }
        }
        prop_assert_eq!(seen.len(), expected);

        for delivered in depot.packages().all() {
            let pickup = delivered.pickup_time().expect("picked up");
            let delivery = delivered.delivery_time().expect("delivered");
            prop_assert!(pickup >= delivered.arrival_time());
            prop_assert!(delivery >= pickup);
        }
    }

    #[test]
    #[expect(clippy::float_arithmetic, reason = "compares summed miles")]
    fn total_distance_matches_trips(packages in package_set_strategy()) {
        let mut depot = Depot::new(city_distances(), packages, hourly_config())
            .expect("configuration is valid");
        let summary = depot.deliver_packages().expect("run succeeds");
        let trips: f64 = summary.trips.iter().map(|trip| trip.distance).sum();
        prop_assert!((summary.total_distance - trips).abs() < 1e-6);
    }

    #[test]
    fn rerun_reproduces_summary(packages in package_set_strategy()) {
        let mut depot = Depot::new(city_distances(), packages, hourly_config())
            .expect("configuration is valid");
        let first = depot.deliver_packages().expect("first run").clone();
        let second = depot.deliver_packages().expect("second run").clone();
        prop_assert_eq!(first, second);
    }
}
