//! Tests for [`Depot`].

use super::*;
use crate::config::TruckOverride;
use rstest::{fixture, rstest};
use wgups_core::test_support::{city_distances, package, triangle_distances, twenty_packages};
use wgups_core::{Clock, PackageStatus};

#[fixture]
fn depot() -> Depot {
    Depot::new(city_distances(), twenty_packages(), DepotConfig::default())
        .expect("default configuration is valid")
}

fn single_truck(capacity: usize, departures: &[Clock]) -> DepotConfig {
    DepotConfig {
        trucks: vec![TruckId::new(1)],
        truck_capacity: capacity,
        departure_schedule: departures.to_vec(),
        truck_overrides: Vec::new(),
        ..DepotConfig::default()
    }
}

#[rstest]
fn every_package_is_delivered(mut depot: Depot) {
    depot.deliver_packages().expect("run succeeds");
    let end_of_day = Clock::new(23, 59);
    assert!(
        depot
            .packages()
            .all()
            .iter()
            .all(|package| package.status_at(end_of_day) == PackageStatus::Delivered)
    );
    assert_eq!(depot.packages().len(), 20);
}

#[rstest]
fn first_trip_fills_truck_one(mut depot: Depot) {
    let summary = depot.deliver_packages().expect("run succeeds");
    assert_eq!(summary.trips.len(), 2);
    let first = summary.trips.first().expect("first trip");
    assert_eq!(first.truck, TruckId::new(1));
    assert_eq!(first.departure, Clock::new(8, 0));
    assert_eq!(first.package_ids().count(), 16);
    assert!(first.returned_to_depot);

    let second = summary.trips.get(1).expect("second trip");
    assert_eq!(second.truck, TruckId::new(2));
    assert_eq!(second.departure, Clock::new(9, 5));
    let mut ids: Vec<u32> = second.package_ids().collect();
    ids.sort_unstable();
    assert_eq!(ids, vec![3, 6, 12, 18]);
    assert!(!second.returned_to_depot);
}

#[rstest]
fn pinned_packages_ride_truck_two(mut depot: Depot) {
    let summary = depot.deliver_packages().expect("run succeeds").clone();
    for id in [3, 18] {
        assert_eq!(summary.truck_for(id), Some(TruckId::new(2)));
    }
}

#[rstest]
fn delayed_packages_leave_after_arrival(mut depot: Depot) {
    depot.deliver_packages().expect("run succeeds");
    for id in [6, 12] {
        let pickup = depot.package(id).and_then(Package::pickup_time);
        assert!(pickup.is_some_and(|time| time >= Clock::new(9, 5)));
    }
}

#[rstest]
#[expect(clippy::float_arithmetic, reason = "sums trip miles for comparison")]
fn total_distance_sums_trips(mut depot: Depot) {
    let summary = depot.deliver_packages().expect("run succeeds");
    let trips: f64 = summary.trips.iter().map(|trip| trip.distance).sum();
    assert!((summary.total_distance - trips).abs() < 1e-9);
    assert!(summary.total_distance > 0.0);
}

#[rstest]
fn rerunning_is_idempotent(mut depot: Depot) {
    let first = depot.deliver_packages().expect("first run").clone();
    let second = depot.deliver_packages().expect("second run").clone();
    assert_eq!(first, second);
    assert_eq!(depot.last_summary(), Some(&second));
}

#[rstest]
fn high_priority_leaves_first() {
    let packages: PackageTable = [
        package(1, "A", Clock::END_OF_DAY),
        package(2, "C", Clock::new(10, 30)),
    ]
    .into_iter()
    .collect();
    let config = single_truck(1, &[Clock::new(8, 0), Clock::new(9, 0)]);
    let mut depot = Depot::new(triangle_distances(), packages, config).expect("valid config");

    let summary = depot.deliver_packages().expect("run succeeds").clone();
    assert_eq!(summary.trip_for(2).map(|trip| trip.trip), Some(0));
    assert_eq!(summary.trip_for(1).map(|trip| trip.trip), Some(1));
    assert_eq!(depot.package(2).and_then(Package::delivery_time), Some(Clock::new(8, 30)));
    assert_eq!(depot.package(1).and_then(Package::delivery_time), Some(Clock::new(9, 7)));
    assert_eq!(summary.finished_at(), Some(Clock::new(9, 7)));
}

#[rstest]
fn pinned_packages_join_the_priority_queue() {
    let packages: PackageTable = [
        package(1, "A", Clock::END_OF_DAY),
        package(2, "C", Clock::END_OF_DAY),
    ]
    .into_iter()
    .collect();
    let config = DepotConfig {
        truck_overrides: vec![TruckOverride {
            package: 2,
            truck: TruckId::new(1),
        }],
        ..single_truck(1, &[Clock::new(8, 0), Clock::new(9, 0)])
    };
    let mut depot = Depot::new(triangle_distances(), packages, config).expect("valid config");

    let summary = depot.deliver_packages().expect("run succeeds");
    // Without the pin, the nearer package 1 would leave first.
    assert_eq!(summary.trip_for(2).map(|trip| trip.trip), Some(0));
    assert_eq!(summary.trip_for(1).map(|trip| trip.trip), Some(1));
}

#[rstest]
fn exhausted_schedule_leaves_packages_untouched() {
    let packages: PackageTable = [
        package(1, "A", Clock::END_OF_DAY),
        package(2, "B", Clock::END_OF_DAY).with_arrival_time(Clock::new(11, 0)),
    ]
    .into_iter()
    .collect();
    let config = single_truck(16, &[Clock::new(8, 0), Clock::new(9, 0)]);
    let mut depot = Depot::new(triangle_distances(), packages, config).expect("valid config");

    let err = depot.deliver_packages().expect_err("package 2 never fits a departure");
    assert_eq!(err, RoutingError::ScheduleExhausted { trip: 2, scheduled: 2 });
    assert!(depot.last_summary().is_none());
    assert!(depot.trucks().iter().all(Truck::is_empty));
    assert!(
        depot
            .packages()
            .all()
            .iter()
            .all(|package| package.pickup_time().is_none())
    );
}

#[rstest]
fn unknown_address_is_a_distance_error() {
    let packages: PackageTable = [package(1, "Nowhere", Clock::END_OF_DAY)]
        .into_iter()
        .collect();
    let mut depot =
        Depot::new(triangle_distances(), packages, DepotConfig::default()).expect("valid config");
    let err = depot.deliver_packages().expect_err("no distance to Nowhere");
    assert!(matches!(err, RoutingError::Distance(_)));
}

#[rstest]
fn empty_depot_runs_no_trips() {
    let mut depot = Depot::new(
        triangle_distances(),
        PackageTable::new(),
        DepotConfig::default(),
    )
    .expect("valid config");
    let summary = depot.deliver_packages().expect("nothing to deliver");
    assert!(summary.trips.is_empty());
    assert_eq!(summary.finished_at(), None);
}

#[rstest]
fn invalid_config_is_rejected() {
    let config = DepotConfig {
        departure_schedule: Vec::new(),
        ..DepotConfig::default()
    };
    let err = Depot::new(triangle_distances(), PackageTable::new(), config)
        .expect_err("schedule is empty");
    assert_eq!(err, RoutingError::InvalidConfig(ConfigError::EmptySchedule));
}

/// Linked packages are flagged priority, but nothing keeps them together:
/// with room for two per trip, a group of three is split across trips.
#[rstest]
fn linked_packages_may_split_across_trips() {
    let packages: PackageTable = (1..=3)
        .map(|id| {
            package(id, "B", Clock::END_OF_DAY)
                .with_linked(true)
                .with_priority(true)
        })
        .collect();
    let config = single_truck(2, &[Clock::new(8, 0), Clock::new(9, 0)]);
    let mut depot = Depot::new(triangle_distances(), packages, config).expect("valid config");

    let summary = depot.deliver_packages().expect("run succeeds");
    let trips: Vec<Option<usize>> = (1..=3)
        .map(|id| summary.trip_for(id).map(|trip| trip.trip))
        .collect();
    assert_eq!(trips, vec![Some(0), Some(0), Some(1)]);
}
