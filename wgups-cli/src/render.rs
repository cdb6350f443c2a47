//! Text rendering shared by the session and the `report` command.

use wgups_core::{Package, PackageTable};
use wgups_router::DispatchSummary;

use crate::input::QueryTime;

/// Status of every package at `time`, one padded row per package.
pub(crate) fn comprehensive_report(packages: &PackageTable, time: &QueryTime) -> String {
    let rows: Vec<[String; 5]> = packages
        .all()
        .into_iter()
        .map(|package| package.delivery_report(time.clock()).columns())
        .collect();
    let width = rows
        .iter()
        .flat_map(|row| row.iter().map(String::len))
        .max()
        .unwrap_or_default()
        .saturating_add(2);

    let mut out = format!("\nWGUPS Comprehensive Package Report\n\nTime: {time}\n\n");
    for row in &rows {
        for column in row {
            out.push_str(&format!("{column:<width$}"));
        }
        out.push('\n');
    }
    out.push_str("\n\n");
    out
}

/// Details of a single package at `time`.
pub(crate) fn individual_report(package: &Package, time: &QueryTime) -> String {
    format!(
        "\nWGUPS Individual Package Report\n\nPackage: {}\nTime: {time}\n{}\n\n\n",
        package.id(),
        package.inline_report(time.clock())
    )
}

/// Total miles driven by the fleet.
pub(crate) fn distance_message(summary: &DispatchSummary) -> String {
    format!(
        "\nThe total distance traveled by the WGUPS was {:.2} miles.\n\n",
        summary.total_distance
    )
}

/// One line per trip with its truck, times and stops.
pub(crate) fn trip_overview(summary: &DispatchSummary) -> String {
    let mut out = String::from("\nWGUPS Trip Overview\n\n");
    for trip in &summary.trips {
        out.push_str(&format!(
            "Trip {}: truck {} {}-{} {:.2} miles, {} stops, {} packages\n",
            trip.trip.saturating_add(1),
            trip.truck,
            trip.departure,
            trip.finished_at,
            trip.distance,
            trip.stops.len(),
            trip.package_ids().count()
        ));
    }
    out.push('\n');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::parse_query_time;
    use rstest::{fixture, rstest};
    use wgups_core::{Address, Clock};

    #[fixture]
    fn packages() -> PackageTable {
        let address = Address::new("195 W Oakland Ave", "Salt Lake City", "UT", "84115");
        let mut delivered = Package::new(12, address.clone(), 21, Clock::new(10, 30));
        delivered.pickup(Clock::new(8, 0));
        delivered.deliver(Clock::new(8, 45));
        [delivered, Package::new(3, address, 2, Clock::END_OF_DAY)]
            .into_iter()
            .collect()
    }

    #[rstest]
    fn comprehensive_report_pads_columns(packages: PackageTable) {
        let time = parse_query_time("09:00:00").expect("valid time");
        let report = comprehensive_report(&packages, &time);
        assert!(report.starts_with("\nWGUPS Comprehensive Package Report\n\nTime: 09:00:00\n\n"));

        let rows: Vec<&str> = report
            .lines()
            .filter(|line| line.starts_with("Package="))
            .collect();
        assert_eq!(rows.len(), 2);
        let first = rows.first().copied().unwrap_or_default();
        assert!(first.starts_with("Package=3 "));
        assert!(first.contains("Status=AWAITING_DELIVERY"));
        let second = rows.get(1).copied().unwrap_or_default();
        assert!(second.contains("Delivery Time=08:45"));
        assert_eq!(first.len(), second.len());
    }

    #[rstest]
    fn individual_report_lists_details(packages: PackageTable) {
        let time = parse_query_time("08:30:00").expect("valid time");
        let package = packages.get(12).expect("package 12");
        let report = individual_report(package, &time);
        assert!(report.contains("Package: 12\nTime: 08:30:00\nDetails:\n\tId=12\n"));
        assert!(report.contains("\tDelivery Status=ON_TRUCK"));
    }

    #[rstest]
    fn distance_uses_two_decimals() {
        let summary = DispatchSummary {
            total_distance: 97.456,
            trips: Vec::new(),
        };
        assert_eq!(
            distance_message(&summary),
            "\nThe total distance traveled by the WGUPS was 97.46 miles.\n\n"
        );
    }
}
