//! Packages and their time-dependent delivery status.
//!
//! A [`Package`] never stores a live status. Pickup and delivery events record
//! timestamps, and [`Package::status_at`] derives the status for any query
//! time, so reports can be produced for any moment of the day after the
//! simulation has run.

use std::fmt;

use crate::Clock;

/// Identifier of a delivery truck.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(transparent)
)]
pub struct TruckId(u32);

impl TruckId {
    /// Wrap a raw truck number.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// The raw truck number.
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0
    }
}

impl fmt::Display for TruckId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Trucks permitted to carry a package.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum TruckSet {
    /// Any truck in the fleet.
    #[default]
    Any,
    /// Only the listed trucks.
    Only(Vec<TruckId>),
}

impl TruckSet {
    /// Whether `truck` belongs to the set.
    #[must_use]
    pub fn permits(&self, truck: TruckId) -> bool {
        match self {
            Self::Any => true,
            Self::Only(trucks) => trucks.contains(&truck),
        }
    }
}

/// Destination of a package.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Address {
    /// Street line; also the key into the distance table.
    pub street: String,
    /// City name.
    pub city: String,
    /// State abbreviation.
    pub state: String,
    /// Postal code.
    pub zip: String,
}

impl Address {
    /// Construct an address from its parts.
    pub fn new(
        street: impl Into<String>,
        city: impl Into<String>,
        state: impl Into<String>,
        zip: impl Into<String>,
    ) -> Self {
        Self {
            street: street.into(),
            city: city.into(),
            state: state.into(),
            zip: zip.into(),
        }
    }
}

/// Delivery status of a package at a point in time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PackageStatus {
    /// Still at the hub, or not yet arrived there.
    AwaitingDelivery,
    /// Loaded onto a truck.
    OnTruck,
    /// Handed to the recipient.
    Delivered,
}

impl PackageStatus {
    /// Return the status in its report spelling.
    ///
    /// # Examples
    /// ```
    /// use wgups_core::PackageStatus;
    ///
    /// assert_eq!(PackageStatus::OnTruck.as_str(), "ON_TRUCK");
    /// ```
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::AwaitingDelivery => "AWAITING_DELIVERY",
            Self::OnTruck => "ON_TRUCK",
            Self::Delivered => "DELIVERED",
        }
    }
}

impl fmt::Display for PackageStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A unit of delivery.
///
/// # Examples
/// ```
/// use wgups_core::{Address, Clock, Package, PackageStatus};
///
/// let address = Address::new("1060 Dalton Ave S", "Salt Lake City", "UT", "84104");
/// let mut package = Package::new(1, address, 5, Clock::new(10, 30));
/// package.pickup(Clock::new(8, 5));
/// package.deliver(Clock::new(9, 40));
///
/// assert_eq!(package.status_at(Clock::new(8, 0)), PackageStatus::AwaitingDelivery);
/// assert_eq!(package.status_at(Clock::new(8, 30)), PackageStatus::OnTruck);
/// assert_eq!(package.status_at(Clock::new(10, 0)), PackageStatus::Delivered);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Package {
    id: u32,
    address: Address,
    weight: u32,
    deadline: Clock,
    arrival_time: Clock,
    pickup_time: Option<Clock>,
    delivery_time: Option<Clock>,
    allowed_trucks: TruckSet,
    priority: bool,
    linked: bool,
}

impl Package {
    /// Create a package available at the hub from the start of the day.
    #[must_use]
    pub fn new(id: u32, address: Address, weight: u32, deadline: Clock) -> Self {
        Self {
            id,
            address,
            weight,
            deadline,
            arrival_time: Clock::START_OF_DAY,
            pickup_time: None,
            delivery_time: None,
            allowed_trucks: TruckSet::Any,
            priority: false,
            linked: false,
        }
    }

    /// Set the time the package reaches the hub.
    #[must_use]
    pub fn with_arrival_time(mut self, arrival_time: Clock) -> Self {
        self.arrival_time = arrival_time;
        self
    }

    /// Restrict the trucks allowed to carry the package.
    #[must_use]
    pub fn with_allowed_trucks(mut self, allowed_trucks: TruckSet) -> Self {
        self.allowed_trucks = allowed_trucks;
        self
    }

    /// Mark the package as explicitly high priority.
    #[must_use]
    pub fn with_priority(mut self, priority: bool) -> Self {
        self.priority = priority;
        self
    }

    /// Mark the package as belonging to a linked group.
    #[must_use]
    pub fn with_linked(mut self, linked: bool) -> Self {
        self.linked = linked;
        self
    }

    /// Replace the destination, e.g. after an address correction.
    pub fn set_address(&mut self, address: Address) {
        self.address = address;
    }

    /// Unique identifier.
    #[must_use]
    pub const fn id(&self) -> u32 {
        self.id
    }

    /// Destination address.
    #[must_use]
    pub const fn address(&self) -> &Address {
        &self.address
    }

    /// Street line used for distance lookups.
    #[must_use]
    pub fn street(&self) -> &str {
        &self.address.street
    }

    /// Weight in kilograms.
    #[must_use]
    pub const fn weight(&self) -> u32 {
        self.weight
    }

    /// Latest acceptable delivery time.
    #[must_use]
    pub const fn deadline(&self) -> Clock {
        self.deadline
    }

    /// Time the package becomes available at the hub.
    #[must_use]
    pub const fn arrival_time(&self) -> Clock {
        self.arrival_time
    }

    /// Time the package was loaded, if it has been.
    #[must_use]
    pub const fn pickup_time(&self) -> Option<Clock> {
        self.pickup_time
    }

    /// Time the package was delivered, if it has been.
    #[must_use]
    pub const fn delivery_time(&self) -> Option<Clock> {
        self.delivery_time
    }

    /// Trucks permitted to carry the package.
    #[must_use]
    pub const fn allowed_trucks(&self) -> &TruckSet {
        &self.allowed_trucks
    }

    /// Whether the package was flagged priority explicitly.
    #[must_use]
    pub const fn is_priority(&self) -> bool {
        self.priority
    }

    /// Whether the package belongs to a linked group.
    ///
    /// Grouping is recorded but not enforced by the dispatcher.
    #[must_use]
    pub const fn is_linked(&self) -> bool {
        self.linked
    }

    /// Record the package being loaded at `time`.
    pub fn pickup(&mut self, time: Clock) {
        self.pickup_time = Some(time);
    }

    /// Record the package being delivered at `time`.
    pub fn deliver(&mut self, time: Clock) {
        debug_assert!(
            self.pickup_time.is_none_or(|pickup| pickup <= time),
            "package {} delivered before pickup",
            self.id
        );
        self.delivery_time = Some(time);
    }

    /// Forget pickup and delivery times ahead of a fresh simulation.
    pub fn reset(&mut self) {
        self.pickup_time = None;
        self.delivery_time = None;
    }

    /// Whether the package was delivered by its deadline.
    #[must_use]
    pub fn on_time(&self) -> Option<bool> {
        self.delivery_time
            .map(|delivered| delivered <= self.deadline)
    }

    /// Whether the package must be scheduled ahead of regular traffic.
    #[must_use]
    pub fn is_high_priority(&self) -> bool {
        self.deadline < Clock::END_OF_DAY || self.priority
    }

    /// Status of the package as seen at `time`.
    #[must_use]
    pub fn status_at(&self, time: Clock) -> PackageStatus {
        if self.delivery_time.is_some_and(|delivered| time > delivered) {
            PackageStatus::Delivered
        } else if self.pickup_time.is_some_and(|picked| time > picked) {
            PackageStatus::OnTruck
        } else {
            PackageStatus::AwaitingDelivery
        }
    }

    /// One row of the comprehensive report as seen at `time`.
    #[must_use]
    pub fn delivery_report(&self, time: Clock) -> DeliveryReport {
        let status = self.status_at(time);
        let (pickup_time, delivery_time, on_time) = match status {
            PackageStatus::Delivered => (self.pickup_time, self.delivery_time, self.on_time()),
            PackageStatus::OnTruck => (self.pickup_time, None, None),
            PackageStatus::AwaitingDelivery => (None, None, None),
        };
        DeliveryReport {
            id: self.id,
            status,
            pickup_time,
            delivery_time,
            on_time,
        }
    }

    /// Detailed single-package report as seen at `time`.
    #[must_use]
    pub fn inline_report(&self, time: Clock) -> InlineReport<'_> {
        InlineReport {
            package: self,
            status: self.status_at(time),
        }
    }
}

/// Status row for one package, with timestamps hidden until reached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeliveryReport {
    /// Package identifier.
    pub id: u32,
    /// Status at the query time.
    pub status: PackageStatus,
    /// Pickup time, once the package is on a truck.
    pub pickup_time: Option<Clock>,
    /// Delivery time, once the package is delivered.
    pub delivery_time: Option<Clock>,
    /// Whether the delivery met the deadline, once delivered.
    pub on_time: Option<bool>,
}

impl DeliveryReport {
    /// The report as labelled columns.
    #[must_use]
    pub fn columns(&self) -> [String; 5] {
        [
            format!("Package={}", self.id),
            format!("Status={}", self.status),
            format!("Pickup Time={}", or_not_applicable(self.pickup_time)),
            format!("Delivery Time={}", or_not_applicable(self.delivery_time)),
            format!("On Time={}", or_not_applicable(self.on_time)),
        ]
    }
}

impl fmt::Display for DeliveryReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.columns().join(" "))
    }
}

fn or_not_applicable<T: fmt::Display>(value: Option<T>) -> String {
    value.map_or_else(|| "N/A".to_owned(), |inner| inner.to_string())
}

/// Detailed view of a single package.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InlineReport<'a> {
    package: &'a Package,
    status: PackageStatus,
}

impl InlineReport<'_> {
    /// Status at the query time.
    #[must_use]
    pub const fn status(&self) -> PackageStatus {
        self.status
    }
}

impl fmt::Display for InlineReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let package = self.package;
        let address = package.address();
        writeln!(f, "Details:")?;
        writeln!(f, "\tId={}", package.id())?;
        writeln!(f, "\tStreet={}", address.street)?;
        writeln!(f, "\tCity={}", address.city)?;
        writeln!(f, "\tState={}", address.state)?;
        writeln!(f, "\tZip Code={}", address.zip)?;
        writeln!(f, "\tWeight={}", package.weight())?;
        writeln!(f, "\tDeadline={}", package.deadline())?;
        write!(f, "\tDelivery Status={}", self.status)
    }
}
