//! Core domain types for the WGUPS routing engine.
//!
//! The crate provides the value types shared by the dispatcher and the CLI:
//! a wrapping [`Clock`], the open-addressing [`Table`] used for every keyed
//! collection, [`Package`] with its time-derived status, and the read-only
//! [`DistanceTable`].

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod clock;
pub mod distance;
pub mod package;
mod package_table;
pub mod table;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use clock::{Clock, ClockParseError};
pub use distance::{DEFAULT_DEPOT_ADDRESS, DistanceError, DistanceTable};
pub use package::{
    Address, DeliveryReport, InlineReport, Package, PackageStatus, TruckId, TruckSet,
};
pub use package_table::PackageTable;
pub use table::{Slot, Table};
