//! Road distances between serviced addresses.
//!
//! [`DistanceTable`] answers "how many miles from A to B" for every address
//! the hub serves, including the hub itself. Lookups fail with
//! [`DistanceError`] when either address is missing from the table.

mod error;
mod table;

pub use error::DistanceError;
pub use table::{DEFAULT_DEPOT_ADDRESS, DistanceTable};
