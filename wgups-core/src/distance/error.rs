use thiserror::Error;

/// Errors from [`DistanceTable`](super::DistanceTable) lookups.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DistanceError {
    /// The starting address has no row in the table.
    #[error("the address {address} was not found in the city map")]
    UnknownOrigin {
        /// Address that was looked up.
        address: String,
    },
    /// The destination has no entry in the starting address's row.
    #[error("the address {address} was not found in the city map (from {origin})")]
    UnknownDestination {
        /// Row that was searched.
        origin: String,
        /// Address that was looked up.
        address: String,
    },
}
