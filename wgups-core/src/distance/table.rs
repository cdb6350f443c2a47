//! Nested-table storage for pairwise distances.

use crate::Table;

use super::error::DistanceError;

/// Street address of the hub every route starts from.
pub const DEFAULT_DEPOT_ADDRESS: &str = "4001 South 700 East";

/// Miles between pairs of addresses, keyed by street line.
///
/// Rows are stored as `Table<String, Table<String, f64>>`. The table is
/// expected to be symmetric; [`DistanceTable::insert_symmetric`] keeps it so.
///
/// # Examples
/// ```
/// use wgups_core::DistanceTable;
///
/// let mut distances = DistanceTable::new("Hub");
/// distances.insert_symmetric("Hub", "1 Main St", 2.5);
/// assert_eq!(distances.distance("1 Main St", "Hub"), Ok(2.5));
/// assert_eq!(distances.to_depot("1 Main St"), Ok(2.5));
/// assert!(distances.distance("Hub", "Nowhere").is_err());
/// ```
#[derive(Debug, Clone)]
pub struct DistanceTable {
    depot_address: String,
    rows: Table<String, Table<String, f64>>,
}

impl DistanceTable {
    /// Create an empty table whose routes start at `depot_address`.
    #[must_use]
    pub fn new(depot_address: impl Into<String>) -> Self {
        Self {
            depot_address: depot_address.into(),
            rows: Table::new(),
        }
    }

    /// Build a table from `(from, [(to, miles)])` rows.
    pub fn from_rows<R, C>(depot_address: impl Into<String>, rows: R) -> Self
    where
        R: IntoIterator<Item = (String, C)>,
        C: IntoIterator<Item = (String, f64)>,
    {
        let mut table = Self::new(depot_address);
        for (from, columns) in rows {
            for (to, miles) in columns {
                table.insert(from.clone(), to, miles);
            }
        }
        table
    }

    /// Record the distance from `from` to `to`.
    ///
    /// Distances must be non-negative and finite.
    pub fn insert(&mut self, from: impl Into<String>, to: impl Into<String>, miles: f64) {
        debug_assert!(
            miles.is_finite() && miles >= 0.0,
            "distances must be non-negative and finite"
        );
        let origin = from.into();
        if let Some(row) = self.rows.get_mut(&origin) {
            row.set(to.into(), miles);
        } else {
            let mut row = Table::new();
            row.set(to.into(), miles);
            self.rows.set(origin, row);
        }
    }

    /// Record the same distance in both directions.
    pub fn insert_symmetric(&mut self, a: impl Into<String>, b: impl Into<String>, miles: f64) {
        let (first, second) = (a.into(), b.into());
        self.insert(first.clone(), second.clone(), miles);
        self.insert(second, first, miles);
    }

    /// Address of the hub.
    #[must_use]
    pub fn depot_address(&self) -> &str {
        &self.depot_address
    }

    /// Whether `address` has a row in the table.
    #[must_use]
    pub fn contains(&self, address: &str) -> bool {
        self.rows.contains_key(address)
    }

    /// Every address with a row, in table scan order.
    pub fn addresses(&self) -> impl Iterator<Item = &str> {
        self.rows.keys().map(String::as_str)
    }

    /// Number of addresses with a row.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table has no rows.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Miles from `from` to `to`.
    ///
    /// An address is zero miles from itself even when the diagonal was not
    /// supplied, provided the address has a row.
    ///
    /// # Errors
    /// Returns [`DistanceError::UnknownOrigin`] when `from` has no row and
    /// [`DistanceError::UnknownDestination`] when the row lacks `to`.
    pub fn distance(&self, from: &str, to: &str) -> Result<f64, DistanceError> {
        let row = self
            .rows
            .get(from)
            .ok_or_else(|| DistanceError::UnknownOrigin {
                address: from.to_owned(),
            })?;
        match row.get(to) {
            Some(miles) => Ok(*miles),
            None if from == to => Ok(0.0),
            None => Err(DistanceError::UnknownDestination {
                origin: from.to_owned(),
                address: to.to_owned(),
            }),
        }
    }

    /// Miles between the hub and `address`.
    ///
    /// # Errors
    /// Propagates [`DistanceTable::distance`] lookup failures.
    pub fn to_depot(&self, address: &str) -> Result<f64, DistanceError> {
        self.distance(&self.depot_address, address)
    }
}

impl Default for DistanceTable {
    fn default() -> Self {
        Self::new(DEFAULT_DEPOT_ADDRESS)
    }
}
