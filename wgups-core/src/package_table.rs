//! Packages indexed by identifier.

use crate::{Package, Table};

/// Every package of the day, keyed by id.
///
/// # Examples
/// ```
/// use wgups_core::{Address, Clock, Package, PackageTable};
///
/// let address = Address::new("1 Main St", "Salt Lake City", "UT", "84111");
/// let mut packages = PackageTable::new();
/// packages.insert(Package::new(4, address.clone(), 2, Clock::END_OF_DAY));
/// packages.insert(Package::new(1, address, 3, Clock::END_OF_DAY));
///
/// let ids: Vec<u32> = packages.all().iter().map(|package| package.id()).collect();
/// assert_eq!(ids, vec![1, 4]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct PackageTable {
    packages: Table<u32, Package>,
}

impl PackageTable {
    /// Create an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty table sized for `capacity` packages.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            packages: Table::with_capacity(capacity),
        }
    }

    /// Insert or replace a package under its own id.
    pub fn insert(&mut self, package: Package) -> bool {
        self.packages.set(package.id(), package)
    }

    /// Look up a package by id.
    #[must_use]
    pub fn get(&self, id: u32) -> Option<&Package> {
        self.packages.get(&id)
    }

    /// Look up a package by id for mutation.
    pub fn get_mut(&mut self, id: u32) -> Option<&mut Package> {
        self.packages.get_mut(&id)
    }

    /// Whether a package with `id` exists.
    #[must_use]
    pub fn contains(&self, id: u32) -> bool {
        self.packages.contains_key(&id)
    }

    /// All packages ordered by id.
    #[must_use]
    pub fn all(&self) -> Vec<&Package> {
        let mut packages: Vec<&Package> = self.packages.values().collect();
        packages.sort_by_key(|package| package.id());
        packages
    }

    /// Iterate mutably over packages in table order.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Package> {
        self.packages.values_mut()
    }

    /// Number of packages.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.packages.len()
    }

    /// Whether the table holds no packages.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.packages.is_empty()
    }
}

impl FromIterator<Package> for PackageTable {
    fn from_iter<I: IntoIterator<Item = Package>>(iter: I) -> Self {
        let mut table = Self::new();
        for package in iter {
            table.insert(package);
        }
        table
    }
}
