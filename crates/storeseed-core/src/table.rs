use std::fmt;

use serde::{Deserialize, Serialize};

/// Tables written by a seeding run, in dependency order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Table {
    Clients,
    Categories,
    Products,
    Reviews,
    Orders,
    ProductOrderRelations,
    Reports,
}

impl Table {
    pub const ALL: [Table; 7] = [
        Table::Clients,
        Table::Categories,
        Table::Products,
        Table::Reviews,
        Table::Orders,
        Table::ProductOrderRelations,
        Table::Reports,
    ];

    /// Storage name of the table.
    pub fn as_str(self) -> &'static str {
        match self {
            Table::Clients => "Clients",
            Table::Categories => "Categories",
            Table::Products => "Products",
            Table::Reviews => "Reviews",
            Table::Orders => "Orders",
            Table::ProductOrderRelations => "ProductOrderRelations",
            Table::Reports => "Reports",
        }
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A row type that belongs to one seeded table.
///
/// Tables keyed by a database sequence receive their id from the store when a
/// batch is written; `assign_id` is a no-op for the others.
pub trait Record: Clone + Send + Sync + 'static {
    const TABLE: Table;

    fn assign_id(&mut self, _id: i32) {}
}
