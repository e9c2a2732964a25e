use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use storeseed_core::Table;

use crate::errors::GenerationError;

/// Menu entry chosen by the operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Selection {
    Clients,
    Categories,
    Products,
    Reviews,
    Orders,
    Reports,
    All,
}

/// One generation step, in the order a full run executes them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Step {
    Clients,
    Categories,
    Products,
    Reviews,
    /// Orders followed by their product relations.
    Orders,
    Reports,
}

impl Step {
    pub const ALL: [Step; 6] = [
        Step::Clients,
        Step::Categories,
        Step::Products,
        Step::Reviews,
        Step::Orders,
        Step::Reports,
    ];

    pub fn table(self) -> Table {
        match self {
            Step::Clients => Table::Clients,
            Step::Categories => Table::Categories,
            Step::Products => Table::Products,
            Step::Reviews => Table::Reviews,
            Step::Orders => Table::Orders,
            Step::Reports => Table::Reports,
        }
    }
}

impl Selection {
    /// Menu entries in display order.
    pub const MENU: [Selection; 7] = [
        Selection::Clients,
        Selection::Categories,
        Selection::Products,
        Selection::Reviews,
        Selection::Orders,
        Selection::Reports,
        Selection::All,
    ];

    pub fn key(self) -> u8 {
        match self {
            Selection::Clients => 1,
            Selection::Categories => 2,
            Selection::Products => 3,
            Selection::Reviews => 4,
            Selection::Orders => 5,
            Selection::Reports => 6,
            Selection::All => 7,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Selection::Clients => "Clients",
            Selection::Categories => "Categories",
            Selection::Products => "Products",
            Selection::Reviews => "Reviews",
            Selection::Orders => "Orders",
            Selection::Reports => "Reports",
            Selection::All => "All",
        }
    }

    pub fn steps(self) -> &'static [Step] {
        match self {
            Selection::Clients => &[Step::Clients],
            Selection::Categories => &[Step::Categories],
            Selection::Products => &[Step::Products],
            Selection::Reviews => &[Step::Reviews],
            Selection::Orders => &[Step::Orders],
            Selection::Reports => &[Step::Reports],
            Selection::All => &Step::ALL,
        }
    }
}

impl fmt::Display for Selection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Selection {
    type Err = GenerationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        Selection::MENU
            .into_iter()
            .find(|selection| selection.key().to_string() == trimmed)
            .ok_or_else(|| GenerationError::UnknownChoice(trimmed.to_string()))
    }
}
