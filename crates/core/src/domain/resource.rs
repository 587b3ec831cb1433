use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::PolicyError;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceKind {
    Sites,
    Tasks,
    Employees,
    Expenses,
    Revenues,
    Safes,
    Payroll,
    Reports,
}

impl ResourceKind {
    pub const ALL: [ResourceKind; 8] = [
        ResourceKind::Sites,
        ResourceKind::Tasks,
        ResourceKind::Employees,
        ResourceKind::Expenses,
        ResourceKind::Revenues,
        ResourceKind::Safes,
        ResourceKind::Payroll,
        ResourceKind::Reports,
    ];

    /// Resource kinds that carry an approval step at all.
    pub const APPROVABLE: [ResourceKind; 5] = [
        ResourceKind::Tasks,
        ResourceKind::Expenses,
        ResourceKind::Revenues,
        ResourceKind::Payroll,
        ResourceKind::Safes,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Sites => "sites",
            Self::Tasks => "tasks",
            Self::Employees => "employees",
            Self::Expenses => "expenses",
            Self::Revenues => "revenues",
            Self::Safes => "safes",
            Self::Payroll => "payroll",
            Self::Reports => "reports",
        }
    }

    pub const fn is_approvable(self) -> bool {
        matches!(
            self,
            Self::Tasks | Self::Expenses | Self::Revenues | Self::Payroll | Self::Safes
        )
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ResourceKind {
    type Err = PolicyError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let key = normalize_key(value);
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == key)
            .ok_or_else(|| PolicyError::invalid_argument("resource", value))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    Create,
    Update,
    Delete,
    Approve,
}

impl Action {
    pub const ALL: [Action; 4] = [Action::Create, Action::Update, Action::Delete, Action::Approve];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Create => "create",
            Self::Update => "update",
            Self::Delete => "delete",
            Self::Approve => "approve",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Action {
    type Err = PolicyError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let key = normalize_key(value);
        Self::ALL
            .into_iter()
            .find(|action| action.as_str() == key)
            .ok_or_else(|| PolicyError::invalid_argument("action", value))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FinancialCategory {
    Expense,
    Safe,
    Payroll,
}

impl FinancialCategory {
    pub const ALL: [FinancialCategory; 3] =
        [FinancialCategory::Expense, FinancialCategory::Safe, FinancialCategory::Payroll];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Expense => "expense",
            Self::Safe => "safe",
            Self::Payroll => "payroll",
        }
    }

    /// The resource kind whose `approve` grant governs this category.
    pub const fn resource(self) -> ResourceKind {
        match self {
            Self::Expense => ResourceKind::Expenses,
            Self::Safe => ResourceKind::Safes,
            Self::Payroll => ResourceKind::Payroll,
        }
    }
}

impl fmt::Display for FinancialCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FinancialCategory {
    type Err = PolicyError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let key = normalize_key(value);
        Self::ALL
            .into_iter()
            .find(|category| category.as_str() == key)
            .ok_or_else(|| PolicyError::invalid_argument("category", value))
    }
}

fn normalize_key(raw: &str) -> String {
    raw.trim().to_ascii_lowercase()
}
