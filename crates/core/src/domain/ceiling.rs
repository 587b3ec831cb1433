use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Maximum amount a role may sign off for one financial category.
///
/// `Limit(0)` means the role may never approve the category; it is not the
/// same as `Unlimited`. Serialized as `null` for unlimited and as a decimal
/// string (`"10000"`) otherwise.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ApprovalCeiling {
    Unlimited,
    Limit(Decimal),
}

impl ApprovalCeiling {
    pub const NONE: ApprovalCeiling = ApprovalCeiling::Limit(Decimal::ZERO);

    pub fn limit(amount: i64) -> Self {
        Self::Limit(Decimal::from(amount))
    }

    pub fn is_unlimited(&self) -> bool {
        matches!(self, Self::Unlimited)
    }

    /// Inclusive: an amount equal to the ceiling is covered.
    pub fn covers(&self, amount: Decimal) -> bool {
        match self {
            Self::Unlimited => true,
            Self::Limit(ceiling) => amount <= *ceiling,
        }
    }

    pub fn amount(&self) -> Option<Decimal> {
        match self {
            Self::Unlimited => None,
            Self::Limit(ceiling) => Some(*ceiling),
        }
    }

    /// Whether `self` grants strictly more authority than `other`.
    pub fn exceeds(&self, other: &ApprovalCeiling) -> bool {
        match (self, other) {
            (Self::Unlimited, Self::Unlimited) => false,
            (Self::Unlimited, Self::Limit(_)) => true,
            (Self::Limit(_), Self::Unlimited) => false,
            (Self::Limit(mine), Self::Limit(theirs)) => mine > theirs,
        }
    }
}

impl fmt::Display for ApprovalCeiling {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unlimited => f.write_str("unlimited"),
            Self::Limit(ceiling) => write!(f, "{ceiling}"),
        }
    }
}

impl Serialize for ApprovalCeiling {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.amount().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for ApprovalCeiling {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let amount = Option::<Decimal>::deserialize(deserializer)?;
        Ok(amount.map_or(Self::Unlimited, Self::Limit))
    }
}
