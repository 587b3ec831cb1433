pub mod chain;
pub mod integrity;
pub mod routing;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::{Action, ApprovalCeiling, FinancialCategory, ResourceKind, Role};
use crate::errors::PolicyError;
use crate::permissions::role_permissions;
use crate::permissions::thresholds::validate_amount;

pub use chain::approval_chain;
pub use integrity::{integrity_findings, verify_policy_integrity};
pub use routing::{
    AmountRequest, ApprovalRouter, RoutingBasis, RoutingDecision, ViewerInitiation, TOP_AUTHORITY,
};

/// A single "may this role sign off this amount" question. Transient: built by
/// the caller and consumed immediately.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApprovalQuery {
    pub role: Role,
    pub amount: Decimal,
    pub category: FinancialCategory,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ApprovalFailure {
    ApprovePermissionMissing { role: Role, resource: ResourceKind },
    CeilingExceeded { role: Role, category: FinancialCategory, amount: Decimal, ceiling: Decimal },
}

impl ApprovalFailure {
    fn reason(&self) -> String {
        match self {
            Self::ApprovePermissionMissing { role, resource } => {
                format!("role `{role}` holds no approve grant on `{resource}`")
            }
            Self::CeilingExceeded { role, category, amount, ceiling } => {
                format!("{category} amount {amount} exceeds `{role}` ceiling {ceiling}")
            }
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApprovalDecision {
    pub allowed: bool,
    pub reason: String,
    pub failure: Option<ApprovalFailure>,
}

impl ApprovalDecision {
    fn allow(reason: impl Into<String>) -> Self {
        Self { allowed: true, reason: reason.into(), failure: None }
    }

    fn deny(failure: ApprovalFailure) -> Self {
        Self { allowed: false, reason: failure.reason(), failure: Some(failure) }
    }
}

/// Full sign-off check: the role needs the `approve` grant on the resource
/// behind the category and a ceiling that covers the amount.
pub fn evaluate_approval(query: &ApprovalQuery) -> Result<ApprovalDecision, PolicyError> {
    let amount = validate_amount(query.amount)?;
    let permissions = role_permissions(query.role);
    let resource = query.category.resource();

    if !permissions.allows(resource, Action::Approve) {
        return Ok(ApprovalDecision::deny(ApprovalFailure::ApprovePermissionMissing {
            role: query.role,
            resource,
        }));
    }

    let ceiling = permissions.ceiling(query.category);
    if let ApprovalCeiling::Limit(limit) = ceiling {
        if amount > limit {
            return Ok(ApprovalDecision::deny(ApprovalFailure::CeilingExceeded {
                role: query.role,
                category: query.category,
                amount,
                ceiling: limit,
            }));
        }
    }

    Ok(ApprovalDecision::allow(format!(
        "role `{}` may approve {} {} (ceiling {ceiling})",
        query.role, query.category, amount
    )))
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use super::{evaluate_approval, ApprovalFailure, ApprovalQuery};
    use crate::domain::{FinancialCategory, ResourceKind, Role};
    use crate::errors::PolicyError;

    fn query(role: Role, amount: i64, category: FinancialCategory) -> ApprovalQuery {
        ApprovalQuery { role, amount: Decimal::from(amount), category }
    }

    #[test]
    fn allows_within_ceiling_with_grant() {
        let decision = evaluate_approval(&query(Role::Cashier, 3_000, FinancialCategory::Expense))
            .expect("valid query");

        assert!(decision.allowed);
        assert!(decision.failure.is_none());
        assert!(decision.reason.contains("ceiling 5000"));
    }

    #[test]
    fn denies_without_approve_grant() {
        let decision = evaluate_approval(&query(Role::Cashier, 0, FinancialCategory::Payroll))
            .expect("valid query");

        assert_eq!(
            decision.failure,
            Some(ApprovalFailure::ApprovePermissionMissing {
                role: Role::Cashier,
                resource: ResourceKind::Payroll,
            })
        );
    }

    #[test]
    fn denies_above_ceiling() {
        let decision =
            evaluate_approval(&query(Role::ZoneManager, 15_000, FinancialCategory::Expense))
                .expect("valid query");

        assert_eq!(
            decision.failure,
            Some(ApprovalFailure::CeilingExceeded {
                role: Role::ZoneManager,
                category: FinancialCategory::Expense,
                amount: Decimal::from(15_000),
                ceiling: Decimal::from(10_000),
            })
        );
        assert_eq!(decision.reason, "expense amount 15000 exceeds `ZONE_MANAGER` ceiling 10000");
    }

    #[test]
    fn unlimited_role_reports_unlimited_ceiling() {
        let decision =
            evaluate_approval(&query(Role::AreaManager, 9_000_000, FinancialCategory::Payroll))
                .expect("valid query");

        assert!(decision.allowed);
        assert!(decision.reason.contains("unlimited"));
    }

    #[test]
    fn viewer_is_denied_by_missing_grant_first() {
        let decision = evaluate_approval(&query(Role::Viewer, 0, FinancialCategory::Expense))
            .expect("valid query");
        assert!(matches!(
            decision.failure,
            Some(ApprovalFailure::ApprovePermissionMissing { role: Role::Viewer, .. })
        ));
    }

    #[test]
    fn negative_amount_is_invalid() {
        let error = evaluate_approval(&query(Role::Pmo, -5, FinancialCategory::Safe))
            .expect_err("negative amount should fail");
        assert_eq!(error, PolicyError::invalid_argument("amount", "-5"));
    }
}
