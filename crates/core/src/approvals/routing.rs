use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::approvals::chain::approval_chain;
use crate::domain::{FinancialCategory, Role};
use crate::errors::PolicyError;
use crate::permissions::thresholds::{ceiling_for, validate_amount};

/// Role that receives a request nobody in the chain could approve.
pub const TOP_AUTHORITY: Role = Role::Pmo;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AmountRequest {
    pub amount: Decimal,
    pub category: FinancialCategory,
}

impl AmountRequest {
    pub fn new(amount: Decimal, category: FinancialCategory) -> Self {
        Self { amount, category }
    }

    /// Amount-aware routing needs both halves; either one alone falls back to
    /// chain-head routing.
    pub fn from_parts(
        amount: Option<Decimal>,
        category: Option<FinancialCategory>,
    ) -> Option<Self> {
        Some(Self { amount: amount?, category: category? })
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoutingBasis {
    ChainHead,
    FirstQualified,
    TopAuthorityFallback,
    Terminal,
}

impl RoutingBasis {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ChainHead => "chain_head",
            Self::FirstQualified => "first_qualified",
            Self::TopAuthorityFallback => "top_authority_fallback",
            Self::Terminal => "terminal",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoutingDecision {
    pub requester: Role,
    pub next_approver: Option<Role>,
    pub basis: RoutingBasis,
    pub chain: Vec<Role>,
    pub request: Option<AmountRequest>,
}

/// How routing treats `VIEWER`, which has no escalation path of its own.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewerInitiation {
    /// Route like any other role with an empty chain.
    #[default]
    Allow,
    /// Refuse with [`PolicyError::NotAuthorizedToInitiate`].
    Reject,
}

impl ViewerInitiation {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Allow => "allow",
            Self::Reject => "reject",
        }
    }
}

impl fmt::Display for ViewerInitiation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ViewerInitiation {
    type Err = PolicyError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "allow" => Ok(Self::Allow),
            "reject" => Ok(Self::Reject),
            _ => Err(PolicyError::invalid_argument("viewer_initiation", value)),
        }
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct ApprovalRouter {
    viewer_initiation: ViewerInitiation,
}

impl ApprovalRouter {
    pub fn new(viewer_initiation: ViewerInitiation) -> Self {
        Self { viewer_initiation }
    }

    pub fn viewer_initiation(&self) -> ViewerInitiation {
        self.viewer_initiation
    }

    /// Decide who acts next on a request raised by `requester`.
    ///
    /// Without an amount this is the head of the chain. With one, the chain
    /// is searched in order and the first role whose ceiling covers the
    /// amount wins (first-fit). If none does, the request goes to
    /// [`TOP_AUTHORITY`] without re-checking its ceiling; the integrity
    /// self-check guarantees that role is unlimited.
    pub fn route(
        &self,
        requester: Role,
        request: Option<AmountRequest>,
    ) -> Result<RoutingDecision, PolicyError> {
        if !requester.can_initiate_approvals() && self.viewer_initiation == ViewerInitiation::Reject
        {
            return Err(PolicyError::NotAuthorizedToInitiate { role: requester });
        }

        if let Some(request) = request {
            validate_amount(request.amount)?;
        }

        let chain = approval_chain(requester);
        let (next_approver, basis) = match request {
            None => match chain.first() {
                Some(head) => (Some(*head), RoutingBasis::ChainHead),
                None => (None, RoutingBasis::Terminal),
            },
            Some(request) => match first_qualified(chain, &request) {
                Some(candidate) => (Some(candidate), RoutingBasis::FirstQualified),
                None => (Some(TOP_AUTHORITY), RoutingBasis::TopAuthorityFallback),
            },
        };

        tracing::debug!(
            event_name = "policy.routing.decided",
            requester = requester.as_str(),
            basis = basis.as_str(),
            next_approver = next_approver.map(Role::as_str).unwrap_or("none"),
            amount = request.map(|request| request.amount.to_string()).as_deref(),
            category = request.map(|request| request.category.as_str()),
            "approval routing decided"
        );

        Ok(RoutingDecision { requester, next_approver, basis, chain: chain.to_vec(), request })
    }

    pub fn next_approver(
        &self,
        requester: Role,
        request: Option<AmountRequest>,
    ) -> Result<Option<Role>, PolicyError> {
        Ok(self.route(requester, request)?.next_approver)
    }
}

fn first_qualified(chain: &[Role], request: &AmountRequest) -> Option<Role> {
    chain
        .iter()
        .copied()
        .find(|candidate| ceiling_for(*candidate, request.category).covers(request.amount))
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use super::{AmountRequest, ApprovalRouter, RoutingBasis, ViewerInitiation, TOP_AUTHORITY};
    use crate::domain::{FinancialCategory, Role};
    use crate::errors::PolicyError;

    fn expense(amount: i64) -> Option<AmountRequest> {
        Some(AmountRequest::new(Decimal::from(amount), FinancialCategory::Expense))
    }

    #[test]
    fn zone_manager_expense_goes_to_first_qualified_superior() {
        let decision = ApprovalRouter::default()
            .route(Role::ZoneManager, expense(15_000))
            .expect("routing should succeed");

        assert_eq!(decision.next_approver, Some(Role::ProjectManager));
        assert_eq!(decision.basis, RoutingBasis::FirstQualified);
        assert_eq!(decision.chain, vec![Role::ProjectManager, Role::AreaManager, Role::Pmo]);
    }

    #[test]
    fn first_fit_skips_superiors_below_the_amount() {
        let router = ApprovalRouter::default();
        assert_eq!(
            router.next_approver(Role::SiteEngineer, expense(30_000)),
            Ok(Some(Role::AreaManager))
        );
        assert_eq!(
            router.next_approver(Role::SiteEngineer, expense(10_000)),
            Ok(Some(Role::ZoneManager))
        );
    }

    #[test]
    fn oversized_expense_reaches_pmo() {
        let decision = ApprovalRouter::default()
            .route(Role::SiteEngineer, expense(10_000_000))
            .expect("routing should succeed");

        assert_eq!(decision.next_approver, Some(TOP_AUTHORITY));
        assert_eq!(decision.basis, RoutingBasis::FirstQualified);
    }

    #[test]
    fn unlimited_pmo_in_chain_is_selected_as_first_qualified() {
        let decision = ApprovalRouter::default()
            .route(Role::AreaManager, expense(75_000))
            .expect("routing should succeed");
        assert_eq!(decision.next_approver, Some(Role::Pmo));
        assert_eq!(decision.basis, RoutingBasis::FirstQualified);
    }

    #[test]
    fn empty_chain_with_amount_uses_top_authority_fallback() {
        let decision =
            ApprovalRouter::default().route(Role::Admin, expense(1)).expect("routing succeeds");
        assert_eq!(decision.next_approver, Some(Role::Pmo));
        assert_eq!(decision.basis, RoutingBasis::TopAuthorityFallback);
        assert!(decision.chain.is_empty());
    }

    #[test]
    fn without_amount_returns_chain_head() {
        let router = ApprovalRouter::default();
        let decision = router.route(Role::ProjectManager, None).expect("routing succeeds");
        assert_eq!(decision.next_approver, Some(Role::AreaManager));
        assert_eq!(decision.basis, RoutingBasis::ChainHead);
    }

    #[test]
    fn chain_head_ignores_thresholds() {
        // Zone manager's 10000 expense ceiling would not matter here.
        let router = ApprovalRouter::default();
        assert_eq!(router.next_approver(Role::Cashier, None), Ok(Some(Role::ZoneManager)));
    }

    #[test]
    fn terminal_roles_without_amount_have_no_next_approver() {
        let router = ApprovalRouter::default();
        for role in [Role::Pmo, Role::Admin, Role::Viewer] {
            let decision = router.route(role, None).expect("routing succeeds");
            assert_eq!(decision.next_approver, None, "{role}");
            assert_eq!(decision.basis, RoutingBasis::Terminal);
        }
    }

    #[test]
    fn partial_amount_request_routes_by_chain_head() {
        assert_eq!(AmountRequest::from_parts(Some(Decimal::from(5)), None), None);
        assert_eq!(AmountRequest::from_parts(None, Some(FinancialCategory::Safe)), None);
        assert!(AmountRequest::from_parts(Some(Decimal::ONE), Some(FinancialCategory::Safe))
            .is_some());
    }

    #[test]
    fn rejecting_router_refuses_viewer() {
        let router = ApprovalRouter::new(ViewerInitiation::Reject);
        assert_eq!(
            router.route(Role::Viewer, None),
            Err(PolicyError::NotAuthorizedToInitiate { role: Role::Viewer })
        );
        assert_eq!(router.next_approver(Role::ZoneManager, None), Ok(Some(Role::ProjectManager)));
    }

    #[test]
    fn negative_amount_is_rejected_before_routing() {
        let result = ApprovalRouter::default().route(Role::Cashier, expense(-1));
        assert!(matches!(result, Err(PolicyError::InvalidArgument { field: "amount", .. })));
    }

    #[test]
    fn viewer_initiation_parses_from_config_strings() {
        assert_eq!("Reject".parse::<ViewerInitiation>(), Ok(ViewerInitiation::Reject));
        assert_eq!(" allow ".parse::<ViewerInitiation>(), Ok(ViewerInitiation::Allow));
        assert!("deny".parse::<ViewerInitiation>().is_err());
    }
}
