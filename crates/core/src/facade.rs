use rust_decimal::Decimal;

use crate::approvals::{
    approval_chain, evaluate_approval, verify_policy_integrity, AmountRequest, ApprovalDecision,
    ApprovalQuery, ApprovalRouter, RoutingDecision,
};
use crate::config::PolicySettings;
use crate::domain::{Action, FinancialCategory, ResourceKind, Role};
use crate::errors::PolicyError;
use crate::permissions::{self, RolePermissions};

/// Query surface over the static permission and threshold tables.
///
/// Cheap to copy and safe to share across threads: it holds only the routing
/// settings, never a reference into mutable state.
#[derive(Clone, Copy, Debug, Default)]
pub struct AccessPolicy {
    router: ApprovalRouter,
}

impl AccessPolicy {
    pub fn new(router: ApprovalRouter) -> Self {
        Self { router }
    }

    /// Builds the facade and, unless disabled, runs the table self-check.
    pub fn from_settings(settings: &PolicySettings) -> Result<Self, PolicyError> {
        if settings.verify_on_load {
            verify_policy_integrity()?;
        }

        tracing::info!(
            event_name = "policy.facade.initialized",
            viewer_initiation = settings.viewer_initiation.as_str(),
            verified = settings.verify_on_load,
            "access policy initialized"
        );
        Ok(Self::new(ApprovalRouter::new(settings.viewer_initiation)))
    }

    pub fn router(&self) -> &ApprovalRouter {
        &self.router
    }

    pub fn has_permission(&self, role: Role, resource: ResourceKind, action: Action) -> bool {
        permissions::has_permission(role, resource, action)
    }

    pub fn can_approve_amount(
        &self,
        role: Role,
        amount: Decimal,
        category: FinancialCategory,
    ) -> Result<bool, PolicyError> {
        permissions::can_approve_amount(role, amount, category)
    }

    pub fn evaluate_approval(
        &self,
        query: &ApprovalQuery,
    ) -> Result<ApprovalDecision, PolicyError> {
        evaluate_approval(query)
    }

    pub fn get_approval_chain(&self, role: Role) -> Vec<Role> {
        approval_chain(role).to_vec()
    }

    pub fn get_next_approver(
        &self,
        role: Role,
        amount: Option<Decimal>,
        category: Option<FinancialCategory>,
    ) -> Result<Option<Role>, PolicyError> {
        self.router.next_approver(role, AmountRequest::from_parts(amount, category))
    }

    pub fn route(
        &self,
        role: Role,
        request: Option<AmountRequest>,
    ) -> Result<RoutingDecision, PolicyError> {
        self.router.route(role, request)
    }

    pub fn get_role_permissions(&self, role: Role) -> RolePermissions {
        *permissions::role_permissions(role)
    }

    /// String-keyed variant of [`AccessPolicy::has_permission`] for callers
    /// that hold raw identifiers. Unknown names are errors, never a default.
    pub fn has_permission_by_name(
        &self,
        role: &str,
        resource: &str,
        action: &str,
    ) -> Result<bool, PolicyError> {
        Ok(self.has_permission(role.parse()?, resource.parse()?, action.parse()?))
    }
}
