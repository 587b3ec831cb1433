pub mod approvals;
pub mod config;
pub mod domain;
pub mod errors;
pub mod facade;
pub mod permissions;

pub use approvals::{
    approval_chain, evaluate_approval, integrity_findings, verify_policy_integrity,
    AmountRequest, ApprovalDecision, ApprovalFailure, ApprovalQuery, ApprovalRouter,
    RoutingBasis, RoutingDecision, ViewerInitiation, TOP_AUTHORITY,
};
pub use config::{AppConfig, ConfigError, LoadOptions, LogFormat, PolicySettings};
pub use domain::{
    Action, ApprovalCeiling, FinancialCategory, ResourceKind, Role, ScopeFlags, ViewScope,
};
pub use errors::PolicyError;
pub use facade::AccessPolicy;
pub use permissions::{
    can_approve_amount, ceiling_for, has_permission, role_permissions, ApprovalGrants,
    ResourceGrants, RolePermissions,
};
