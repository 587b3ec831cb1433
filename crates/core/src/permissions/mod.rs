pub mod matrix;
pub mod thresholds;

pub use matrix::{has_permission, role_permissions, ApprovalGrants, ResourceGrants, RolePermissions};
pub use thresholds::{can_approve_amount, ceiling_for};
