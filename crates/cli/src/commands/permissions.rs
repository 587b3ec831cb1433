use serde::Serialize;
use siteguard_core::{AccessPolicy, Role, RolePermissions, ViewScope};

use crate::commands::CommandResult;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct RoleSnapshot {
    label: &'static str,
    view_scope: ViewScope,
    #[serde(flatten)]
    permissions: RolePermissions,
}

impl RoleSnapshot {
    fn of(policy: &AccessPolicy, role: Role) -> Self {
        Self {
            label: role.label(),
            view_scope: role.view_scope(),
            permissions: policy.get_role_permissions(role),
        }
    }
}

pub fn run(policy: &AccessPolicy, role: &str) -> CommandResult {
    match role.parse::<Role>() {
        Ok(role) => CommandResult::success("permissions", &RoleSnapshot::of(policy, role)),
        Err(error) => CommandResult::policy_failure("permissions", &error),
    }
}

pub fn run_matrix(policy: &AccessPolicy) -> CommandResult {
    let rows: Vec<RoleSnapshot> =
        Role::ALL.into_iter().map(|role| RoleSnapshot::of(policy, role)).collect();
    CommandResult::success("matrix", &rows)
}
