use serde::Serialize;
use siteguard_core::{AccessPolicy, Action, PolicyError, ResourceKind, Role};

use crate::commands::CommandResult;

#[derive(Debug, Serialize)]
struct CheckOutput {
    role: Role,
    resource: ResourceKind,
    action: Action,
    allowed: bool,
}

pub fn run(policy: &AccessPolicy, role: &str, resource: &str, action: &str) -> CommandResult {
    match evaluate(policy, role, resource, action) {
        Ok(output) => CommandResult::success("check", &output),
        Err(error) => CommandResult::policy_failure("check", &error),
    }
}

fn evaluate(
    policy: &AccessPolicy,
    role: &str,
    resource: &str,
    action: &str,
) -> Result<CheckOutput, PolicyError> {
    let role: Role = role.parse()?;
    let resource: ResourceKind = resource.parse()?;
    let action: Action = action.parse()?;

    let allowed = policy.has_permission(role, resource, action);

    Ok(CheckOutput { role, resource, action, allowed })
}
