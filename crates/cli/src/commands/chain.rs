use serde::Serialize;
use siteguard_core::{AccessPolicy, Role};

use crate::commands::CommandResult;

#[derive(Debug, Serialize)]
struct ChainOutput {
    role: Role,
    terminal: bool,
    chain: Vec<Role>,
}

pub fn run(policy: &AccessPolicy, role: &str) -> CommandResult {
    let result = role.parse::<Role>().map(|role| ChainOutput {
        role,
        terminal: role.is_terminal(),
        chain: policy.get_approval_chain(role),
    });

    match result {
        Ok(output) => CommandResult::success("chain", &output),
        Err(error) => CommandResult::policy_failure("chain", &error),
    }
}
