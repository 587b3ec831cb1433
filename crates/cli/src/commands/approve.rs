use rust_decimal::Decimal;
use serde::Serialize;
use siteguard_core::{
    AccessPolicy, ApprovalCeiling, ApprovalDecision, ApprovalQuery, FinancialCategory, PolicyError,
    Role,
};

use crate::commands::{parse_amount, CommandResult};

#[derive(Debug, Serialize)]
struct CanApproveOutput {
    role: Role,
    amount: Decimal,
    category: FinancialCategory,
    ceiling: ApprovalCeiling,
    within_ceiling: bool,
    decision: ApprovalDecision,
}

pub fn run(policy: &AccessPolicy, role: &str, amount: &str, category: &str) -> CommandResult {
    match evaluate(policy, role, amount, category) {
        Ok(output) => CommandResult::success("can-approve", &output),
        Err(error) => CommandResult::policy_failure("can-approve", &error),
    }
}

fn evaluate(
    policy: &AccessPolicy,
    role: &str,
    amount: &str,
    category: &str,
) -> Result<CanApproveOutput, PolicyError> {
    let role: Role = role.parse()?;
    let amount = parse_amount(amount)?;
    let category: FinancialCategory = category.parse()?;

    let within_ceiling = policy.can_approve_amount(role, amount, category)?;
    let decision = policy.evaluate_approval(&ApprovalQuery { role, amount, category })?;

    Ok(CanApproveOutput {
        role,
        amount,
        category,
        ceiling: policy.get_role_permissions(role).ceiling(category),
        within_ceiling,
        decision,
    })
}
