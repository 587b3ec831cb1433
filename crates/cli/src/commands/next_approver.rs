use siteguard_core::{AccessPolicy, AmountRequest, FinancialCategory, PolicyError, Role};

use crate::commands::{parse_amount, CommandResult};

/// Amount and category only switch routing to amount-aware mode when both are
/// present, matching the library.
pub fn run(
    policy: &AccessPolicy,
    role: &str,
    amount: Option<&str>,
    category: Option<&str>,
) -> CommandResult {
    let result = parse_request(role, amount, category)
        .and_then(|(role, request)| policy.route(role, request));

    match result {
        Ok(decision) => CommandResult::success("next-approver", &decision),
        Err(error) => CommandResult::policy_failure("next-approver", &error),
    }
}

fn parse_request(
    role: &str,
    amount: Option<&str>,
    category: Option<&str>,
) -> Result<(Role, Option<AmountRequest>), PolicyError> {
    let role: Role = role.parse()?;
    let amount = amount.map(parse_amount).transpose()?;
    let category = category.map(str::parse::<FinancialCategory>).transpose()?;

    Ok((role, AmountRequest::from_parts(amount, category)))
}
