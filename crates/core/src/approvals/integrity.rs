use std::collections::HashSet;

use crate::approvals::chain::approval_chain;
use crate::approvals::routing::TOP_AUTHORITY;
use crate::domain::{ApprovalCeiling, FinancialCategory, Role};
use crate::errors::PolicyError;
use crate::permissions::thresholds::ceiling_for;

const MAX_CHAIN_LEN: usize = 4;

/// Every problem found in the static tables. Empty when the tables are sound.
pub fn integrity_findings() -> Vec<String> {
    findings_with(ceiling_for, approval_chain)
}

fn findings_with(
    ceiling_for: impl Fn(Role, FinancialCategory) -> ApprovalCeiling,
    approval_chain: impl Fn(Role) -> &'static [Role],
) -> Vec<String> {
    let mut findings = Vec::new();

    for category in FinancialCategory::ALL {
        let ceiling = ceiling_for(TOP_AUTHORITY, category);
        if !ceiling.is_unlimited() {
            findings.push(format!(
                "{TOP_AUTHORITY} {category} ceiling must be unlimited, found {ceiling}"
            ));
        }
    }

    for role in Role::ALL {
        let chain = approval_chain(role);

        if (role.is_terminal() || !role.can_initiate_approvals()) && !chain.is_empty() {
            findings.push(format!("{role} must not escalate"));
            continue;
        }
        if chain.is_empty() {
            continue;
        }

        if chain.len() > MAX_CHAIN_LEN {
            findings.push(format!("{role} chain has {} steps (max {MAX_CHAIN_LEN})", chain.len()));
        }

        let mut seen = HashSet::from([role]);
        if let Some(repeated) = chain.iter().find(|step| !seen.insert(**step)) {
            findings.push(format!("{role} chain revisits {repeated}"));
        }

        if let Some((last, intermediate)) = chain.split_last() {
            if *last != TOP_AUTHORITY {
                findings.push(format!("{role} chain ends at {last} instead of {TOP_AUTHORITY}"));
            }
            if let Some(terminal) = intermediate.iter().find(|step| step.is_terminal()) {
                findings.push(format!("{role} chain passes through terminal role {terminal}"));
            }
        }

        let mut previous = role;
        for step in chain {
            let widens = FinancialCategory::ALL.into_iter().any(|category| {
                ceiling_for(*step, category).exceeds(&ceiling_for(previous, category))
            });
            if !widens {
                findings.push(format!(
                    "{role} chain step {previous} -> {step} grants no additional authority"
                ));
            }
            previous = *step;
        }
    }

    findings
}

/// Startup self-check. The router's top-authority fallback only guarantees
/// approval while these invariants hold.
pub fn verify_policy_integrity() -> Result<(), PolicyError> {
    check_findings(integrity_findings())
}

fn check_findings(findings: Vec<String>) -> Result<(), PolicyError> {
    if findings.is_empty() {
        tracing::debug!(event_name = "policy.integrity.verified", "policy tables verified");
        return Ok(());
    }

    tracing::error!(
        event_name = "policy.integrity.failed",
        findings = findings.len(),
        "policy tables failed self-check"
    );
    Err(PolicyError::IntegrityViolation(findings.join("; ")))
}

#[cfg(test)]
mod tests {
    use super::{check_findings, findings_with, integrity_findings, verify_policy_integrity};
    use crate::approvals::chain::approval_chain;
    use crate::domain::{ApprovalCeiling, FinancialCategory, Role};
    use crate::errors::PolicyError;
    use crate::permissions::thresholds::ceiling_for;

    fn replace_chain(role: Role, target: Role, chain: &'static [Role]) -> &'static [Role] {
        if role == target {
            chain
        } else {
            approval_chain(role)
        }
    }

    fn assert_rejected(findings: Vec<String>, expected: &str) {
        assert!(
            findings.iter().any(|finding| finding.contains(expected)),
            "expected a finding containing `{expected}`, got {findings:?}"
        );
        assert!(matches!(check_findings(findings), Err(PolicyError::IntegrityViolation(_))));
    }

    #[test]
    fn shipped_tables_pass_self_check() {
        assert_eq!(integrity_findings(), Vec::<String>::new());
        assert_eq!(verify_policy_integrity(), Ok(()));
    }

    #[test]
    fn finite_pmo_ceiling_is_rejected() {
        let findings = findings_with(
            |role, category| match (role, category) {
                (Role::Pmo, FinancialCategory::Expense) => ApprovalCeiling::limit(5_000_000),
                _ => ceiling_for(role, category),
            },
            approval_chain,
        );

        assert_rejected(findings, "PMO expense ceiling must be unlimited");
    }

    #[test]
    fn chain_revisiting_a_role_is_rejected() {
        let findings = findings_with(ceiling_for, |role| {
            replace_chain(
                role,
                Role::ZoneManager,
                &[Role::ProjectManager, Role::ProjectManager, Role::Pmo],
            )
        });

        assert_rejected(findings, "ZONE_MANAGER chain revisits PROJECT_MANAGER");
    }

    #[test]
    fn overlong_chain_is_rejected() {
        let findings = findings_with(ceiling_for, |role| {
            replace_chain(
                role,
                Role::SiteEngineer,
                &[Role::ZoneManager, Role::ProjectManager, Role::AreaManager, Role::Pmo, Role::Pmo],
            )
        });

        assert_rejected(findings, "SITE_ENGINEER chain has 5 steps");
    }

    #[test]
    fn chain_stopping_short_of_pmo_is_rejected() {
        let findings = findings_with(ceiling_for, |role| {
            replace_chain(role, Role::ProjectManager, &[Role::AreaManager])
        });

        assert_rejected(findings, "PROJECT_MANAGER chain ends at AREA_MANAGER instead of PMO");
    }

    #[test]
    fn step_without_wider_ceiling_is_rejected() {
        let findings = findings_with(
            |role, category| match role {
                Role::ProjectManager => ceiling_for(Role::ZoneManager, category),
                _ => ceiling_for(role, category),
            },
            approval_chain,
        );

        assert_rejected(
            findings,
            "ZONE_MANAGER chain step ZONE_MANAGER -> PROJECT_MANAGER grants no additional authority",
        );
    }

    #[test]
    fn escalating_viewer_is_rejected() {
        let findings =
            findings_with(ceiling_for, |role| replace_chain(role, Role::Viewer, &[Role::Pmo]));

        assert_rejected(findings, "VIEWER must not escalate");
    }

    #[test]
    fn escalating_terminal_role_is_rejected() {
        let findings =
            findings_with(ceiling_for, |role| replace_chain(role, Role::Admin, &[Role::Pmo]));

        assert_rejected(findings, "ADMIN must not escalate");
    }
}
