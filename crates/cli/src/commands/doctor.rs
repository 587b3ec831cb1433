use rust_decimal::Decimal;
use serde::Serialize;
use siteguard_core::config::{AppConfig, LoadOptions};
use siteguard_core::{
    integrity_findings, AccessPolicy, AmountRequest, ApprovalRouter, FinancialCategory,
    PolicySettings, Role,
};

use crate::commands::CommandResult;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
enum CheckStatus {
    Pass,
    Fail,
    Skipped,
}

#[derive(Debug, Serialize)]
struct DoctorCheck {
    name: &'static str,
    status: CheckStatus,
    details: String,
}

#[derive(Debug, Serialize)]
pub struct DoctorReport {
    overall_status: CheckStatus,
    summary: String,
    checks: Vec<DoctorCheck>,
}

impl DoctorReport {
    pub fn passed(&self) -> bool {
        self.overall_status == CheckStatus::Pass
    }
}

pub fn run(json_output: bool) -> CommandResult {
    let report = build_report();
    let exit_code = if report.passed() { 0 } else { 1 };

    if json_output {
        let output = serde_json::to_string_pretty(&report).unwrap_or_else(|error| {
            format!(
                "{{\"overall_status\":\"fail\",\"summary\":\"doctor serialization failed\",\"error\":\"{}\"}}",
                escape_json(&error.to_string())
            )
        });
        return CommandResult { exit_code, output };
    }

    CommandResult { exit_code, output: render_human(&report) }
}

pub fn build_report() -> DoctorReport {
    let mut checks = Vec::new();
    let mut settings = PolicySettings::default();

    match AppConfig::load(LoadOptions::default()) {
        Ok(config) => {
            checks.push(DoctorCheck {
                name: "config_validation",
                status: CheckStatus::Pass,
                details: format!(
                    "configuration loaded (viewer_initiation={}, verify_on_load={})",
                    config.policy.viewer_initiation, config.policy.verify_on_load
                ),
            });
            settings = config.policy;
        }
        Err(error) => {
            checks.push(DoctorCheck {
                name: "config_validation",
                status: CheckStatus::Fail,
                details: error.to_string(),
            });
        }
    }

    let integrity = check_policy_integrity();
    let integrity_passed = integrity.status == CheckStatus::Pass;
    checks.push(integrity);

    if integrity_passed {
        let policy = AccessPolicy::new(ApprovalRouter::new(settings.viewer_initiation));
        checks.push(check_top_authority_fallback(&policy));
    } else {
        checks.push(DoctorCheck {
            name: "top_authority_fallback",
            status: CheckStatus::Skipped,
            details: "skipped because policy tables failed their self-check".to_string(),
        });
    }

    let all_pass = checks.iter().all(|check| check.status == CheckStatus::Pass);
    let overall_status = if all_pass { CheckStatus::Pass } else { CheckStatus::Fail };
    let summary = if all_pass {
        "doctor: all policy checks passed".to_string()
    } else {
        "doctor: one or more policy checks failed".to_string()
    };

    DoctorReport { overall_status, summary, checks }
}

fn check_policy_integrity() -> DoctorCheck {
    let findings = integrity_findings();
    if findings.is_empty() {
        return DoctorCheck {
            name: "policy_integrity",
            status: CheckStatus::Pass,
            details: format!("{} roles verified", Role::ALL.len()),
        };
    }

    DoctorCheck {
        name: "policy_integrity",
        status: CheckStatus::Fail,
        details: findings.join("; "),
    }
}

/// Routes an amount no finite ceiling covers from the bottom of the hierarchy
/// and confirms it lands on the top authority.
fn check_top_authority_fallback(policy: &AccessPolicy) -> DoctorCheck {
    let request = AmountRequest::new(Decimal::MAX, FinancialCategory::Expense);

    match policy.route(Role::SiteEngineer, Some(request)) {
        Ok(decision) if decision.next_approver == Some(Role::Pmo) => DoctorCheck {
            name: "top_authority_fallback",
            status: CheckStatus::Pass,
            details: format!(
                "unbounded expense routes to PMO ({}, viewer_initiation={})",
                decision.basis.as_str(),
                policy.router().viewer_initiation()
            ),
        },
        Ok(decision) => DoctorCheck {
            name: "top_authority_fallback",
            status: CheckStatus::Fail,
            details: format!("unbounded expense routed to {:?}", decision.next_approver),
        },
        Err(error) => DoctorCheck {
            name: "top_authority_fallback",
            status: CheckStatus::Fail,
            details: error.to_string(),
        },
    }
}

fn render_human(report: &DoctorReport) -> String {
    let mut lines = Vec::new();
    lines.push(report.summary.clone());

    for check in &report.checks {
        let marker = match check.status {
            CheckStatus::Pass => "ok",
            CheckStatus::Fail => "fail",
            CheckStatus::Skipped => "skip",
        };
        lines.push(format!("- [{marker}] {}: {}", check.name, check.details));
    }

    lines.join("\n")
}

fn escape_json(value: &str) -> String {
    value.replace('\\', "\\\\").replace('"', "\\\"")
}
