pub mod approve;
pub mod chain;
pub mod check;
pub mod config;
pub mod doctor;
pub mod next_approver;
pub mod permissions;

use rust_decimal::Decimal;
use serde::Serialize;
use siteguard_core::config::{AppConfig, LoadOptions};
use siteguard_core::{AccessPolicy, PolicyError};

pub const EXIT_INVALID_ARGUMENT: u8 = 2;
pub const EXIT_NOT_AUTHORIZED: u8 = 3;
pub const EXIT_CONFIG: u8 = 4;
pub const EXIT_INTEGRITY: u8 = 5;

#[derive(Debug, Clone)]
pub struct CommandResult {
    pub exit_code: u8,
    pub output: String,
}

#[derive(Debug, Serialize)]
struct CommandOutcome {
    command: String,
    status: String,
    error_class: Option<String>,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    hint: Option<String>,
}

#[derive(Debug, Serialize)]
struct CommandPayload<'a, T: Serialize> {
    command: &'a str,
    status: &'static str,
    data: &'a T,
}

impl CommandResult {
    pub fn success<T: Serialize>(command: &str, data: &T) -> Self {
        let payload = CommandPayload { command, status: "ok", data };
        match serde_json::to_string(&payload) {
            Ok(output) => Self { exit_code: 0, output },
            Err(error) => Self::failure(command, "serialization", error.to_string(), 1),
        }
    }

    pub fn failure(
        command: &str,
        error_class: &str,
        message: impl Into<String>,
        exit_code: u8,
    ) -> Self {
        Self::failure_with_hint(command, error_class, message, None, exit_code)
    }

    fn failure_with_hint(
        command: &str,
        error_class: &str,
        message: impl Into<String>,
        hint: Option<&str>,
        exit_code: u8,
    ) -> Self {
        let payload = CommandOutcome {
            command: command.to_string(),
            status: "error".to_string(),
            error_class: Some(error_class.to_string()),
            message: message.into(),
            hint: hint.map(str::to_string),
        };
        Self { exit_code, output: serialize_outcome(payload) }
    }

    pub fn policy_failure(command: &str, error: &PolicyError) -> Self {
        let exit_code = match error {
            PolicyError::InvalidArgument { .. } => EXIT_INVALID_ARGUMENT,
            PolicyError::NotAuthorizedToInitiate { .. } => EXIT_NOT_AUTHORIZED,
            PolicyError::IntegrityViolation(_) => EXIT_INTEGRITY,
        };
        Self::failure_with_hint(
            command,
            error.error_class(),
            error.to_string(),
            Some(error.user_message()),
            exit_code,
        )
    }
}

/// Loads configuration and builds the policy facade the way every policy
/// command needs it, mapping failures onto command output.
pub fn load_policy(command: &str) -> Result<AccessPolicy, CommandResult> {
    let config = AppConfig::load(LoadOptions::default()).map_err(|error| {
        CommandResult::failure(
            command,
            "config_validation",
            format!("configuration issue: {error}"),
            EXIT_CONFIG,
        )
    })?;

    AccessPolicy::from_settings(&config.policy)
        .map_err(|error| CommandResult::policy_failure(command, &error))
}

pub(crate) fn parse_amount(raw: &str) -> Result<Decimal, PolicyError> {
    raw.trim().parse::<Decimal>().map_err(|_| PolicyError::invalid_argument("amount", raw))
}

fn serialize_outcome(payload: CommandOutcome) -> String {
    serde_json::to_string(&payload).unwrap_or_else(|error| {
        format!(
            "{{\"command\":\"unknown\",\"status\":\"error\",\"error_class\":\"serialization\",\"message\":\"{}\"}}",
            error.to_string().replace('\\', "\\\\").replace('"', "\\\"")
        )
    })
}
