pub mod commands;
pub mod logging;

use clap::{Parser, Subcommand};
use siteguard_core::config::{AppConfig, LoadOptions};
use siteguard_core::AccessPolicy;
use std::process::ExitCode;

use crate::commands::CommandResult;

#[derive(Debug, Parser)]
#[command(
    name = "siteguard",
    about = "Siteguard access policy CLI",
    long_about = "Query role permissions, approval ceilings, and escalation routing for field \
                  operations.",
    after_help = "Examples:\n  siteguard check --role cashier --resource safes --action update\n  \
                  siteguard next-approver --role zone_manager --amount 15000 --category expense\n  \
                  siteguard doctor --json"
)]
pub struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    #[command(flatten)]
    Policy(PolicyCommand),
    #[command(about = "Validate config and run the policy table self-check")]
    Doctor {
        #[arg(long, help = "Emit machine-readable JSON output")]
        json: bool,
    },
    #[command(about = "Inspect effective configuration values with source attribution")]
    Config,
}

/// Commands that query the access policy and need it loaded first.
#[derive(Debug, Subcommand)]
enum PolicyCommand {
    #[command(about = "Check whether a role may perform an action on a resource")]
    Check {
        #[arg(long)]
        role: String,
        #[arg(long)]
        resource: String,
        #[arg(long)]
        action: String,
    },
    #[command(about = "Check whether a role may approve an amount in a financial category")]
    CanApprove {
        #[arg(long)]
        role: String,
        #[arg(long)]
        amount: String,
        #[arg(long)]
        category: String,
    },
    #[command(about = "Print the escalation chain for a role")]
    Chain {
        #[arg(long)]
        role: String,
    },
    #[command(about = "Resolve who approves next, optionally for an amount and category")]
    NextApprover {
        #[arg(long)]
        role: String,
        #[arg(long)]
        amount: Option<String>,
        #[arg(long)]
        category: Option<String>,
    },
    #[command(about = "Print the permission snapshot for a role")]
    Permissions {
        #[arg(long)]
        role: String,
    },
    #[command(about = "Print the permission snapshot for every role")]
    Matrix,
}

pub fn run() -> ExitCode {
    let cli = Cli::parse();

    // A broken config is reported by the command itself.
    if let Ok(config) = AppConfig::load(LoadOptions::default()) {
        if let Err(error) = logging::init_logging(&config) {
            eprintln!("{error}");
        }
    }

    let result = dispatch(cli.command);
    println!("{}", result.output);
    ExitCode::from(result.exit_code)
}

fn dispatch(command: Command) -> CommandResult {
    match command {
        Command::Config => CommandResult { exit_code: 0, output: commands::config::run() },
        Command::Doctor { json } => commands::doctor::run(json),
        Command::Policy(command) => match commands::load_policy(command.name()) {
            Ok(policy) => dispatch_policy(&policy, command),
            Err(failure) => failure,
        },
    }
}

fn dispatch_policy(policy: &AccessPolicy, command: PolicyCommand) -> CommandResult {
    match command {
        PolicyCommand::Check { role, resource, action } => {
            commands::check::run(policy, &role, &resource, &action)
        }
        PolicyCommand::CanApprove { role, amount, category } => {
            commands::approve::run(policy, &role, &amount, &category)
        }
        PolicyCommand::Chain { role } => commands::chain::run(policy, &role),
        PolicyCommand::NextApprover { role, amount, category } => {
            commands::next_approver::run(policy, &role, amount.as_deref(), category.as_deref())
        }
        PolicyCommand::Permissions { role } => commands::permissions::run(policy, &role),
        PolicyCommand::Matrix => commands::permissions::run_matrix(policy),
    }
}

impl PolicyCommand {
    fn name(&self) -> &'static str {
        match self {
            Self::Check { .. } => "check",
            Self::CanApprove { .. } => "can-approve",
            Self::Chain { .. } => "chain",
            Self::NextApprover { .. } => "next-approver",
            Self::Permissions { .. } => "permissions",
            Self::Matrix => "matrix",
        }
    }
}
