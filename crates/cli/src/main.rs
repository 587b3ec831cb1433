use std::process::ExitCode;

fn main() -> ExitCode {
    siteguard_cli::run()
}
