use std::process::{Command, Output};

/// Run the CLI binary against the relay at `relay`.
///
/// Colour is turned off and ambient configuration cleared so output can be
/// matched as plain text.
pub fn run_cli(args: &[&str], relay: &str) -> Output {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_lastaccess"));
    cmd.args(args);
    cmd.env("LASTACCESS_RELAY", relay);
    cmd.env("NO_COLOR", "1");
    cmd.env_remove("RUST_LOG");
    cmd.output().expect("Failed to execute CLI")
}

/// Run the CLI and expect success, returning stdout.
pub fn run_cli_success(args: &[&str], relay: &str) -> String {
    let output = run_cli(args, relay);
    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        panic!("CLI command failed: {:?}\nstderr: {}", args, stderr);
    }
    String::from_utf8_lossy(&output.stdout).to_string()
}

/// Run the CLI and expect failure, returning (stdout, stderr).
pub fn run_cli_failure(args: &[&str], relay: &str) -> (String, String) {
    let output = run_cli(args, relay);
    if output.status.success() {
        panic!("CLI command should have failed: {:?}", args);
    }
    (
        String::from_utf8_lossy(&output.stdout).to_string(),
        String::from_utf8_lossy(&output.stderr).to_string(),
    )
}
