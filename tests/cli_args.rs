//! Integration tests for CLI argument handling
//!
//! Runs the built binary for argument errors and offline commands.

use std::process::Command;

/// Helper to run the CLI with given args and capture output
fn run_cli(args: &[&str]) -> std::process::Output {
    Command::new(env!("CARGO_BIN_EXE_airops"))
        .args(args)
        .env_remove("AIROPS_API_URL")
        .output()
        .expect("Failed to execute airops")
}

#[test]
fn test_help_flag_exits_successfully() {
    let output = run_cli(&["--help"]);
    assert!(output.status.success(), "Expected --help to exit successfully");
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("airops"), "Help should mention airops");
    assert!(stdout.contains("flights"), "Help should mention the flights command");
    assert!(stdout.contains("checkin"), "Help should mention the checkin command");
}

#[test]
fn test_missing_subcommand_fails() {
    let output = run_cli(&[]);
    assert!(!output.status.success());
}

#[test]
fn test_zero_page_size_prints_error_and_exits() {
    let output = run_cli(&["flights", "--page-size", "0", "--no-cache"]);
    assert!(!output.status.success(), "Expected page size 0 to fail");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("Invalid page size"),
        "Should print error message about page size: {}",
        stderr
    );
}

#[test]
fn test_invalid_base_url_prints_error() {
    let output = run_cli(&["--base-url", "ftp://nowhere", "flights"]);
    assert!(!output.status.success());
    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Invalid base URL"), "stderr: {}", stderr);
}

#[test]
fn test_huge_cache_ttl_is_a_config_error() {
    let output = run_cli(&["--cache-ttl", "18446744073709551615", "--no-cache", "cache", "clear"]);
    assert_eq!(output.status.code(), Some(2), "Expected a config error, not a crash");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Invalid cache TTL"), "stderr: {}", stderr);
    assert!(!stderr.contains("panicked"), "stderr: {}", stderr);
}

#[test]
fn test_reserve_validation_happens_before_network() {
    // Port 9 has no listener; a validation error must be reported instead
    let output = run_cli(&[
        "--base-url", "http://127.0.0.1:9", "--no-cache", "reserve", "--passenger", "1",
        "--flight", "2", "--code", "ABC", "--price", "0",
    ]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("price must be greater than 0"), "stderr: {}", stderr);
}

#[test]
fn test_unreachable_service_reports_user_message() {
    let output = run_cli(&["--base-url", "http://127.0.0.1:9", "--no-cache", "luggage", "4"]);
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Could not reach the service"), "stderr: {}", stderr);
}

#[test]
fn test_cache_clear_with_custom_dir() {
    let temp_dir = tempfile::TempDir::new().expect("Failed to create temp directory");
    let dir = temp_dir.path().to_str().unwrap();

    let output = run_cli(&["--cache-dir", dir, "cache", "clear"]);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Cleared all cached responses"));
}

#[cfg(test)]
mod unit_tests {
    //! Unit tests for CLI parsing that don't require running the binary

    use airops::cli::{Cli, Command, Config};
    use clap::Parser;

    #[test]
    fn test_cli_reservations_positional_id() {
        let cli = Cli::parse_from(["airops", "reservations", "42"]);
        match cli.command {
            Command::Reservations { passenger_id, status } => {
                assert_eq!(passenger_id, "42");
                assert!(status.is_none());
            }
            other => panic!("Expected reservations command, got {:?}", other),
        }
    }

    #[test]
    fn test_cli_checkin_requires_all_flags() {
        let result = Cli::try_parse_from(["airops", "checkin", "--reservation", "1"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_cli_no_cache_builds_memory_config() {
        let cli = Cli::parse_from(["airops", "--no-cache", "flights"]);
        let config = Config::from_cli(&cli).unwrap();
        assert!(!config.persistent_cache);
    }
}
