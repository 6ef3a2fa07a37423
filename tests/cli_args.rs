//! Integration tests for CLI argument handling
//!
//! Tests the station/TTL flags and startup validation from the command line.

use std::process::Command;

/// Helper to run the CLI with given args and capture output
fn run_cli(args: &[&str]) -> std::process::Output {
    Command::new(env!("CARGO_BIN_EXE_launchwx"))
        .args(args)
        .output()
        .expect("Failed to execute launchwx")
}

#[test]
fn test_help_flag_exits_successfully() {
    let output = run_cli(&["--help"]);
    assert!(
        output.status.success(),
        "Expected --help to exit successfully"
    );
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("launchwx"), "Help should mention launchwx");
    assert!(stdout.contains("launch"), "Help should mention --launch flag");
    assert!(stdout.contains("ground"), "Help should mention --ground flag");
    assert!(stdout.contains("api-key"), "Help should mention --api-key flag");
}

#[test]
fn test_version_flag_exits_successfully() {
    let output = run_cli(&["--version"]);
    assert!(
        output.status.success(),
        "Expected --version to exit successfully"
    );
}

#[test]
fn test_non_numeric_ttl_is_rejected() {
    let output = run_cli(&["--api-key", "TESTKEY", "--launch-ttl", "soon"]);
    assert!(!output.status.success(), "Expected non-numeric TTL to fail");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("launch-ttl") || stderr.contains("invalid"),
        "Should print an error about the TTL argument: {}",
        stderr
    );
}

#[test]
fn test_invalid_station_id_prints_error_and_exits() {
    let output = run_cli(&["--api-key", "TESTKEY", "--launch", "not a station"]);
    assert!(
        !output.status.success(),
        "Expected invalid station ID to fail"
    );
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("Invalid station ID"),
        "Should print error message about the station ID: {}",
        stderr
    );
}

#[test]
fn test_unknown_flag_is_rejected() {
    let output = run_cli(&["--api-key", "TESTKEY", "--altitude", "3000"]);
    assert!(!output.status.success(), "Expected unknown flag to fail");
}

#[cfg(test)]
mod unit_tests {
    //! Unit tests for CLI parsing that don't require running the binary

    use std::time::Duration;

    use clap::Parser;
    use launchwx::cli::{validate_station_id, Cli, StartupConfig};

    #[test]
    fn test_cli_defaults_to_lumby_stations() {
        let cli = Cli::parse_from(["launchwx", "--api-key", "TESTKEY"]);
        assert_eq!(cli.launch, "ILUMBY7");
        assert_eq!(cli.ground, "ILUMBY2");
    }

    #[test]
    fn test_cli_custom_launch_station() {
        let cli = Cli::parse_from(["launchwx", "--api-key", "TESTKEY", "--launch", "KGOLDEN9"]);
        assert_eq!(cli.launch, "KGOLDEN9");
    }

    #[test]
    fn test_cli_ttl_flags() {
        let cli = Cli::parse_from([
            "launchwx",
            "--api-key",
            "TESTKEY",
            "--launch-ttl",
            "120",
            "--ground-ttl",
            "600",
        ]);
        assert_eq!(cli.launch_ttl, 120);
        assert_eq!(cli.ground_ttl, 600);
    }

    #[test]
    fn test_startup_config_maps_ttls_to_durations() {
        let cli = Cli::parse_from(["launchwx", "--api-key", "TESTKEY", "--launch-ttl", "120"]);
        let config = StartupConfig::from_cli(&cli).unwrap();
        assert_eq!(config.launch_ttl, Duration::from_secs(120));
        assert_eq!(config.ground_ttl, Duration::from_secs(1800));
    }

    #[test]
    fn test_startup_config_no_ground_drops_station() {
        let cli = Cli::parse_from(["launchwx", "--api-key", "TESTKEY", "--no-ground"]);
        let config = StartupConfig::from_cli(&cli).unwrap();
        assert!(config.ground_station.is_none());
    }

    #[test]
    fn test_startup_config_rejects_bad_station() {
        let cli = Cli::parse_from(["launchwx", "--api-key", "TESTKEY", "--launch", "bad id"]);
        assert!(StartupConfig::from_cli(&cli).is_err());
    }

    #[test]
    fn test_validate_station_id_examples() {
        assert!(validate_station_id("ILUMBY7").is_ok());
        assert!(validate_station_id("").is_err());
        assert!(validate_station_id("I LUMBY").is_err());
    }
}
