//! Integration test infrastructure.
//!
//! Runs the server's test suite against the persistent storage backends.
//!
//! # Usage
//!
//! ```bash
//! # Run SQLite and Postgres integration tests
//! cargo xtask integration
//!
//! # Run only SQLite integration tests (no containers needed)
//! cargo xtask integration --sqlite
//!
//! # Run only Postgres integration tests
//! cargo xtask integration --postgres
//!
//! # Skip container management (assumes Postgres is already running)
//! cargo xtask integration --postgres --no-docker
//! ```

pub mod containers;
pub mod error;

pub use error::{IntegrationError, Result};

use std::time::Duration;

use containers::{
    detect_runtime, is_running, start_container, stop_container, wait_for_health,
    ContainerRuntime, POSTGRES_SPEC, POSTGRES_TEST_URL,
};

use crate::prelude::*;

/// Integration test command.
#[derive(Debug, clap::Parser)]
#[command(long_about = "Run integration tests against real storage backends.

By default, it runs the server tests once with the SQLite backend and
once with the Postgres backend. A Postgres container is started for the
run and stopped afterward.

Environment variables:
  TEST_DATABASE_URL   - Postgres URL used with --no-docker")]
pub struct IntegrationCommand {
    /// Run only SQLite integration tests.
    #[arg(long, conflicts_with = "postgres")]
    pub sqlite: bool,

    /// Run only Postgres integration tests.
    #[arg(long, conflicts_with = "sqlite")]
    pub postgres: bool,

    /// Skip Docker container management (assume services are already running).
    #[arg(long)]
    pub no_docker: bool,

    /// Keep containers running after tests complete.
    #[arg(long)]
    pub keep_containers: bool,

    /// Timeout in seconds for container health checks.
    #[arg(long, default_value = "30")]
    pub health_timeout: u64,
}

impl IntegrationCommand {
    /// Backends to test. Neither flag means both.
    fn backends(&self) -> (bool, bool) {
        (
            self.sqlite || !self.postgres,
            self.postgres || !self.sqlite,
        )
    }
}

/// Main entry point for integration command.
pub async fn run(command: IntegrationCommand, global: crate::Global) -> Result<()> {
    let (run_sqlite, run_postgres) = command.backends();

    if !global.is_silent() {
        aprintln!("{}", p_b("Integration Tests"));
        aprintln!();
        aprintln!(
            "{} Storage: {}",
            p_b("Config:"),
            match (run_sqlite, run_postgres) {
                (true, true) => "SQLite + Postgres",
                (true, false) => "SQLite",
                _ => "Postgres",
            }
        );
        aprintln!();
    }

    let mut all_passed = true;

    if run_sqlite {
        if !global.is_silent() {
            aprintln!("{} {}", p_b("🔧"), p_b("Running SQLite integration tests..."));
        }

        if !run_tests_with_feature("sqlite", Vec::new(), &global).await? {
            all_passed = false;
        }
    }

    let mut runtime = None;
    let mut postgres_started = false;

    if run_postgres {
        if !global.is_silent() {
            aprintln!("{} {}", p_b("🔧"), p_b("Running Postgres integration tests..."));
        }

        let database_url = if command.no_docker {
            if !global.is_silent() {
                aprintln!(
                    "{} {}",
                    p_y("⚠️"),
                    "Skipping Postgres container management (--no-docker)"
                );
            }
            std::env::var("TEST_DATABASE_URL").unwrap_or_else(|_| POSTGRES_TEST_URL.to_string())
        } else {
            let rt = detect_runtime().await?;
            runtime = Some(rt);
            postgres_started =
                start_postgres_container(command.health_timeout, &global, rt).await?;
            POSTGRES_TEST_URL.to_string()
        };

        let env_vars = vec![("TEST_DATABASE_URL", database_url)];
        if !run_tests_with_feature("postgres", env_vars, &global).await? {
            all_passed = false;
        }
    }

    if !command.keep_containers {
        if let (Some(rt), true) = (runtime, postgres_started) {
            stop_postgres_container(&global, rt).await?;
        }
    } else if postgres_started && !global.is_silent() {
        aprintln!(
            "{} {}",
            p_y("⚠️"),
            "Containers left running (--keep-containers)"
        );
    }

    aprintln!();
    if all_passed {
        aprintln!("{} {}", p_g("✅"), p_g("All integration tests passed!"));
        Ok(())
    } else {
        aprintln!("{} {}", p_r("❌"), p_r("Some integration tests failed"));
        Err(IntegrationError::TestFailed(
            "One or more test suites failed".to_string(),
        ))
    }
}

/// Arguments for `cargo test` with a single storage backend enabled.
fn cargo_test_args(storage: &str) -> Vec<&str> {
    vec![
        "test",
        "-p",
        "todo_list",
        "--no-default-features",
        "--features",
        storage,
    ]
}

/// Run the server tests with one storage feature.
async fn run_tests_with_feature(
    storage: &str,
    env_vars: Vec<(&str, String)>,
    global: &crate::Global,
) -> Result<bool> {
    if !global.is_silent() {
        aprintln!("{} Running with features: {}", p_b("  →"), p_y(storage));
    }

    let mut cmd = tokio::process::Command::new("cargo");
    cmd.args(cargo_test_args(storage));
    for (key, value) in env_vars {
        cmd.env(key, value);
    }

    let status = cmd.status().await?;

    if status.success() {
        if !global.is_silent() {
            aprintln!("{} {} tests passed", p_g("✅"), storage);
        }
        Ok(true)
    } else {
        aprintln!("{} {} tests failed", p_r("❌"), storage);
        Ok(false)
    }
}

/// Start the Postgres container. Returns false if one was already running.
async fn start_postgres_container(
    timeout_secs: u64,
    global: &crate::Global,
    runtime: ContainerRuntime,
) -> Result<bool> {
    if is_running(runtime, POSTGRES_SPEC.name).await? {
        if !global.is_silent() {
            aprintln!("{} {}", p_y("⚠️"), "Postgres container already running");
        }
        return Ok(false);
    }

    if !global.is_silent() {
        aprintln!("{} {}", p_b("🐳"), "Starting Postgres container...");
    }

    start_container(runtime, &POSTGRES_SPEC).await?;

    if !global.is_silent() {
        aprintln!(
            "{} {}",
            p_b("⏳"),
            format!("Waiting for Postgres health (max {}s)...", timeout_secs)
        );
    }

    wait_for_health(runtime, &POSTGRES_SPEC, Duration::from_secs(timeout_secs)).await?;

    if !global.is_silent() {
        aprintln!("{} {}", p_g("✅"), "Postgres is ready");
    }

    Ok(true)
}

/// Stop the Postgres container.
async fn stop_postgres_container(global: &crate::Global, runtime: ContainerRuntime) -> Result<()> {
    if !global.is_silent() {
        aprintln!("{} {}", p_b("🐳"), "Stopping Postgres container...");
    }

    stop_container(runtime, POSTGRES_SPEC.name).await?;

    if !global.is_silent() {
        aprintln!("{} {}", p_g("✅"), "Postgres container stopped");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    fn parse(args: &[&str]) -> IntegrationCommand {
        IntegrationCommand::try_parse_from(std::iter::once("integration").chain(args.iter().copied()))
            .unwrap()
    }

    #[test]
    fn test_backends_default_runs_both() {
        assert_eq!(parse(&[]).backends(), (true, true));
    }

    #[test]
    fn test_backends_single() {
        assert_eq!(parse(&["--sqlite"]).backends(), (true, false));
        assert_eq!(parse(&["--postgres"]).backends(), (false, true));
    }

    #[test]
    fn test_backend_flags_conflict() {
        let result = IntegrationCommand::try_parse_from(["integration", "--sqlite", "--postgres"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_cargo_test_args() {
        assert_eq!(
            cargo_test_args("sqlite"),
            vec!["test", "-p", "todo_list", "--no-default-features", "--features", "sqlite"]
        );
    }
}
