//! Integration tests for the health check system

use buildinfo::health::{self, CheckStatus, HealthCheckRunner, SystemCheck, checks::*};

#[test]
fn test_all_health_checks_run() {
    let report = health::run_all_checks();

    assert_eq!(report.total, 3, "Expected every built-in check in the report");
    assert_eq!(report.passed + report.warned + report.failed, report.total);

    // A dirty or git-less checkout only warns; failures mean broken embedding or config
    if !report.is_healthy() {
        eprintln!("\n{}", health::format_report(&report));
    }
    assert!(
        report.is_healthy() || buildinfo::info().is_none(),
        "Health checks failed: {} failures, {} warnings",
        report.failed,
        report.warned
    );
}

#[test]
fn test_config_check() {
    let check = ConfigCheck::new();
    let result = check.check();

    assert!(
        result.status.is_ok(),
        "Config check failed: {}",
        result.message
    );
}

#[test]
fn test_build_info_check_tracks_embedding() {
    let result = BuildInfoCheck::new().check();

    match buildinfo::info() {
        Some(_) => assert!(result.status.is_ok(), "{}", result.message),
        None => assert_eq!(result.status, CheckStatus::Fail),
    }
}

#[test]
fn test_platform_check() {
    let check = PlatformCheck::new();
    let result = check.check();

    assert!(
        result.status.is_ok(),
        "Platform check failed: {}",
        result.message
    );
}

#[test]
fn test_runner_collects_all_checks() {
    let report = HealthCheckRunner::new()
        .add_check(ConfigCheck::new())
        .add_check(PlatformCheck::with_target("plan9", "mips"))
        .run();

    assert_eq!(report.total, 2, "Expected 2 checks in report");
    assert_eq!(report.warned, 1);
    assert_eq!(report.exit_code(), 2);
}

#[test]
fn test_report_exit_codes() {
    let report = HealthCheckRunner::new()
        .add_check(BuildInfoCheck::with_info(None))
        .run();

    assert_eq!(report.failed, 1);
    assert_eq!(report.exit_code(), 1);
}
