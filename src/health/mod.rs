//! Health checks for the embedded build metadata and its surroundings
//!
//! Useful as a CI gate: a release binary should carry complete metadata,
//! come from a clean tree and run on the platform it was built for.
//!
//! # Example
//!
//! ```no_run
//! use buildinfo::health::{HealthCheckRunner, checks::*};
//!
//! let report = HealthCheckRunner::new()
//!     .add_check(BuildInfoCheck::new())
//!     .add_check(PlatformCheck::new())
//!     .run();
//!
//! std::process::exit(report.exit_code().into());
//! ```

pub mod check;
pub mod checks;
pub mod reporter;
pub mod runner;

pub use check::{CheckResult, CheckStatus, SystemCheck};
pub use reporter::{format_report, print_report};
pub use runner::{HealthCheckReport, HealthCheckRunner};

/// Runs all built-in checks and returns a report
pub fn run_all_checks() -> HealthCheckReport {
    HealthCheckRunner::new()
        .add_check(checks::BuildInfoCheck::new())
        .add_check(checks::PlatformCheck::new())
        .add_check(checks::ConfigCheck::new())
        .run()
}
