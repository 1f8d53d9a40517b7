//! Build information health check

use crate::build_info::{self, BuildInfo};
use crate::health::check::{CheckResult, SystemCheck};

/// Checks that build metadata is embedded and complete
pub struct BuildInfoCheck {
    info: Option<BuildInfo>,
}

impl BuildInfoCheck {
    /// Checks the metadata embedded in the running binary
    pub fn new() -> Self {
        Self::with_info(build_info::info())
    }

    /// Checks the given record, `None` meaning nothing was embedded
    pub fn with_info(info: Option<BuildInfo>) -> Self {
        Self { info }
    }
}

impl Default for BuildInfoCheck {
    fn default() -> Self {
        Self::new()
    }
}

impl SystemCheck for BuildInfoCheck {
    fn name(&self) -> &'static str {
        "Build Info"
    }

    fn description(&self) -> Option<&'static str> {
        Some("Validates embedded build metadata (toolchain, target, VCS)")
    }

    fn check(&self) -> CheckResult {
        let Some(info) = &self.info else {
            return CheckResult::fail("No build metadata embedded");
        };

        let details = info
            .to_string()
            .lines()
            .map(|line| format!("  {}", line.trim_end()))
            .collect::<Vec<_>>()
            .join("\n");

        let mut problems = Vec::new();
        if info.toolchain.is_empty() {
            problems.push("toolchain unknown");
        }
        if info.vcs.is_empty() || info.commit.is_empty() {
            problems.push("no VCS information");
        } else if info.time.is_none() {
            problems.push("commit time not reported");
        }
        if info.dirty {
            problems.push("built from a modified tree");
        }

        if problems.is_empty() {
            let commit: String = info.commit.chars().take(12).collect();
            CheckResult::pass(format!("{} @ {}", info.version, commit)).with_details(details)
        } else {
            CheckResult::warn(problems.join(", ")).with_details(details)
        }
    }
}
