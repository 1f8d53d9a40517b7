//! Platform health check

use sysinfo::System;

use crate::build_info;
use crate::health::check::{CheckResult, SystemCheck};

/// Checks that the binary runs on the platform it was built for
pub struct PlatformCheck {
    target_os: String,
    target_arch: String,
}

impl PlatformCheck {
    /// Compares against the target recorded in the embedded metadata
    pub fn new() -> Self {
        let info = build_info::info().unwrap_or_default();
        Self::with_target(info.os, info.arch)
    }

    pub fn with_target(os: impl Into<String>, arch: impl Into<String>) -> Self {
        Self {
            target_os: os.into(),
            target_arch: arch.into(),
        }
    }
}

impl Default for PlatformCheck {
    fn default() -> Self {
        Self::new()
    }
}

impl SystemCheck for PlatformCheck {
    fn name(&self) -> &'static str {
        "Platform"
    }

    fn description(&self) -> Option<&'static str> {
        Some("Compares the recorded build target with the running host")
    }

    fn check(&self) -> CheckResult {
        let (os, arch) = (std::env::consts::OS, std::env::consts::ARCH);

        let mut details = vec![
            format!("  Target: {}/{}", self.target_os, self.target_arch),
            format!("  Running: {}/{}", os, arch),
        ];

        let os_name = System::name().unwrap_or_else(|| "Unknown".to_string());
        let os_version = System::os_version().unwrap_or_else(|| "Unknown".to_string());
        details.push(format!("  OS: {} {}", os_name, os_version));
        if let Some(kernel) = System::kernel_version() {
            details.push(format!("  Kernel: {}", kernel));
        }
        if let Some(hostname) = System::host_name() {
            details.push(format!("  Hostname: {}", hostname));
        }

        let details = details.join("\n");

        if self.target_os.is_empty() || self.target_arch.is_empty() {
            return CheckResult::warn("Build target not recorded").with_details(details);
        }

        if self.target_os != os || self.target_arch != arch {
            return CheckResult::warn(format!(
                "Built for {}/{} but running on {}/{}",
                self.target_os, self.target_arch, os, arch
            ))
            .with_details(details);
        }

        CheckResult::pass(format!("{}/{}", os, arch)).with_details(details)
    }
}
