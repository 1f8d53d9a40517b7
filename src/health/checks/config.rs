//! Configuration health check

use crate::config::AppConfig;
use crate::health::check::{CheckResult, SystemCheck};

/// Checks that configuration can be loaded for all profiles
pub struct ConfigCheck {
    profiles: Vec<String>,
}

impl ConfigCheck {
    /// Creates a config check over the shipped profiles
    pub fn new() -> Self {
        Self::with_profiles(["default", "ci"])
    }

    pub fn with_profiles<I, S>(profiles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            profiles: profiles.into_iter().map(Into::into).collect(),
        }
    }
}

impl Default for ConfigCheck {
    fn default() -> Self {
        Self::new()
    }
}

impl SystemCheck for ConfigCheck {
    fn name(&self) -> &'static str {
        "Configuration"
    }

    fn description(&self) -> Option<&'static str> {
        Some("Validates configuration loading from files and environment")
    }

    fn check(&self) -> CheckResult {
        let mut details = Vec::new();
        let mut failed = 0;

        for profile in &self.profiles {
            match AppConfig::load(profile) {
                Ok(config) => details.push(format!(
                    "  ✓ Profile '{}': format {:?}, malformed settings {:?}",
                    profile, config.output.format, config.parse.malformed
                )),
                Err(e) => {
                    details.push(format!("  ✗ Profile '{}': failed to load - {}", profile, e));
                    failed += 1;
                }
            }
        }

        let details = details.join("\n");
        if failed > 0 {
            CheckResult::fail(format!("{} of {} profiles failed to load", failed, self.profiles.len()))
                .with_details(details)
        } else {
            CheckResult::pass(format!("{} profiles validated", self.profiles.len()))
                .with_details(details)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::health::CheckStatus;

    #[test]
    fn test_unknown_profiles_fall_back_to_defaults() {
        let result = ConfigCheck::with_profiles(["nope"]).check();
        assert_eq!(result.status, CheckStatus::Pass);
        assert_eq!(result.message, "1 profiles validated");
    }
}
