//! Application configuration
//!
//! Supports multiple profiles with different settings.

use std::path::PathBuf;

use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};

use crate::build_info::MalformedPolicy;

/// Output format for `buildinfo show`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Aligned `label: value` lines
    #[default]
    Text,
    /// Pretty-printed JSON
    Json,
}

/// Output configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Default format when none is given on the command line
    #[serde(default)]
    pub format: OutputFormat,
    /// Whether to color the health report
    #[serde(default = "default_color")]
    pub color: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::Text,
            color: default_color(),
        }
    }
}

fn default_color() -> bool {
    true
}

/// Settings classification configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ParseConfig {
    /// What happens to `vcs.time`/`vcs.modified` values that fail to parse
    #[serde(default)]
    pub malformed: MalformedPolicy,
}

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// The active profile
    pub profile: String,
    /// Output configuration
    #[serde(default)]
    pub output: OutputConfig,
    /// Settings classification configuration
    #[serde(default)]
    pub parse: ParseConfig,
}

impl AppConfig {
    /// Name of the profile used when none is given
    pub const DEFAULT_PROFILE: &'static str = "default";

    /// Loads configuration based on the specified profile
    ///
    /// Sources, later ones overriding earlier ones:
    /// 1. config/default.toml
    /// 2. config/{profile}.toml
    /// 3. Environment variables with prefix BUILDINFO_ (e.g., BUILDINFO_OUTPUT__FORMAT=json)
    ///
    /// Config files are searched for next to the executable, then in ./config.
    /// Missing files are not an error.
    pub fn load(profile: &str) -> Result<Self, ConfigError> {
        let config_dir = Self::find_config_dir().unwrap_or_else(|| PathBuf::from("config"));

        let mut builder = Config::builder()
            .add_source(File::from(config_dir.join(Self::DEFAULT_PROFILE)).required(false));

        if profile != Self::DEFAULT_PROFILE {
            builder = builder.add_source(File::from(config_dir.join(profile)).required(false));
        }

        // Use __ as separator for nested fields (e.g., BUILDINFO_PARSE__MALFORMED)
        let config = builder
            .add_source(
                Environment::with_prefix("BUILDINFO")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .set_override("profile", profile)?
            .build()?;

        config.try_deserialize()
    }

    /// Finds the config directory by searching in multiple locations
    fn find_config_dir() -> Option<PathBuf> {
        if let Ok(exe_path) = std::env::current_exe()
            && let Some(exe_dir) = exe_path.parent()
        {
            let config_dir = exe_dir.join("config");
            if config_dir.exists() {
                return Some(config_dir);
            }
        }

        let cwd_config = PathBuf::from("config");
        if cwd_config.exists() {
            return Some(cwd_config);
        }

        None
    }

    /// Loads configuration using the BUILDINFO_PROFILE environment variable,
    /// defaulting to "default"
    pub fn load_from_env() -> Result<Self, ConfigError> {
        let profile = std::env::var("BUILDINFO_PROFILE")
            .unwrap_or_else(|_| Self::DEFAULT_PROFILE.to_string());
        Self::load(&profile)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            profile: Self::DEFAULT_PROFILE.to_string(),
            output: OutputConfig::default(),
            parse: ParseConfig::default(),
        }
    }
}
