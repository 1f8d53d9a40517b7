//! Raw build metadata as reported by the host
//!
//! A [`RawBuildInfo`] is the flat, unclassified record: toolchain version,
//! package path, main module and an ordered list of key/value settings. It is
//! produced either by [`read`], from the values the build script embedded into
//! this binary, or by loading a JSON dump such as the output of
//! `go version -m -json <binary>`.
//!
//! Setting keys use the Go build-setting vocabulary (`GOOS`, `vcs.revision`,
//! ...) so records from either toolchain classify identically.

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::{Error, Result};

/// Setting keys that are promoted to named fields of a [`BuildInfo`](crate::BuildInfo)
pub mod keys {
    /// Target operating system
    pub const OS: &str = "GOOS";
    /// Target architecture
    pub const ARCH: &str = "GOARCH";
    /// Version control system kind (e.g. `git`)
    pub const VCS: &str = "vcs";
    /// Commit identifier
    pub const REVISION: &str = "vcs.revision";
    /// Commit time, RFC 3339
    pub const TIME: &str = "vcs.time";
    /// Whether the tree had local modifications
    pub const MODIFIED: &str = "vcs.modified";
}

/// Placeholder vergen emits when a value could not be determined
const VERGEN_PLACEHOLDER: &str = "VERGEN_IDEMPOTENT_OUTPUT";

/// A single build setting
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct BuildSetting {
    #[serde(rename = "Key", alias = "key")]
    pub key: String,
    #[serde(rename = "Value", alias = "value", default)]
    pub value: String,
}

impl BuildSetting {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// A module as reported by the host
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RawModule {
    #[serde(rename = "Path", alias = "path", default)]
    pub path: String,
    #[serde(rename = "Version", alias = "version", default)]
    pub version: String,
    #[serde(rename = "Sum", alias = "sum", default)]
    pub sum: String,
}

/// Unclassified build metadata
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RawBuildInfo {
    /// Toolchain version used to build the binary
    #[serde(rename = "GoVersion", alias = "toolchain", default)]
    pub toolchain: String,
    /// Package path of the main package
    #[serde(rename = "Path", alias = "path", default)]
    pub path: String,
    /// The main module
    #[serde(rename = "Main", alias = "main", default)]
    pub main: RawModule,
    /// Settings in the order the host reported them
    #[serde(rename = "Settings", alias = "settings", default)]
    pub settings: Vec<BuildSetting>,
}

impl RawBuildInfo {
    /// Parses a raw record from JSON
    ///
    /// Accepts the layout printed by `go version -m -json`; fields this crate
    /// does not use (`Deps`, `Replace`, ...) are ignored.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reads and parses a raw record from a JSON file
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&contents)
    }
}

/// Reads the build metadata embedded into this binary at compile time
///
/// Returns `None` when the binary was built without embedded metadata
/// (`BUILDINFO_DISABLE` set at build time).
pub fn read() -> Option<RawBuildInfo> {
    read_with(embedded)
}

/// Builds the raw record from build-script variables resolved by `lookup`
///
/// [`read`] resolves them against the values compiled into this binary;
/// any other source of the same variables (a captured build environment,
/// a fixture) works the same way.
pub fn read_with<'a>(lookup: impl Fn(&str) -> Option<&'a str>) -> Option<RawBuildInfo> {
    lookup("BUILDINFO_EMBEDDED")?;
    let semver = known(lookup("VERGEN_RUSTC_SEMVER"))?;

    let mut settings = Vec::new();
    push(&mut settings, "-compiler", Some("rustc"));
    push(&mut settings, "-channel", lookup("VERGEN_RUSTC_CHANNEL"));
    push(&mut settings, "-opt-level", lookup("VERGEN_CARGO_OPT_LEVEL"));
    push(&mut settings, "-debug", lookup("VERGEN_CARGO_DEBUG"));
    push(&mut settings, "-features", lookup("VERGEN_CARGO_FEATURES"));
    push(&mut settings, "HOST", lookup("VERGEN_RUSTC_HOST_TRIPLE"));
    push(&mut settings, "TARGET", lookup("VERGEN_CARGO_TARGET_TRIPLE"));
    push(&mut settings, keys::OS, lookup("BUILDINFO_TARGET_OS"));
    push(&mut settings, keys::ARCH, lookup("BUILDINFO_TARGET_ARCH"));

    // Only claim a VCS when git actually answered
    if let Some(sha) = known(lookup("VERGEN_GIT_SHA")) {
        push(&mut settings, keys::VCS, Some("git"));
        push(&mut settings, keys::REVISION, Some(sha));
        push(&mut settings, keys::TIME, lookup("VERGEN_GIT_COMMIT_TIMESTAMP"));
        push(&mut settings, keys::MODIFIED, lookup("VERGEN_GIT_DIRTY"));
    }

    push(&mut settings, "build.timestamp", lookup("VERGEN_BUILD_TIMESTAMP"));

    let name = env!("CARGO_PKG_NAME");
    let module_path = match env!("CARGO_PKG_REPOSITORY") {
        "" => name,
        repository => repository,
    };

    Some(RawBuildInfo {
        toolchain: format!("rustc {}", semver),
        path: name.to_string(),
        main: RawModule {
            path: module_path.to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            sum: String::new(),
        },
        settings,
    })
}

/// Values the build script set for this crate
fn embedded(name: &str) -> Option<&'static str> {
    match name {
        "BUILDINFO_EMBEDDED" => option_env!("BUILDINFO_EMBEDDED"),
        "BUILDINFO_TARGET_OS" => option_env!("BUILDINFO_TARGET_OS"),
        "BUILDINFO_TARGET_ARCH" => option_env!("BUILDINFO_TARGET_ARCH"),
        "VERGEN_RUSTC_SEMVER" => option_env!("VERGEN_RUSTC_SEMVER"),
        "VERGEN_RUSTC_CHANNEL" => option_env!("VERGEN_RUSTC_CHANNEL"),
        "VERGEN_RUSTC_HOST_TRIPLE" => option_env!("VERGEN_RUSTC_HOST_TRIPLE"),
        "VERGEN_CARGO_OPT_LEVEL" => option_env!("VERGEN_CARGO_OPT_LEVEL"),
        "VERGEN_CARGO_DEBUG" => option_env!("VERGEN_CARGO_DEBUG"),
        "VERGEN_CARGO_FEATURES" => option_env!("VERGEN_CARGO_FEATURES"),
        "VERGEN_CARGO_TARGET_TRIPLE" => option_env!("VERGEN_CARGO_TARGET_TRIPLE"),
        "VERGEN_GIT_SHA" => option_env!("VERGEN_GIT_SHA"),
        "VERGEN_GIT_COMMIT_TIMESTAMP" => option_env!("VERGEN_GIT_COMMIT_TIMESTAMP"),
        "VERGEN_GIT_DIRTY" => option_env!("VERGEN_GIT_DIRTY"),
        "VERGEN_BUILD_TIMESTAMP" => option_env!("VERGEN_BUILD_TIMESTAMP"),
        _ => None,
    }
}

fn known(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty() && *v != VERGEN_PLACEHOLDER)
}

fn push(settings: &mut Vec<BuildSetting>, key: &str, value: Option<&str>) {
    if let Some(value) = known(value) {
        settings.push(BuildSetting::new(key, value));
    }
}
