//! Build information record
//!
//! [`BuildInfo`] promotes the well-known build settings of a [`RawBuildInfo`]
//! to named fields (OS, architecture, VCS, commit, commit time, dirty flag)
//! and keeps every other setting in a residual map.
//!
//! Serialization omits fields that hold their zero value, so records from
//! binaries without VCS information stay compact.

use chrono::{DateTime, FixedOffset, SecondsFormat};
use indexmap::IndexMap;
use serde::{Serialize, Serializer};
use tracing::debug;

use crate::raw::{self, RawBuildInfo, RawModule, keys};

/// What to do with a well-known setting whose value fails to parse
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MalformedPolicy {
    /// Drop the setting entirely
    #[default]
    Drop,
    /// Keep the raw value in the residual settings under its original key
    Preserve,
}

/// A single module included in a build
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Module {
    /// Module path
    #[serde(skip_serializing_if = "String::is_empty")]
    pub path: String,
    /// Module version
    #[serde(skip_serializing_if = "String::is_empty")]
    pub version: String,
    /// Checksum
    #[serde(skip_serializing_if = "String::is_empty")]
    pub sum: String,
}

impl Module {
    /// Returns true if no field is set
    pub fn is_empty(&self) -> bool {
        self.path.is_empty() && self.version.is_empty() && self.sum.is_empty()
    }
}

impl From<&RawModule> for Module {
    fn from(raw: &RawModule) -> Self {
        Self {
            path: raw.path.clone(),
            version: raw.version.clone(),
            sum: raw.sum.clone(),
        }
    }
}

/// Build information of a binary
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BuildInfo {
    /// The main module
    #[serde(skip_serializing_if = "Module::is_empty")]
    pub main: Module,
    /// The commit time associated with `commit`
    #[serde(
        skip_serializing_if = "Option::is_none",
        serialize_with = "serialize_time"
    )]
    pub time: Option<DateTime<FixedOffset>>,
    /// Settings that have no named field
    #[serde(
        skip_serializing_if = "IndexMap::is_empty",
        serialize_with = "serialize_sorted"
    )]
    pub settings: IndexMap<String, String>,
    /// Toolchain version used to build the binary
    #[serde(skip_serializing_if = "String::is_empty")]
    pub toolchain: String,
    /// Package path of the main package
    #[serde(skip_serializing_if = "String::is_empty")]
    pub path: String,
    /// Target operating system
    #[serde(skip_serializing_if = "String::is_empty")]
    pub os: String,
    /// Target architecture
    #[serde(skip_serializing_if = "String::is_empty")]
    pub arch: String,
    /// Version control system of the source tree
    #[serde(skip_serializing_if = "String::is_empty")]
    pub vcs: String,
    /// Revision of the source tree when the build ran
    #[serde(skip_serializing_if = "String::is_empty")]
    pub commit: String,
    /// Main module version
    #[serde(skip_serializing_if = "String::is_empty")]
    pub version: String,
    /// Whether the source tree had local modifications
    #[serde(skip_serializing_if = "is_false")]
    pub dirty: bool,
}

impl BuildInfo {
    /// Classifies a raw record, dropping malformed well-known settings
    pub fn from_raw(raw: &RawBuildInfo) -> Self {
        Self::from_raw_with(raw, MalformedPolicy::Drop)
    }

    /// Classifies a raw record in a single pass over its settings
    pub fn from_raw_with(raw: &RawBuildInfo, policy: MalformedPolicy) -> Self {
        let mut info = Self {
            main: Module::from(&raw.main),
            toolchain: raw.toolchain.clone(),
            path: raw.path.clone(),
            version: raw.main.version.clone(),
            settings: IndexMap::with_capacity(raw.settings.len()),
            ..Self::default()
        };

        for setting in &raw.settings {
            let value = setting.value.as_str();
            match setting.key.as_str() {
                keys::OS => info.os = value.to_string(),
                keys::ARCH => info.arch = value.to_string(),
                keys::VCS => info.vcs = value.to_string(),
                keys::REVISION => info.commit = value.to_string(),
                keys::TIME => match parse_time(value) {
                    Some(time) => {
                        info.time = Some(time);
                        info.settings.shift_remove(keys::TIME);
                    }
                    None => info.malformed(&setting.key, value, policy, "invalid RFC 3339 time"),
                },
                keys::MODIFIED => match parse_bool(value) {
                    Some(dirty) => {
                        info.dirty = dirty;
                        info.settings.shift_remove(keys::MODIFIED);
                    }
                    None => info.malformed(&setting.key, value, policy, "invalid boolean"),
                },
                key => {
                    info.settings.insert(key.to_string(), value.to_string());
                }
            }
        }

        info
    }

    fn malformed(&mut self, key: &str, value: &str, policy: MalformedPolicy, reason: &str) {
        debug!(key, value, reason, ?policy, "Malformed build setting");
        if policy == MalformedPolicy::Preserve {
            // The key lives in exactly one place: the last occurrence decides
            match key {
                keys::TIME => self.time = None,
                keys::MODIFIED => self.dirty = false,
                _ => {}
            }
            self.settings.insert(key.to_string(), value.to_string());
        }
    }

    /// Residual settings sorted by key
    pub fn sorted_settings(&self) -> Vec<(&str, &str)> {
        let mut settings: Vec<_> = self
            .settings
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
            .collect();
        settings.sort_unstable_by(|a, b| a.0.cmp(b.0));
        settings
    }
}

/// Returns the build information of the current binary
///
/// Returns `None` if the binary was built without embedded metadata; this is
/// a normal outcome, not an error.
pub fn info() -> Option<BuildInfo> {
    info_with(MalformedPolicy::Drop)
}

/// Like [`info`], with an explicit policy for malformed settings
pub fn info_with(policy: MalformedPolicy) -> Option<BuildInfo> {
    raw::read().map(|raw| BuildInfo::from_raw_with(&raw, policy))
}

const TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f%:z";

/// Parses an RFC 3339 timestamp as strictly as Go's `time.RFC3339` layout
///
/// chrono's own RFC 3339 parser also takes a space or lowercase separators,
/// unpadded fields and leap seconds; none of those are accepted here.
fn parse_time(value: &str) -> Option<DateTime<FixedOffset>> {
    let head = value.as_bytes().get(..19)?;
    let well_formed = head
        .iter()
        .zip(b"0000-00-00T00:00:00")
        .all(|(&c, &layout)| match layout {
            b'0' => c.is_ascii_digit(),
            _ => c == layout,
        });
    if !well_formed || head[17] > b'5' {
        return None;
    }

    let time = match value.strip_suffix('Z') {
        Some(utc) => DateTime::parse_from_str(&format!("{utc}+00:00"), TIME_FORMAT),
        None if value.len() > 22 && value.as_bytes()[value.len() - 3] == b':' => {
            DateTime::parse_from_str(value, TIME_FORMAT)
        }
        None => return None,
    };
    time.ok()
}

/// Formats a timestamp like Go's `time.RFC3339Nano`: the fraction loses its
/// trailing zeros and disappears entirely on whole seconds
fn format_time(time: &DateTime<FixedOffset>) -> String {
    let formatted = time.to_rfc3339_opts(SecondsFormat::Nanos, true);
    let Some((seconds, rest)) = formatted.split_once('.') else {
        return formatted;
    };

    let digits = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    let (fraction, offset) = rest.split_at(digits);
    match fraction.trim_end_matches('0') {
        "" => format!("{seconds}{offset}"),
        fraction => format!("{seconds}.{fraction}{offset}"),
    }
}

/// Parses a boolean the way Go's `strconv.ParseBool` does
fn parse_bool(value: &str) -> Option<bool> {
    match value {
        "1" | "t" | "T" | "TRUE" | "true" | "True" => Some(true),
        "0" | "f" | "F" | "FALSE" | "false" | "False" => Some(false),
        _ => None,
    }
}

fn is_false(value: &bool) -> bool {
    !*value
}

fn serialize_time<S: Serializer>(
    time: &Option<DateTime<FixedOffset>>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    match time {
        Some(time) => serializer.serialize_str(&format_time(time)),
        None => serializer.serialize_none(),
    }
}

fn serialize_sorted<S: Serializer>(
    settings: &IndexMap<String, String>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.collect_map(settings.iter().collect::<std::collections::BTreeMap<_, _>>())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::raw::BuildSetting;

    fn raw_with(settings: &[(&str, &str)]) -> RawBuildInfo {
        RawBuildInfo {
            toolchain: "go1.23.2".to_string(),
            path: "github.com/SomeGuy/project".to_string(),
            main: RawModule {
                path: "github.com/SomeGuy/project".to_string(),
                version: "v1.2.3".to_string(),
                sum: "WwdigHlEGoXEzt8n/VGpqrNkD3j5gHsqBjYduqTqRE0=".to_string(),
            },
            settings: settings
                .iter()
                .map(|(k, v)| BuildSetting::new(*k, *v))
                .collect(),
        }
    }

    #[test]
    fn test_parse_bool() {
        for value in ["1", "t", "T", "TRUE", "true", "True"] {
            assert_eq!(parse_bool(value), Some(true), "{}", value);
        }
        for value in ["0", "f", "F", "FALSE", "false", "False"] {
            assert_eq!(parse_bool(value), Some(false), "{}", value);
        }
        for value in ["", "yes", "tRuE", "notabool", "2"] {
            assert_eq!(parse_bool(value), None, "{}", value);
        }
    }

    #[test]
    fn test_version_duplicates_main_version() {
        let info = BuildInfo::from_raw(&raw_with(&[]));
        assert_eq!(info.version, "v1.2.3");
        assert_eq!(info.main.version, info.version);
        assert!(info.settings.is_empty());
        assert_eq!(info.time, None);
        assert!(!info.dirty);
    }

    #[test]
    fn test_duplicate_residual_key_last_wins() {
        let info = BuildInfo::from_raw(&raw_with(&[("-tags", "a"), ("-tags", "b")]));
        assert_eq!(info.settings.len(), 1);
        assert_eq!(info.settings["-tags"], "b");
    }

    #[test]
    fn test_residual_keeps_insertion_order() {
        let info = BuildInfo::from_raw(&raw_with(&[("b", "2"), ("GOOS", "linux"), ("a", "1")]));
        let keys: Vec<_> = info.settings.keys().map(String::as_str).collect();
        assert_eq!(keys, ["b", "a"]);
        assert_eq!(info.sorted_settings(), vec![("a", "1"), ("b", "2")]);
    }

    #[test]
    fn test_preserve_policy_keeps_malformed_values() {
        let raw = raw_with(&[("vcs.time", "yesterday"), ("vcs.modified", "maybe")]);
        let info = BuildInfo::from_raw_with(&raw, MalformedPolicy::Preserve);
        assert_eq!(info.time, None);
        assert!(!info.dirty);
        assert_eq!(info.settings["vcs.time"], "yesterday");
        assert_eq!(info.settings["vcs.modified"], "maybe");
    }

    #[test]
    fn test_preserve_policy_leaves_valid_values_alone() {
        let raw = raw_with(&[("vcs.time", "2024-10-06T10:39:12Z"), ("vcs.modified", "false")]);
        let info = BuildInfo::from_raw_with(&raw, MalformedPolicy::Preserve);
        assert!(info.time.is_some());
        assert!(info.settings.is_empty());
    }

    #[test]
    fn test_preserve_policy_later_valid_value_wins() {
        let raw = raw_with(&[
            ("vcs.time", "bad"),
            ("vcs.time", "2024-10-06T10:39:12Z"),
            ("vcs.modified", "maybe"),
            ("vcs.modified", "true"),
        ]);
        let info = BuildInfo::from_raw_with(&raw, MalformedPolicy::Preserve);
        assert!(info.time.is_some());
        assert!(info.dirty);
        assert!(!info.settings.contains_key("vcs.time"));
        assert!(!info.settings.contains_key("vcs.modified"));
    }

    #[test]
    fn test_preserve_policy_later_bad_value_is_kept() {
        let raw = raw_with(&[
            ("vcs.time", "2024-10-06T10:39:12Z"),
            ("vcs.time", "bad"),
            ("vcs.modified", "true"),
            ("vcs.modified", "maybe"),
        ]);
        let info = BuildInfo::from_raw_with(&raw, MalformedPolicy::Preserve);
        assert_eq!(info.time, None);
        assert!(!info.dirty);
        assert_eq!(info.settings["vcs.time"], "bad");
        assert_eq!(info.settings["vcs.modified"], "maybe");

        // Dropping leaves the earlier valid values in place
        let info = BuildInfo::from_raw(&raw);
        assert!(info.time.is_some());
        assert!(info.dirty);
        assert!(info.settings.is_empty());
    }

    #[test]
    fn test_parse_time_strict() {
        for value in [
            "2024-10-06T10:39:12Z",
            "2024-10-06T10:39:12.5Z",
            "2024-10-06T10:39:12.123456789+02:00",
            "2024-10-06T10:39:12-07:30",
        ] {
            assert!(parse_time(value).is_some(), "{}", value);
        }
        for value in [
            "",
            "2024-10-06",
            "2024-10-06 10:39:12Z",
            "2024-10-06t10:39:12Z",
            "2024-10-06T10:39:12z",
            "2024-10-06T23:59:60Z",
            "2024-1-06T10:39:12Z",
            "2024-10-06T10:39:12",
            "2024-10-06T10:39:12+0200",
            "2024-10-06T10:39:12+02",
            "2024-13-06T10:39:12Z",
        ] {
            assert!(parse_time(value).is_none(), "{}", value);
        }
    }

    #[test]
    fn test_format_time_trims_fraction() {
        let whole = parse_time("2024-10-06T15:39:24Z").unwrap();
        assert_eq!(format_time(&whole), "2024-10-06T15:39:24Z");

        let millis = parse_time("2024-10-06T15:39:24.120+02:00").unwrap();
        assert_eq!(format_time(&millis), "2024-10-06T15:39:24.12+02:00");

        let nanos = parse_time("2024-10-06T15:39:24.000000100Z").unwrap();
        assert_eq!(format_time(&nanos), "2024-10-06T15:39:24.0000001Z");
    }

    #[test]
    fn test_time_keeps_offset() {
        let info = BuildInfo::from_raw(&raw_with(&[("vcs.time", "2024-10-06T12:39:12+02:00")]));
        let time = info.time.unwrap();
        assert_eq!(time.offset().local_minus_utc(), 2 * 3600);
        assert_eq!(time.timestamp(), 1_728_211_152);
    }

    #[test]
    fn test_module_is_empty() {
        assert!(Module::default().is_empty());
        let module = Module {
            sum: "h1:abc=".to_string(),
            ..Module::default()
        };
        assert!(!module.is_empty());
    }

    #[test]
    fn test_no_embedded_metadata_means_no_info() {
        let info = raw::read_with(|_| None).map(|raw| BuildInfo::from_raw(&raw));
        assert_eq!(info, None);
    }

    #[test]
    fn test_info_matches_raw_read() {
        match (info(), raw::read()) {
            (Some(info), Some(raw)) => assert_eq!(info, BuildInfo::from_raw(&raw)),
            (None, None) => {}
            _ => panic!("info() and raw::read() disagree about embedded metadata"),
        }
    }

    #[test]
    fn test_malformed_policy_deserializes_lowercase() {
        let policy: MalformedPolicy = serde_json::from_str("\"preserve\"").unwrap();
        assert_eq!(policy, MalformedPolicy::Preserve);
    }
}
