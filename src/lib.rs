//! buildinfo
//!
//! Extracts the build metadata embedded in a binary (toolchain, target,
//! module version, VCS commit and state) and renders it as aligned text or
//! JSON.
//!
//! ```
//! if let Some(info) = buildinfo::info() {
//!     println!("{}", info);
//! }
//! ```

/// Build information record and settings classification
pub mod build_info;

/// Application configuration
pub mod config;

pub mod error;

/// Health checks over the embedded metadata
pub mod health;

/// Raw build metadata as reported by the host
pub mod raw;

mod render;

pub mod tabwriter;

pub use build_info::{BuildInfo, MalformedPolicy, Module, info, info_with};
pub use error::{Error, Result};
pub use raw::{BuildSetting, RawBuildInfo, RawModule};
