//! Built-in health checks

pub mod build_info;
pub mod config;
pub mod platform;

pub use build_info::BuildInfoCheck;
pub use config::ConfigCheck;
pub use platform::PlatformCheck;
