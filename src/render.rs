//! Human-readable rendering of [`BuildInfo`]

use std::fmt::{self, Write as _};

use chrono::SecondsFormat;

use crate::build_info::{BuildInfo, Module};
use crate::tabwriter::TabWriter;

/// Rendering of an unset timestamp
const ZERO_TIME: &str = "0001-01-01T00:00:00Z";

/// Tag on the main module line
const MAIN_TAG: &str = "mod";

impl BuildInfo {
    /// Renders the record as tab-separated `label:\tvalue` lines, before alignment
    fn write_cells(&self, out: &mut String) -> fmt::Result {
        let time = self
            .time
            .map(|t| t.to_rfc3339_opts(SecondsFormat::Secs, true))
            .unwrap_or_else(|| ZERO_TIME.to_string());

        writeln!(out, "toolchain:\t{}", self.toolchain)?;
        writeln!(out, "path:\t{}", self.path)?;
        writeln!(out, "os:\t{}", self.os)?;
        writeln!(out, "arch:\t{}", self.arch)?;
        writeln!(out, "vcs:\t{}", self.vcs)?;
        writeln!(out, "version:\t{}", self.version)?;
        writeln!(out, "commit:\t{}", self.commit)?;
        writeln!(out, "dirty:\t{}", self.dirty)?;
        writeln!(out, "time:\t{}", time)?;
        writeln!(out, "main:\t{}", module_cells(MAIN_TAG, &self.main))?;

        // Sorted for reproducible output
        for (key, value) in self.sorted_settings() {
            writeln!(out, "{}:\t{}", key, value)?;
        }

        Ok(())
    }
}

impl fmt::Display for BuildInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut cells = String::new();
        self.write_cells(&mut cells)?;
        f.write_str(&TabWriter::default().align(&cells))
    }
}

fn module_cells(tag: &str, module: &Module) -> String {
    format!("{}\t{}\t{}\t{}", tag, module.path, module.version, module.sum)
}
