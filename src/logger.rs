//! `log` backend for build scripts and the CLI.
//!
//! Records go to stderr. Cargo hides build-script stderr unless the build
//! fails, so inside a build script with `WIFI_PROVISION_CARGO_WARNINGS=true`
//! warnings and errors are also printed as `cargo:warning=` lines, which
//! Cargo always shows. Outside a build script stdout belongs to the caller.

use log::{Level, LevelFilter, Log, Metadata, Record};
use std::env;
use std::io::{self, Write};

use crate::config::{is_truthy, CARGO_WARNINGS_VAR, LOG_LEVEL_VAR};

pub struct CargoLogger {
    level: LevelFilter,
    cargo_warnings: bool,
}

impl CargoLogger {
    pub fn new(level: LevelFilter, cargo_warnings: bool) -> Self {
        Self {
            level,
            cargo_warnings,
        }
    }

    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let level = lookup(LOG_LEVEL_VAR)
            .and_then(|level| level.parse().ok())
            .unwrap_or(LevelFilter::Info);
        // Cargo sets OUT_DIR only for build scripts
        let in_build_script = lookup("OUT_DIR").is_some();
        let cargo_warnings =
            in_build_script && lookup(CARGO_WARNINGS_VAR).is_some_and(|v| is_truthy(&v));
        Self::new(level, cargo_warnings)
    }

    /// Installs the logger once per process. Later calls keep the first one.
    pub fn initialize_default() {
        let logger = Self::from_env();
        let level = logger.level;
        if log::set_boxed_logger(Box::new(logger)).is_ok() {
            log::set_max_level(level);
        }
    }

    fn format(record: &Record) -> String {
        format!("[{}] {}", record.level(), record.args())
    }
}

impl Log for CargoLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let line = Self::format(record);
        let _ = writeln!(io::stderr().lock(), "{line}");
        if self.cargo_warnings && record.level() <= Level::Warn {
            println!("cargo:warning={line}");
        }
    }

    fn flush(&self) {
        let _ = io::stderr().flush();
    }
}
