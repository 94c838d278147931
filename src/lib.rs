//! Build-time WiFi credential provisioning.
//!
//! A firmware crate calls [`provision_build_script`] from its `build.rs`:
//!
//! ```no_run
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     wifi_provision::provision_build_script()?;
//!     Ok(())
//! }
//! ```
//!
//! and reads the values with `env!("EXAMPLE_WIFI_SSID")` and
//! `env!("EXAMPLE_WIFI_PASSWORD")`. Credentials come from `credentials.json`
//! when it exists; otherwise the operator is asked for them.

pub mod config;
pub mod defines;
pub mod error;
pub mod logger;
pub mod prompt;
pub mod provision;
pub mod record;

use std::io::{self, Write};

pub use config::{ProvisionConfig, RunMode};
pub use defines::{write_rerun_directives, BuildDefines, PASSWORD_DEFINE, SSID_DEFINE};
pub use error::{ProvisionError, Result};
pub use logger::CargoLogger;
pub use prompt::{OperatorPrompter, Prompter, ReaderPrompter, TerminalPrompter};
pub use provision::{obtain_credentials, CredentialSource, Provisioned};
pub use record::CredentialRecord;

/// Provisions credentials, prompting on the configured terminal when one can
/// be opened and on stdin otherwise.
pub fn obtain_credentials_interactive(config: &ProvisionConfig) -> Result<Provisioned> {
    let mut prompter = OperatorPrompter::detect(config.terminal.as_deref());
    obtain_credentials(config, &mut prompter)
}

/// Everything a `build.rs` needs: logging, configuration from the
/// environment, provisioning, and `cargo:` directives on stdout.
pub fn provision_build_script() -> Result<()> {
    CargoLogger::initialize_default();

    let config = ProvisionConfig::from_env();
    let mut prompter = OperatorPrompter::detect(config.terminal.as_deref());
    let stdout = io::stdout();
    let mut out = stdout.lock();
    write_build_script_output(&config, &mut prompter, &mut out)?;
    out.flush()?;
    Ok(())
}

/// Writes what a build script prints to Cargo. The rebuild triggers come
/// first and are written even when provisioning is skipped.
pub fn write_build_script_output<P, W>(
    config: &ProvisionConfig,
    prompter: &mut P,
    out: &mut W,
) -> Result<Provisioned>
where
    P: Prompter + ?Sized,
    W: Write,
{
    write_rerun_directives(out, config)?;
    let provisioned = obtain_credentials(config, prompter)?;
    match &provisioned {
        Provisioned::Credentials { record, .. } => {
            BuildDefines::from_record(record).write_rustc_env(out)?;
        }
        Provisioned::Skipped => {
            log::info!("integration dump, WiFi credentials not provisioned");
        }
    }
    Ok(provisioned)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::io::Cursor;
    use tempfile::TempDir;

    fn build_script_run(config: &ProvisionConfig, answers: &str) -> (Result<Provisioned>, String) {
        let mut prompter = ReaderPrompter::new(Cursor::new(answers.to_string()), io::sink());
        let mut out = Vec::new();
        let result = write_build_script_output(config, &mut prompter, &mut out);
        (result, String::from_utf8(out).unwrap())
    }

    #[test]
    fn skipped_run_still_registers_rebuild_triggers() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("credentials.json");
        fs::write(&path, r#"{"ssid": "net", "passwd": "pw"}"#).unwrap();

        let dump = ProvisionConfig::new(&path).with_mode(RunMode::IntegrationDump);
        let (result, output) = build_script_run(&dump, "");
        assert_eq!(result.unwrap(), Provisioned::Skipped);
        assert!(output.contains(&format!("cargo:rerun-if-changed={}\n", path.display())));
        assert!(output.contains("cargo:rerun-if-env-changed=WIFI_PROVISION_INTEGRATION_DUMP\n"));
        assert!(!output.contains("rustc-env"));

        let build = ProvisionConfig::new(&path);
        let (result, output) = build_script_run(&build, "");
        assert!(result.unwrap().record().is_some());
        assert!(output.contains("cargo:rerun-if-env-changed=WIFI_PROVISION_INTEGRATION_DUMP\n"));
        assert!(output.ends_with(
            "cargo:rustc-env=EXAMPLE_WIFI_SSID=net\n\
             cargo:rustc-env=EXAMPLE_WIFI_PASSWORD=pw\n"
        ));
    }

    #[test]
    fn prompted_values_become_rustc_env() {
        let dir = TempDir::new().unwrap();
        let config = ProvisionConfig::new(dir.path().join("credentials.json")).with_terminal(None);
        let (result, output) = build_script_run(&config, "net\npw\n");
        assert!(matches!(
            result.unwrap(),
            Provisioned::Credentials { source: CredentialSource::Prompt, .. }
        ));
        assert!(output.ends_with("cargo:rustc-env=EXAMPLE_WIFI_PASSWORD=pw\n"));
    }

    #[test]
    fn parse_error_aborts_after_rebuild_triggers() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("credentials.json");
        fs::write(&path, "{").unwrap();

        let (result, output) = build_script_run(&ProvisionConfig::new(&path), "net\npw\n");
        assert!(matches!(result, Err(ProvisionError::Parse { .. })));
        assert!(output.starts_with("cargo:rerun-if-changed="));
        assert!(!output.contains("rustc-env"));
    }
}
