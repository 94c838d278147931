use std::path::PathBuf;

use crate::config::{ProvisionConfig, RunMode};
use crate::error::{ProvisionError, Result};
use crate::prompt::Prompter;
use crate::record::CredentialRecord;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CredentialSource {
    File(PathBuf),
    Prompt,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Provisioned {
    Credentials {
        record: CredentialRecord,
        source: CredentialSource,
    },
    /// Integration dump: nothing was read and nothing should be emitted.
    Skipped,
}

impl Provisioned {
    pub fn record(&self) -> Option<&CredentialRecord> {
        match self {
            Provisioned::Credentials { record, .. } => Some(record),
            Provisioned::Skipped => None,
        }
    }

    pub fn into_record(self) -> Option<CredentialRecord> {
        match self {
            Provisioned::Credentials { record, .. } => Some(record),
            Provisioned::Skipped => None,
        }
    }
}

/// Gets the WiFi credentials for this build, from the credentials file when
/// it exists and from the operator otherwise.
///
/// A broken credentials file is fatal; the operator is only asked when the
/// file is missing altogether.
pub fn obtain_credentials<P: Prompter + ?Sized>(
    config: &ProvisionConfig,
    prompter: &mut P,
) -> Result<Provisioned> {
    if config.mode == RunMode::IntegrationDump {
        log::debug!("integration dump, not provisioning credentials");
        return Ok(Provisioned::Skipped);
    }

    let path = config.credentials_path();
    let (record, source) = if path.exists() {
        log::info!("{} found", path.display());
        let record = CredentialRecord::load(path)?;
        (record, CredentialSource::File(path.to_path_buf()))
    } else {
        log::info!("{} cannot be found", path.display());
        log::info!("Provide your network credentials");
        let identifier = prompter.read_line("SSID:").map_err(ProvisionError::Prompt)?;
        let secret = prompter
            .read_secret("Password:")
            .map_err(ProvisionError::Prompt)?;
        (CredentialRecord::new(identifier, secret), CredentialSource::Prompt)
    };

    record.check_lengths();
    Ok(Provisioned::Credentials { record, source })
}
