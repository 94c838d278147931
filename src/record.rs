use serde::Deserialize;
use std::fmt;
use std::fs;
use std::path::Path;

use crate::error::{ProvisionError, Result};

/// Longest SSID an access point can advertise, in bytes.
pub const MAX_SSID_LEN: usize = 32;
/// Longest WPA2 passphrase, in bytes.
pub const MAX_PASSPHRASE_LEN: usize = 64;

/// Network name and passphrase handed to the firmware build.
#[derive(Deserialize, Clone, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct CredentialRecord {
    #[serde(rename = "ssid")]
    pub identifier: String,
    #[serde(rename = "passwd")]
    pub secret: String,
}

impl CredentialRecord {
    pub fn new(identifier: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            secret: secret.into(),
        }
    }

    pub fn from_json(path: &Path, contents: &str) -> Result<Self> {
        serde_json::from_str(contents).map_err(|source| ProvisionError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path).map_err(|source| ProvisionError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(path, &contents)
    }

    /// Warns about values a station could never use. Nothing is rejected.
    pub fn check_lengths(&self) {
        if self.identifier.len() > MAX_SSID_LEN {
            log::warn!(
                "SSID is {} bytes, access points advertise at most {MAX_SSID_LEN}",
                self.identifier.len()
            );
        }
        if self.secret.len() > MAX_PASSPHRASE_LEN {
            log::warn!(
                "password is {} bytes, WPA2 accepts at most {MAX_PASSPHRASE_LEN}",
                self.secret.len()
            );
        }
    }
}

impl fmt::Debug for CredentialRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CredentialRecord")
            .field("identifier", &self.identifier)
            .field("secret", &"<redacted>")
            .finish()
    }
}
