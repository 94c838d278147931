//! Turns a [`CredentialRecord`] into definitions a build can consume.

use std::fmt::Write as _;
use std::io::Write;

use crate::config::{ProvisionConfig, INTEGRATION_DUMP_VAR, PATH_VAR, TERMINAL_VAR};
use crate::error::{ProvisionError, Result};
use crate::record::CredentialRecord;

pub const SSID_DEFINE: &str = "EXAMPLE_WIFI_SSID";
pub const PASSWORD_DEFINE: &str = "EXAMPLE_WIFI_PASSWORD";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Define<'a> {
    pub name: &'static str,
    pub value: &'a str,
}

#[derive(Debug, Clone, Copy)]
pub struct BuildDefines<'a> {
    defines: [Define<'a>; 2],
}

impl<'a> BuildDefines<'a> {
    pub fn from_record(record: &'a CredentialRecord) -> Self {
        Self {
            defines: [
                Define {
                    name: SSID_DEFINE,
                    value: &record.identifier,
                },
                Define {
                    name: PASSWORD_DEFINE,
                    value: &record.secret,
                },
            ],
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Define<'a>> {
        self.defines.iter()
    }

    /// One `rustc-env` directive per definition, so the crate can use `env!`.
    /// Nothing is written if any value cannot be carried by a directive.
    pub fn write_rustc_env<W: Write>(&self, out: &mut W) -> Result<()> {
        for define in self.iter() {
            if define.value.contains(['\n', '\r']) {
                return Err(ProvisionError::Directive { name: define.name });
            }
        }
        for define in self.iter() {
            writeln!(out, "cargo:rustc-env={}={}", define.name, define.value)?;
        }
        Ok(())
    }

    /// Rebuild triggers followed by the `rustc-env` directives.
    pub fn write_cargo_directives<W: Write>(&self, out: &mut W, config: &ProvisionConfig) -> Result<()> {
        let mut directives = Vec::new();
        self.write_rustc_env(&mut directives)?;
        write_rerun_directives(out, config)?;
        out.write_all(&directives)?;
        Ok(())
    }

    /// `NAME=<C string literal>` per line, ready for `-D` or `cc::Build::define`.
    pub fn write_cppdefines<W: Write>(&self, out: &mut W) -> Result<()> {
        for define in self.iter() {
            writeln!(out, "{}={}", define.name, stringify(define.value))?;
        }
        Ok(())
    }

    pub fn write_shell_env<W: Write>(&self, out: &mut W) -> Result<()> {
        for define in self.iter() {
            writeln!(out, "export {}={}", define.name, shell_quote(define.value))?;
        }
        Ok(())
    }
}

/// Tells Cargo what the provisioning outcome depends on. Written for every
/// run, skipped ones included, so that leaving an integration dump reruns
/// the build script.
pub fn write_rerun_directives<W: Write>(out: &mut W, config: &ProvisionConfig) -> Result<()> {
    writeln!(out, "cargo:rerun-if-changed={}", config.credentials_path().display())?;
    if let Some(env_file) = &config.env_file {
        writeln!(out, "cargo:rerun-if-changed={}", env_file.display())?;
    }
    for var in [PATH_VAR, INTEGRATION_DUMP_VAR, TERMINAL_VAR] {
        writeln!(out, "cargo:rerun-if-env-changed={var}")?;
    }
    Ok(())
}

/// Quotes `value` as a C string literal.
pub fn stringify(value: &str) -> String {
    let mut literal = String::with_capacity(value.len() + 2);
    literal.push('"');
    for byte in value.bytes() {
        match byte {
            b'"' => literal.push_str("\\\""),
            b'\\' => literal.push_str("\\\\"),
            b'\n' => literal.push_str("\\n"),
            b'\r' => literal.push_str("\\r"),
            b'\t' => literal.push_str("\\t"),
            0x20..=0x7e => literal.push(byte as char),
            // octal, so a following hex digit is not swallowed into the escape
            _ => {
                let _ = write!(literal, "\\{byte:03o}");
            }
        }
    }
    literal.push('"');
    literal
}

fn shell_quote(value: &str) -> String {
    format!("'{}'", value.replace('\'', r"'\''"))
}
