use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use wifi_provision::config::PATH_VAR;
use wifi_provision::{
    obtain_credentials_interactive, write_rerun_directives, BuildDefines, CargoLogger,
    ProvisionConfig, Provisioned, RunMode,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    /// `cargo:` directives for a build script
    Cargo,
    /// NAME=<C string literal> pairs
    Cpp,
    /// `export NAME='value'` lines
    Shell,
}

/// Prints WiFi credential definitions for a firmware build.
#[derive(Debug, Parser)]
#[command(name = "wifi-provision", version)]
struct Args {
    /// Credentials file [default: credentials.json]
    #[arg(long, env = PATH_VAR)]
    path: Option<PathBuf>,

    #[arg(long, value_enum, default_value_t = Format::Cargo)]
    format: Format,

    /// Skip provisioning, as tooling does when dumping project metadata
    #[arg(long)]
    integration_dump: bool,

    /// Read the answers from stdin instead of the terminal
    #[arg(long)]
    stdin: bool,
}

impl Args {
    fn apply(&self, mut config: ProvisionConfig) -> ProvisionConfig {
        if let Some(path) = self.path.as_ref().filter(|p| !p.as_os_str().is_empty()) {
            config.credentials_path = path.clone();
        }
        if self.integration_dump {
            config.mode = RunMode::IntegrationDump;
        }
        if self.stdin {
            config.terminal = None;
        }
        config
    }
}

fn main() -> ExitCode {
    CargoLogger::initialize_default();

    // before parsing, so `.env` can supply the `env` defaults of the flags
    let config = ProvisionConfig::from_env();
    let args = Args::parse();

    match run(args.apply(config), args.format) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("{err:?}");
            ExitCode::FAILURE
        }
    }
}

fn run(config: ProvisionConfig, format: Format) -> Result<()> {
    log::debug!("provisioning with {config:?}");

    let record = match obtain_credentials_interactive(&config)
        .context("could not obtain WiFi credentials")?
    {
        Provisioned::Credentials { record, source } => {
            log::debug!("credentials from {source:?}");
            record
        }
        Provisioned::Skipped => {
            log::info!("integration dump, nothing to provision");
            if format == Format::Cargo {
                write_rerun_directives(&mut io::stdout().lock(), &config)
                    .context("could not write definitions")?;
            }
            return Ok(());
        }
    };

    let defines = BuildDefines::from_record(&record);
    let stdout = io::stdout();
    let mut out = stdout.lock();
    let written = match format {
        Format::Cargo => defines.write_cargo_directives(&mut out, &config),
        Format::Cpp => defines.write_cppdefines(&mut out),
        Format::Shell => defines.write_shell_env(&mut out),
    };
    written.context("could not write definitions")?;
    out.flush()?;
    Ok(())
}
