use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProvisionError {
    #[error("failed to read {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("{} is not a valid credentials file", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to read credentials from the terminal")]
    Prompt(#[source] io::Error),
    #[error("value of {name} contains a line break and cannot be passed to cargo")]
    Directive { name: &'static str },
    #[error("failed to write build definitions")]
    Output(#[from] io::Error),
}

pub type Result<T> = std::result::Result<T, ProvisionError>;
