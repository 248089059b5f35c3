use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Failures at the I/O and configuration boundary. The extraction stages themselves
/// never fail.
#[derive(Debug, Error)]
pub enum Error {
    #[error("Missing required configuration key `{0}`")]
    MissingConfigKey(&'static str),
    #[error("Invalid value `{value}` for configuration key `{key}`")]
    InvalidConfigValue { key: String, value: String },
    #[error("Failed to read configuration file {}", path.display())]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Failed to read SQL file {}", path.display())]
    InputRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Failed to write report {}", path.display())]
    OutputWrite {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl Error {
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            Error::MissingConfigKey(_) | Error::InvalidConfigValue { .. } | Error::ConfigRead { .. }
        )
    }
}
