use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("I/O error writing config at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to serialize config: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Why a device scan came back empty. Only ever logged; callers see an empty list.
#[derive(Debug, Error)]
pub enum ScanError {
    #[error("failed to launch powershell: {0}")]
    Launch(#[source] std::io::Error),

    #[error("powershell exited with {0}")]
    Exit(std::process::ExitStatus),
}

/// Why a single switch attempt failed. Wrong tool path and wrong device name look the same here.
#[derive(Debug, Error)]
pub enum SwitchError {
    #[error("failed to launch {tool}: {source}")]
    Launch {
        tool: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{tool} exited with {status}")]
    Exit {
        tool: PathBuf,
        status: std::process::ExitStatus,
    },
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("console I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("standard input was closed")]
    InputClosed,
}

pub type Result<T> = std::result::Result<T, AppError>;
