use std::io::Error as IoError;
use thiserror::Error;

/// Error types
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    IoError(#[from] IoError),

    #[error(transparent)]
    Protocol(#[from] crate::protocol::Error),

    /// The command wrote to stderr, whatever its exit status.
    #[error("command failed: {0}")]
    Execution(String),

    #[error("no USB video device found")]
    NoDeviceFound,
}

impl Error {
    /// Process exit status for this error.
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::Execution(_) => 1,
            Self::NoDeviceFound => 2,
            Self::Protocol(_) => 3,
            Self::IoError(_) => 4,
        }
    }
}

/// Exit status used for every outcome in legacy mode (`-1`, wrapped).
pub const LEGACY_EXIT_CODE: u8 = 255;

/// Process exit status for the outcome of a run.
///
/// In `legacy` mode, success and failure both exit with
/// [LEGACY_EXIT_CODE].
pub fn exit_status(result: &crate::Result, legacy: bool) -> u8 {
    if legacy {
        return LEGACY_EXIT_CODE;
    }
    match result {
        Ok(()) => 0,
        Err(e) => e.exit_code(),
    }
}
