//! Error types for motebridge-replay

use motebridge_cipher::CipherError;
use motebridge_errors::BridgeError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("line {line}: {message}")]
    Capture { line: usize, message: String },

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Cipher tables: {0}")]
    CipherTables(#[from] CipherError),

    #[error("Bridge error: {0}")]
    Bridge(#[from] BridgeError),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

impl CliError {
    pub fn capture(line: usize, message: impl Into<String>) -> Self {
        CliError::Capture {
            line,
            message: message.into(),
        }
    }

    /// Process exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Capture { .. } => 2,
            CliError::InvalidArgument(_) | CliError::CipherTables(_) => 3,
            CliError::Bridge(_) => 4,
            CliError::IoError(_) | CliError::JsonError(_) => 1,
        }
    }
}
