//! CLI error type and exit codes.
//!
//! | Code | Meaning |
//! |------|---------|
//! | 0 | Success |
//! | 1 | Runtime or output failure |
//! | 2 | Invalid configuration |

use phasegate_core::GateError;
use thiserror::Error;

/// Process exit codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum CliExitCode {
    Success = 0,
    Error = 1,
    InvalidConfiguration = 2,
}

impl From<CliExitCode> for i32 {
    fn from(code: CliExitCode) -> Self {
        code as i32
    }
}

/// Errors surfaced by command handlers.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Gate(#[from] GateError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl CliError {
    pub fn exit_code(&self) -> CliExitCode {
        exit_code_for_error(self)
    }
}

/// Map an error onto the process exit code.
pub fn exit_code_for_error(err: &CliError) -> CliExitCode {
    match err {
        CliError::Gate(gate) if gate.is_configuration_error() => CliExitCode::InvalidConfiguration,
        CliError::Gate(_) | CliError::Serialization(_) => CliExitCode::Error,
    }
}
