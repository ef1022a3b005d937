//! CLI error types
//!
//! Every failure reaching the CLI ends the command. Errors raised below the
//! CLI keep their own code so the JSON error line names the real cause.

use std::fmt;
use std::io;

use crate::model::ModelError;
use crate::pricing::PricingError;
use crate::reports::ReportError;

/// CLI error codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliErrorCode {
    /// Configuration file missing, malformed or invalid
    ConfigError,
    /// Reading the snapshot or writing output failed
    IoError,
    /// Snapshot content rejected, carrying the model error code
    Snapshot(&'static str),
    /// Report failed, carrying the report or query error code
    Report(&'static str),
    /// Discount rejected, carrying the pricing error code
    Pricing(&'static str),
}

impl CliErrorCode {
    pub fn code(&self) -> &'static str {
        match self {
            Self::ConfigError => "CLI_CONFIG_ERROR",
            Self::IoError => "CLI_IO_ERROR",
            Self::Snapshot(code) | Self::Report(code) | Self::Pricing(code) => *code,
        }
    }
}

#[derive(Debug)]
pub struct CliError {
    code: CliErrorCode,
    message: String,
}

impl CliError {
    pub fn new(code: CliErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    pub fn config_error(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::ConfigError, msg)
    }

    pub fn io_error(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::IoError, msg)
    }

    pub fn code(&self) -> &CliErrorCode {
        &self.code
    }

    pub fn code_str(&self) -> &'static str {
        self.code.code()
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code.code(), self.message)
    }
}

impl std::error::Error for CliError {}

impl From<io::Error> for CliError {
    fn from(e: io::Error) -> Self {
        Self::io_error(e.to_string())
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        Self::io_error(format!("JSON error: {}", e))
    }
}

impl From<ModelError> for CliError {
    fn from(e: ModelError) -> Self {
        Self::new(CliErrorCode::Snapshot(e.code()), e.to_string())
    }
}

impl From<ReportError> for CliError {
    fn from(e: ReportError) -> Self {
        Self::new(CliErrorCode::Report(e.code()), e.to_string())
    }
}

impl From<PricingError> for CliError {
    fn from(e: PricingError) -> Self {
        Self::new(CliErrorCode::Pricing(e.code()), e.to_string())
    }
}

pub type CliResult<T> = Result<T, CliError>;
