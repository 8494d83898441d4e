//! Error taxonomy for the signal-conditioning core

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SignalError {
    /// Empty series or non-finite samples
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Window length / polynomial order constraints violated
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),
}

/// Result alias used throughout the numeric core
pub type Result<T> = std::result::Result<T, SignalError>;
