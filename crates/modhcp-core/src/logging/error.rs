//! # Logging Errors
//!
//! Defines [`LoggingError`], raised while validating logging configuration.
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoggingError {
    /// The requested level name is not one of the supported names.
    #[error("Invalid log level '{value}'. Valid log levels are [{valid}]")]
    InvalidLogLevel { value: String, valid: String },
}
