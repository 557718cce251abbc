//! Error handling for batch reverse DNS resolution.
//!
//! This module defines a comprehensive error type covering the different ways
//! a batch can fail, from rejected input to resolver and file problems.

use std::fmt;

/// Main error type for reverse lookup operations.
///
/// The input variants (`InvalidAddress`, `MixedNotation`, `RangesUnsupported`,
/// `EmptyBatch`) are batch-fatal and detected before any lookup is dispatched.
/// `Resolve` errors are recovered per item and never abort a batch.
#[derive(Debug, Clone)]
pub enum HostHunterError {
    /// A token is neither a single IPv4 address nor a range
    InvalidAddress {
        address: String,
    },

    /// The input mixes single addresses with CIDR ranges
    MixedNotation,

    /// The input contains only CIDR ranges, which cannot be resolved
    RangesUnsupported,

    /// No addresses were supplied at all
    EmptyBatch,

    /// A reverse lookup failed for one address
    Resolve {
        address: String,
        message: String,
    },

    /// File I/O errors when reading address lists or writing exports
    File {
        path: String,
        message: String,
    },

    /// Configuration errors (invalid settings, unreadable config files)
    Config {
        message: String,
    },

    /// Generic internal errors that don't fit other categories
    Internal {
        message: String,
    },
}

impl HostHunterError {
    /// Create a new invalid address error.
    pub fn invalid_address<A: Into<String>>(address: A) -> Self {
        Self::InvalidAddress {
            address: address.into(),
        }
    }

    /// Create a new resolution error for one address.
    pub fn resolve<A: Into<String>, M: Into<String>>(address: A, message: M) -> Self {
        Self::Resolve {
            address: address.into(),
            message: message.into(),
        }
    }

    /// Create a new file error.
    pub fn file_error<P: Into<String>, M: Into<String>>(path: P, message: M) -> Self {
        Self::File {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create a new configuration error.
    pub fn config<M: Into<String>>(message: M) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a new internal error.
    pub fn internal<M: Into<String>>(message: M) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Whether this error rejects the batch before any lookup is dispatched.
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidAddress { .. }
                | Self::MixedNotation
                | Self::RangesUnsupported
                | Self::EmptyBatch
        )
    }

    /// The bare failure description, without the error-type prefix.
    ///
    /// Used when the message is embedded in a result row rather than
    /// reported as a process-level error.
    pub fn brief(&self) -> String {
        match self {
            Self::Resolve { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }
}

impl fmt::Display for HostHunterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidAddress { address } => {
                write!(f, "Invalid IP address or range format: \"{}\"", address)
            }
            Self::MixedNotation => {
                write!(f, "CIDR is mixed with valid IPs, convert those to IPs.")
            }
            Self::RangesUnsupported => {
                write!(f, "Please provide the list of IPs, not the CIDR notation.")
            }
            Self::EmptyBatch => {
                write!(f, "No IP addresses provided.")
            }
            Self::Resolve { address, message } => {
                write!(f, "Lookup failed for '{}': {}", address, message)
            }
            Self::File { path, message } => {
                write!(f, "File error at '{}': {}", path, message)
            }
            Self::Config { message } => {
                write!(f, "Configuration error: {}", message)
            }
            Self::Internal { message } => {
                write!(f, "Internal error: {}", message)
            }
        }
    }
}

impl std::error::Error for HostHunterError {}

// Implement From conversions for common error types
impl From<std::io::Error> for HostHunterError {
    fn from(err: std::io::Error) -> Self {
        Self::Internal {
            message: format!("I/O error: {}", err),
        }
    }
}

impl From<serde_json::Error> for HostHunterError {
    fn from(err: serde_json::Error) -> Self {
        Self::Internal {
            message: format!("JSON serialization failed: {}", err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_errors_are_batch_fatal() {
        assert!(HostHunterError::invalid_address("999.1.1.1").is_input_error());
        assert!(HostHunterError::MixedNotation.is_input_error());
        assert!(HostHunterError::RangesUnsupported.is_input_error());
        assert!(HostHunterError::EmptyBatch.is_input_error());

        assert!(!HostHunterError::resolve("1.1.1.1", "timeout").is_input_error());
        assert!(!HostHunterError::internal("oops").is_input_error());
    }

    #[test]
    fn test_brief_strips_prefix_for_resolve_errors() {
        let err = HostHunterError::resolve("1.1.1.1", "query timed out");
        assert_eq!(err.brief(), "query timed out");

        let err = HostHunterError::invalid_address("abc");
        assert_eq!(err.brief(), "Invalid IP address or range format: \"abc\"");
    }

    #[test]
    fn test_display_invalid_address_quotes_token() {
        let err = HostHunterError::invalid_address("10.0.0");
        assert_eq!(
            err.to_string(),
            "Invalid IP address or range format: \"10.0.0\""
        );
    }
}
