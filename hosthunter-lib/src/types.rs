//! Core data types for batch reverse DNS resolution.
//!
//! This module defines all the main data structures used throughout the library,
//! including token classification, lookup outcomes, and configuration options.

use serde::{Deserialize, Serialize};

use crate::addr::classify;

/// Syntactic classification of one input token.
///
/// Derived purely from the token's text and never reclassified afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AddressClass {
    /// A single dotted-quad IPv4 address (e.g. "192.168.1.1")
    #[serde(rename = "single")]
    SingleAddress,

    /// A CIDR-style range (e.g. "192.168.1.0/24")
    #[serde(rename = "range")]
    RangeNotation,

    /// Anything that is neither a single address nor a range
    #[serde(rename = "malformed")]
    Malformed,
}

/// The unit of work: one raw token plus its classification.
///
/// One `LookupItem` is created per comma-separated token across all input
/// lines, in the order encountered. The position in that sequence is the
/// item's identity, so duplicate addresses are independent items.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupItem {
    /// The token as supplied by the caller
    pub token: String,

    /// Syntactic class of the token
    pub class: AddressClass,
}

impl LookupItem {
    /// Build an item from a raw token, classifying it on the way in.
    pub fn new<T: Into<String>>(token: T) -> Self {
        let token = token.into();
        let class = classify(&token);
        Self { token, class }
    }
}

/// Recorded result of attempting to resolve one address.
///
/// Exactly one outcome is produced per `LookupItem`, exactly once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum LookupOutcome {
    /// The reverse lookup returned one or more hostnames
    Success {
        /// PTR hostnames in the order the resolver returned them
        hostnames: Vec<String>,
    },

    /// The reverse lookup failed (NXDOMAIN, timeout, refused, ...)
    Failure {
        /// Human-readable description of the failure
        reason: String,
    },

    /// The item was never queried (range notation is not resolvable)
    NotApplicable {
        /// Why the item was skipped
        reason: String,
    },
}

impl LookupOutcome {
    /// The status column label for this outcome.
    pub fn status_label(&self) -> &'static str {
        match self {
            Self::Success { .. } => "Success",
            Self::Failure { .. } => "Failed",
            Self::NotApplicable { .. } => "Not Applicable",
        }
    }

    /// The hostname column text: hostnames joined with `", "`, or the
    /// reason string verbatim.
    pub fn detail_text(&self) -> String {
        match self {
            Self::Success { hostnames } => hostnames.join(", "),
            Self::Failure { reason } | Self::NotApplicable { reason } => reason.clone(),
        }
    }

    /// Whether this outcome represents a successful resolution.
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }
}

/// Configuration options for batch resolution.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckConfig {
    /// Maximum number of in-flight reverse lookups
    /// Default: 10, Range: 1-100
    pub concurrency: usize,
}

impl Default for CheckConfig {
    fn default() -> Self {
        Self { concurrency: 10 }
    }
}

impl CheckConfig {
    /// Create a new configuration with custom concurrency.
    ///
    /// Automatically caps concurrency at 100 to prevent resource exhaustion.
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.clamp(1, 100);
        self
    }
}

impl std::fmt::Display for AddressClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AddressClass::SingleAddress => write!(f, "single address"),
            AddressClass::RangeNotation => write!(f, "range notation"),
            AddressClass::Malformed => write!(f, "malformed"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_item_classifies_on_construction() {
        assert_eq!(
            LookupItem::new("10.0.0.1").class,
            AddressClass::SingleAddress
        );
        assert_eq!(
            LookupItem::new("10.0.0.0/24").class,
            AddressClass::RangeNotation
        );
        assert_eq!(LookupItem::new("abc").class, AddressClass::Malformed);
    }

    #[test]
    fn test_status_labels() {
        let success = LookupOutcome::Success {
            hostnames: vec!["host.example.net".to_string()],
        };
        let failure = LookupOutcome::Failure {
            reason: "boom".to_string(),
        };
        let skipped = LookupOutcome::NotApplicable {
            reason: "range".to_string(),
        };

        assert_eq!(success.status_label(), "Success");
        assert_eq!(failure.status_label(), "Failed");
        assert_eq!(skipped.status_label(), "Not Applicable");
    }

    #[test]
    fn test_detail_text_joins_hostnames() {
        let outcome = LookupOutcome::Success {
            hostnames: vec!["a.example.net".to_string(), "b.example.net".to_string()],
        };
        assert_eq!(outcome.detail_text(), "a.example.net, b.example.net");
    }

    #[test]
    fn test_detail_text_carries_reason_verbatim() {
        let outcome = LookupOutcome::Failure {
            reason: "Error: query timed out".to_string(),
        };
        assert_eq!(outcome.detail_text(), "Error: query timed out");
    }

    #[test]
    fn test_concurrency_clamped() {
        assert_eq!(CheckConfig::default().with_concurrency(0).concurrency, 1);
        assert_eq!(
            CheckConfig::default().with_concurrency(500).concurrency,
            100
        );
        assert_eq!(CheckConfig::default().with_concurrency(25).concurrency, 25);
    }
}
