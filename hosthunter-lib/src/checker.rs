//! Batch reverse lookup orchestration.
//!
//! This module provides the primary `HostChecker` struct that validates a
//! batch, fans the accepted items out as concurrent reverse lookups, and
//! aggregates every outcome into a `BatchReport` that finalizes exactly
//! once when the last outcome arrives.

use std::pin::Pin;
use std::sync::Arc;

use futures::stream::{Stream, StreamExt};
use tracing::{debug, info};

use crate::addr::{parse_ipv4, validate_batch};
use crate::error::HostHunterError;
use crate::report::BatchReport;
use crate::resolver::{DnsClient, ReverseResolver};
use crate::types::{AddressClass, CheckConfig, LookupItem, LookupOutcome};

/// Orchestrates batch reverse DNS resolution.
///
/// The `HostChecker` handles all aspects of a batch:
/// - pre-dispatch input validation
/// - concurrent lookup fan-out
/// - per-item error capture (a failed lookup never aborts its siblings)
/// - completion detection and result aggregation
///
/// # Example
///
/// ```rust,no_run
/// use hosthunter_lib::HostChecker;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let checker = HostChecker::new()?;
///     let addresses = vec!["1.1.1.1".to_string(), "8.8.8.8".to_string()];
///     let report = checker.check_addresses(&addresses).await?;
///
///     for row in report.rows() {
///         println!("{}: {} ({})", row.address, row.status, row.hostname);
///     }
///     Ok(())
/// }
/// ```
pub struct HostChecker {
    /// Configuration settings for this checker instance
    config: CheckConfig,
    /// Reverse resolver used for every single-address item
    resolver: Arc<dyn ReverseResolver>,
}

impl HostChecker {
    /// Create a checker with default configuration and the system resolver.
    pub fn new() -> Result<Self, HostHunterError> {
        Self::with_config(CheckConfig::default())
    }

    /// Create a checker with custom configuration and the system resolver.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use hosthunter_lib::{CheckConfig, HostChecker};
    ///
    /// # fn main() -> Result<(), hosthunter_lib::HostHunterError> {
    /// let config = CheckConfig::default().with_concurrency(25);
    /// let checker = HostChecker::with_config(config)?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn with_config(config: CheckConfig) -> Result<Self, HostHunterError> {
        let resolver = DnsClient::from_system_conf()?;
        Ok(Self {
            config,
            resolver: Arc::new(resolver),
        })
    }

    /// Create a checker with a caller-supplied resolver.
    ///
    /// Primarily useful for tests and for embedding a custom resolver
    /// configuration.
    pub fn with_resolver(config: CheckConfig, resolver: Arc<dyn ReverseResolver>) -> Self {
        Self { config, resolver }
    }

    /// Get the current configuration for this checker.
    pub fn config(&self) -> &CheckConfig {
        &self.config
    }

    /// Resolve one token to its outcome.
    ///
    /// The token is classified here, independently of any batch-level
    /// validation, so every caller gets the same degradation behavior:
    ///
    /// - range notation is skipped without a network call;
    /// - malformed tokens become a `Failure` outcome instead of a panic
    ///   (unreachable through `check_addresses`, which rejects them first);
    /// - resolution errors are captured in the outcome, never returned.
    pub async fn check_address(&self, token: &str) -> (LookupItem, LookupOutcome) {
        let item = LookupItem::new(token);

        let outcome = match item.class {
            AddressClass::RangeNotation => {
                debug!(token = %item.token, "skipping CIDR range");
                LookupOutcome::NotApplicable {
                    reason: "CIDR range - Not handled".to_string(),
                }
            }
            AddressClass::Malformed => LookupOutcome::Failure {
                reason: format!("Invalid IP address format: \"{}\"", item.token),
            },
            AddressClass::SingleAddress => match parse_ipv4(&item.token) {
                Some(addr) => match self.resolver.reverse(addr).await {
                    Ok(hostnames) => LookupOutcome::Success { hostnames },
                    Err(e) => LookupOutcome::Failure {
                        reason: format!("Error: {}", e.brief()),
                    },
                },
                // classify() and parse_ipv4() agree on the grammar, so a
                // SingleAddress token always parses; degrade anyway.
                None => LookupOutcome::Failure {
                    reason: format!("Invalid IP address format: \"{}\"", item.token),
                },
            },
        };

        (item, outcome)
    }

    /// Resolve a whole batch, collecting every outcome into a report.
    ///
    /// The batch is validated up front: mixed notation, range-only input,
    /// malformed tokens and empty input are rejected before any lookup is
    /// dispatched. Accepted items are all dispatched before any outcome is
    /// awaited, with at most `config.concurrency` lookups in flight.
    ///
    /// Rows land in the report in completion order, which depends on
    /// resolver latency and is not the input order. The returned report is
    /// always complete: one row per item, `completed() == total()`.
    ///
    /// # Errors
    ///
    /// Returns a batch-fatal input error from pre-dispatch validation.
    /// Per-item resolution failures are recorded as `Failed` rows and are
    /// never returned as errors.
    pub async fn check_addresses(&self, tokens: &[String]) -> Result<BatchReport, HostHunterError> {
        validate_batch(tokens)?;

        let total = tokens.len();
        debug!(
            total,
            concurrency = self.config.concurrency,
            "dispatching reverse lookups"
        );

        let mut report = BatchReport::new(total);
        let lookups = tokens.iter().map(|token| self.check_address(token));
        let mut outcomes = futures::stream::iter(lookups).buffer_unordered(self.config.concurrency);

        while let Some((item, outcome)) = outcomes.next().await {
            report.record(item, outcome);
        }
        drop(outcomes);

        // The stream yields exactly one outcome per dispatched item, so
        // exhaustion is the completion barrier.
        debug_assert!(report.is_complete());
        info!(
            total = report.total(),
            resolved = report.rows().iter().filter(|r| r.is_success()).count(),
            "batch finished"
        );

        Ok(report)
    }

    /// Resolve a batch and yield each outcome as it completes.
    ///
    /// Unlike [`check_addresses`](Self::check_addresses) this performs no
    /// batch-level validation; every token degrades individually through
    /// [`check_address`](Self::check_address). Useful for streaming UIs.
    pub fn check_addresses_stream<'a>(
        &'a self,
        tokens: &[String],
    ) -> Pin<Box<dyn Stream<Item = (LookupItem, LookupOutcome)> + Send + 'a>> {
        let tokens = tokens.to_vec();
        let concurrency = self.config.concurrency;

        let stream = futures::stream::iter(tokens)
            .map(move |token| async move { self.check_address(&token).await })
            .buffer_unordered(concurrency);

        Box::pin(stream)
    }
}
