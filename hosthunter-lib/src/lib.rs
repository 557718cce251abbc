//! # HostHunter Library
//!
//! A library for resolving batches of IPv4 addresses to hostnames via
//! reverse DNS lookup.
//!
//! This library provides both high-level and low-level APIs for batch
//! resolution, with concurrent processing, per-item failure isolation,
//! and comprehensive error handling.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use hosthunter_lib::HostChecker;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let checker = HostChecker::new()?;
//!     let addresses = vec!["1.1.1.1".to_string(), "8.8.8.8".to_string()];
//!     let report = checker.check_addresses(&addresses).await?;
//!
//!     println!("{}", hosthunter_lib::render_table(report.rows()));
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Batch validation**: mixed or range-only input is rejected up front
//! - **Concurrent lookups**: all items dispatched at once, bounded in flight
//! - **Failure isolation**: one failed lookup never aborts its siblings
//! - **Deterministic completion**: a finished batch has exactly one row per item
//! - **Pluggable resolver**: swap the DNS client for your own implementation

// Re-export main public API types and functions
// This makes them available as hosthunter_lib::TypeName
pub use addr::{classify, expand_address_inputs, validate_batch};
pub use checker::HostChecker;
pub use config::{load_env_config, ConfigManager, DefaultsConfig, EnvConfig, FileConfig};
pub use error::HostHunterError;
pub use report::{column_widths, render_table, to_csv, BatchReport, ResultRow, REPORT_HEADER};
pub use resolver::{DnsClient, ReverseResolver};
pub use types::{AddressClass, CheckConfig, LookupItem, LookupOutcome};

// Internal modules - these are not part of the public API
mod addr;
mod checker;
mod config;
mod error;
mod report;
mod resolver;
mod types;

// Type alias for convenience
pub type Result<T> = std::result::Result<T, HostHunterError>;

// Library version and metadata
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const AUTHOR: &str = env!("CARGO_PKG_AUTHORS");
