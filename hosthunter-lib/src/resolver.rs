//! Reverse DNS resolution via the system resolver.
//!
//! `DnsClient` wraps hickory's async resolver, configured from the host's
//! resolv.conf, and exposes PTR lookups through the `ReverseResolver` trait
//! so callers (and tests) can substitute their own implementation.

use std::net::{IpAddr, Ipv4Addr};

use async_trait::async_trait;
use hickory_resolver::error::{ResolveError, ResolveErrorKind};
use hickory_resolver::proto::op::ResponseCode;
use hickory_resolver::TokioAsyncResolver;
use tracing::debug;

use crate::error::HostHunterError;

/// One reverse-lookup operation: address in, ordered hostnames out.
///
/// Implementations must not panic and must not fail synchronously; every
/// failure mode is reported through the `Err` channel.
#[async_trait]
pub trait ReverseResolver: Send + Sync {
    /// Resolve one IPv4 address to its PTR hostnames.
    async fn reverse(&self, addr: Ipv4Addr) -> Result<Vec<String>, HostHunterError>;
}

/// PTR lookup client backed by hickory-resolver.
///
/// Uses the system resolver configuration (nameservers, attempts, timeouts
/// from resolv.conf). No additional timeout is layered on top: a lookup
/// takes as long as the underlying resolver allows.
#[derive(Clone)]
pub struct DnsClient {
    resolver: TokioAsyncResolver,
}

impl DnsClient {
    /// Create a client from the system resolver configuration.
    pub fn from_system_conf() -> Result<Self, HostHunterError> {
        let (config, opts) = hickory_resolver::system_conf::read_system_conf().map_err(|e| {
            HostHunterError::config(format!("failed to read system resolver config: {}", e))
        })?;

        Ok(Self {
            resolver: TokioAsyncResolver::tokio(config, opts),
        })
    }
}

#[async_trait]
impl ReverseResolver for DnsClient {
    async fn reverse(&self, addr: Ipv4Addr) -> Result<Vec<String>, HostHunterError> {
        match self.resolver.reverse_lookup(IpAddr::V4(addr)).await {
            Ok(lookup) => {
                let hostnames: Vec<String> = lookup
                    .iter()
                    .map(|name| name.to_string().trim_end_matches('.').to_string())
                    .collect();

                debug!(addr = %addr, count = hostnames.len(), "reverse lookup succeeded");

                if hostnames.is_empty() {
                    // A response with an empty answer section still counts as
                    // "no hostname" for the caller.
                    Err(HostHunterError::resolve(
                        addr.to_string(),
                        "no PTR records found",
                    ))
                } else {
                    Ok(hostnames)
                }
            }
            Err(e) => Err(map_resolve_error(addr, e)),
        }
    }
}

/// Translate hickory's error taxonomy into a row-friendly message.
fn map_resolve_error(addr: Ipv4Addr, err: ResolveError) -> HostHunterError {
    let message = match err.kind() {
        ResolveErrorKind::NoRecordsFound { response_code, .. } => match response_code {
            ResponseCode::NXDomain => "NXDOMAIN: no PTR record exists".to_string(),
            ResponseCode::ServFail => "server failure".to_string(),
            ResponseCode::Refused => "query refused".to_string(),
            _ => "no PTR records found".to_string(),
        },
        ResolveErrorKind::Timeout => "query timed out".to_string(),
        other => other.to_string(),
    };

    debug!(addr = %addr, message = %message, "reverse lookup failed");
    HostHunterError::resolve(addr.to_string(), message)
}
