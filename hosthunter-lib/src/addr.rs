//! Address token classification and batch admission.
//!
//! This module contains the helper functions for classifying raw input
//! tokens, splitting comma-separated input lines, and deciding whether a
//! batch is acceptable before any lookup is dispatched.

use std::net::Ipv4Addr;

use crate::error::HostHunterError;
use crate::types::AddressClass;

/// Classify a raw token.
///
/// - `SingleAddress`: four dot-separated decimal octets, each in 0-255.
///   Leading zeros are accepted ("01.2.3.4" is a valid single address).
/// - `RangeNotation`: a valid dotted quad followed by `/` and a prefix
///   length in 1-32 (no leading zero).
/// - `Malformed`: everything else.
///
/// Classification is purely syntactic and has no side effects.
pub fn classify(token: &str) -> AddressClass {
    if parse_ipv4(token).is_some() {
        AddressClass::SingleAddress
    } else if is_ipv4_range(token) {
        AddressClass::RangeNotation
    } else {
        AddressClass::Malformed
    }
}

/// Parse a dotted-quad token into an address.
///
/// Stricter than `Ipv4Addr::from_str` about shape (exactly four parts, at
/// most three digits each) but laxer about leading zeros, which are treated
/// as plain decimal.
pub(crate) fn parse_ipv4(token: &str) -> Option<Ipv4Addr> {
    let mut octets = [0u8; 4];
    let mut count = 0;

    for part in token.split('.') {
        if count == 4 {
            return None;
        }
        if part.is_empty() || part.len() > 3 || !part.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        let value: u16 = part.parse().ok()?;
        if value > 255 {
            return None;
        }
        octets[count] = value as u8;
        count += 1;
    }

    if count == 4 {
        Some(Ipv4Addr::new(octets[0], octets[1], octets[2], octets[3]))
    } else {
        None
    }
}

/// Whether a token is a valid CIDR-style range: dotted quad, `/`, prefix 1-32.
fn is_ipv4_range(token: &str) -> bool {
    let Some((quad, prefix)) = token.split_once('/') else {
        return false;
    };

    if parse_ipv4(quad).is_none() {
        return false;
    }

    // Prefix must be plain decimal without a leading zero ("/08" is rejected).
    if prefix.is_empty() || prefix.starts_with('0') || !prefix.bytes().all(|b| b.is_ascii_digit())
    {
        return false;
    }

    matches!(prefix.parse::<u8>(), Ok(1..=32))
}

/// Split raw input lines into individual tokens.
///
/// Each line may carry several comma-separated addresses; tokens are
/// trimmed and empty ones dropped. Order of appearance is preserved.
pub fn expand_address_inputs(lines: &[String]) -> Vec<String> {
    let mut tokens = Vec::new();

    for line in lines {
        for part in line.split(',') {
            let trimmed = part.trim();
            if !trimmed.is_empty() {
                tokens.push(trimmed.to_string());
            }
        }
    }

    tokens
}

/// Decide whether a batch of tokens may be dispatched.
///
/// Policy, applied once before dispatch:
/// - mixed single addresses and ranges are rejected (no auto-normalization);
/// - a batch of only ranges is rejected (ranges are never resolved);
/// - any malformed token rejects the batch;
/// - an empty batch is rejected.
///
/// Only an all-`SingleAddress` batch passes. The per-item dispatch path
/// re-checks classification independently, so a stray range arriving via a
/// different entry point still degrades to a skipped row instead of
/// crashing the batch.
pub fn validate_batch(tokens: &[String]) -> Result<(), HostHunterError> {
    if tokens.is_empty() {
        return Err(HostHunterError::EmptyBatch);
    }

    let classes: Vec<AddressClass> = tokens.iter().map(|t| classify(t)).collect();
    let has_single = classes.contains(&AddressClass::SingleAddress);
    let has_range = classes.contains(&AddressClass::RangeNotation);

    if has_single && has_range {
        return Err(HostHunterError::MixedNotation);
    }
    if has_range {
        return Err(HostHunterError::RangesUnsupported);
    }
    if let Some(pos) = classes.iter().position(|c| *c == AddressClass::Malformed) {
        return Err(HostHunterError::invalid_address(&tokens[pos]));
    }

    Ok(())
}
