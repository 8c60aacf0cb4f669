// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Masking of personal identifiers in exposed task labels and profile names.
//!
//! Profile names are often email addresses. Anything email-like is replaced
//! with a fixed-length SHA-256 prefix before it is stored in task history or
//! returned from a query, so the raw identifier never leaves the process.

use crate::id::COMPOSITE_SEPARATOR;
use sha2::{Digest, Sha256};

/// Number of hex characters kept from the digest.
pub const FINGERPRINT_LEN: usize = 12;

/// Marker that makes an identifier count as personal.
const EMAIL_MARKER: char = '@';

/// True if `value` looks like an email address.
pub fn is_email_like(value: &str) -> bool {
    value.contains(EMAIL_MARKER)
}

/// Deterministic short fingerprint of `value`.
pub fn fingerprint(value: &str) -> String {
    let mut hex = format!("{:x}", Sha256::digest(value.as_bytes()));
    hex.truncate(FINGERPRINT_LEN);
    hex
}

/// Mask a standalone identifier (e.g. a profile name) if it is email-like.
pub fn anonymize_name(name: &str) -> String {
    if is_email_like(name) {
        fingerprint(name)
    } else {
        name.to_string()
    }
}

/// Mask the profile-derived part of a task label.
///
/// Composite labels (`{batch}-{profile}`) keep their batch prefix verbatim;
/// only the suffix is fingerprinted, and only when it is email-like.
pub fn anonymize_label(label: &str) -> String {
    match label.split_once(COMPOSITE_SEPARATOR) {
        Some((prefix, suffix)) if is_email_like(suffix) => {
            format!("{}{}{}", prefix, COMPOSITE_SEPARATOR, fingerprint(suffix))
        }
        Some(_) => label.to_string(),
        None => anonymize_name(label),
    }
}

#[cfg(test)]
#[path = "anonymize_tests.rs"]
mod tests;
