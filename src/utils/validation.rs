//! Private key validation
//!
//! Keys are checked before a run starts so the stream never begins for a
//! request that cannot be processed. The accepted form is 64 hex characters
//! with an optional `0x` prefix; accepted keys are normalized to the prefixed
//! form. Key material stays inside [`PrivateKey`] and is redacted from every
//! `Debug` rendering.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use std::fmt;
use thiserror::Error;

static KEY_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(0x)?[0-9a-fA-F]{64}$").expect("key pattern is a valid regex")
});

/// A validated, normalized private key
///
/// Holds the `0x`-prefixed hex form. Only [`PrivateKey::expose`] yields the
/// raw material; everything else shows a redaction marker.
#[derive(Clone, PartialEq, Eq)]
pub struct PrivateKey(String);

impl PrivateKey {
    /// Validate and normalize one key
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if !KEY_PATTERN.is_match(trimmed) {
            return None;
        }
        if trimmed.starts_with("0x") {
            Some(Self(trimmed.to_string()))
        } else {
            Some(Self(format!("0x{}", trimmed)))
        }
    }

    /// The raw key material, for signing only
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PrivateKey(redacted)")
    }
}

/// One rejected entry of a key list
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InvalidKeyEntry {
    /// 1-based position in the submitted list
    pub position: usize,
    /// Truncated form safe to echo back
    pub display: String,
}

/// Why a key list was rejected
#[derive(Debug, Error, PartialEq, Eq)]
pub enum KeyValidationError {
    /// The list was empty
    #[error("No private keys provided")]
    Empty,
    /// One or more entries failed the format rule
    #[error("{} private key entries failed validation", .0.len())]
    Invalid(Vec<InvalidKeyEntry>),
}

/// Validate a full key list
///
/// Either every entry passes and the normalized keys come back in input
/// order, or the offending entries are reported by position. Never returns a
/// partial list.
pub fn validate_keys(raw: &[String]) -> Result<Vec<PrivateKey>, KeyValidationError> {
    if raw.is_empty() {
        return Err(KeyValidationError::Empty);
    }

    let mut keys = Vec::with_capacity(raw.len());
    let mut invalid = Vec::new();

    for (index, entry) in raw.iter().enumerate() {
        match PrivateKey::parse(entry) {
            Some(key) => keys.push(key),
            None => invalid.push(InvalidKeyEntry {
                position: index + 1,
                display: truncate_entry(entry),
            }),
        }
    }

    if invalid.is_empty() {
        Ok(keys)
    } else {
        Err(KeyValidationError::Invalid(invalid))
    }
}

/// Shorten a rejected entry so responses never carry key-sized material
fn truncate_entry(entry: &str) -> String {
    let trimmed = entry.trim();
    let prefix: String = trimmed.chars().take(6).collect();
    if trimmed.chars().count() > 6 {
        format!("{}...", prefix)
    } else {
        prefix
    }
}
