//! Digest lint: report records whose `sha256` is not a well-formed digest.
//!
//! Anomalies are reported as found. Nothing is truncated or rewritten; the
//! pinned values must be checked against the upstream release instead.

use std::fmt;

use crate::checksum::{is_sha256_hex, SHA256_HEX_LEN};

use super::Manifest;

/// A record whose digest cannot be a SHA-256 hex string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DigestAnomaly {
    pub arch: String,
    pub sha256: String,
    /// Length in characters of the stored value.
    pub len: usize,
    pub non_hex: bool,
}

impl fmt::Display for DigestAnomaly {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: sha256 is {} chars", self.arch, self.len)?;
        if self.len != SHA256_HEX_LEN {
            write!(f, " (expected {})", SHA256_HEX_LEN)?;
        }
        if self.non_hex {
            write!(f, ", contains non-hex characters")?;
        }
        Ok(())
    }
}

/// Returns every malformed digest in manifest order.
pub fn lint_digests(manifest: &Manifest) -> Vec<DigestAnomaly> {
    manifest
        .records()
        .iter()
        .filter(|r| !is_sha256_hex(&r.sha256))
        .map(|r| DigestAnomaly {
            arch: r.arch.clone(),
            sha256: r.sha256.clone(),
            len: r.sha256.chars().count(),
            non_hex: !r.sha256.chars().all(|c| c.is_ascii_hexdigit()),
        })
        .collect()
}
