//! Integrity check of a downloaded artifact against its manifest record.
//!
//! Size is compared before the digest, so a truncated download is rejected
//! even if its hash happened to match.

use std::path::Path;

use anyhow::{Context, Result};

use crate::checksum;
use crate::error::IntegrityError;
use crate::manifest::ManifestRecord;

/// Verify an in-memory artifact.
pub fn verify(record: &ManifestRecord, data: &[u8]) -> Result<(), IntegrityError> {
    check_size(record, data.len() as u64)?;
    check_digest(record, checksum::sha256_bytes(data))
}

/// Verify a file on disk. I/O failures are returned as `anyhow` errors;
/// mismatches carry an [`IntegrityError`] that callers can downcast.
pub fn verify_path(record: &ManifestRecord, path: &Path) -> Result<()> {
    let len = std::fs::metadata(path)
        .with_context(|| format!("stat {}", path.display()))?
        .len();
    check_size(record, len)?;
    let actual = checksum::sha256_path(path)?;
    check_digest(record, actual)?;
    Ok(())
}

fn check_size(record: &ManifestRecord, actual: u64) -> Result<(), IntegrityError> {
    if actual != record.file_size {
        return Err(IntegrityError::SizeMismatch {
            expected: record.file_size,
            actual,
        });
    }
    Ok(())
}

fn check_digest(record: &ManifestRecord, actual: String) -> Result<(), IntegrityError> {
    if !actual.eq_ignore_ascii_case(&record.sha256) {
        return Err(IntegrityError::DigestMismatch {
            expected: record.sha256.clone(),
            actual,
        });
    }
    Ok(())
}
