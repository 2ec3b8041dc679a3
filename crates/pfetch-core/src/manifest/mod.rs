//! Prebuilt artifact manifest: the pinned traceconv table and loaders for
//! alternate manifests.
//!
//! The bundled table is generated wholesale by the prebuilt roll tool and
//! embedded at compile time. It is immutable once loaded; a new release
//! replaces the JSON file, never individual records.

mod lint;
mod record;
mod validate;

use std::path::Path;

use crate::error::ManifestError;

pub use lint::{lint_digests, DigestAnomaly};
pub use record::ManifestRecord;
pub use validate::validate_records;

/// Tool and version that produced the bundled table.
pub const GENERATOR: &str = "tools/roll-prebuilts v40.0";

const TRACECONV_JSON: &str = include_str!("../../manifests/traceconv.json");

/// Validated, ordered set of artifact records.
#[derive(Debug, Clone)]
pub struct Manifest {
    records: Vec<ManifestRecord>,
}

impl Manifest {
    /// The traceconv manifest shipped with this crate.
    pub fn bundled() -> Result<Self, ManifestError> {
        Self::from_json_str(TRACECONV_JSON)
    }

    /// Parse and validate a JSON array of records.
    pub fn from_json_str(json: &str) -> Result<Self, ManifestError> {
        let records: Vec<ManifestRecord> = serde_json::from_str(json)?;
        Self::from_records(records)
    }

    pub fn from_records(records: Vec<ManifestRecord>) -> Result<Self, ManifestError> {
        validate_records(&records)?;
        Ok(Self { records })
    }

    /// Load a manifest file from disk.
    pub fn load(path: &Path) -> Result<Self, ManifestError> {
        let data = std::fs::read_to_string(path).map_err(|source| ManifestError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let manifest = Self::from_json_str(&data)?;
        tracing::debug!(
            "loaded manifest {} ({} records)",
            path.display(),
            manifest.len()
        );
        Ok(manifest)
    }

    /// Load `path` if given, otherwise the bundled table.
    pub fn load_or_bundled(path: Option<&Path>) -> Result<Self, ManifestError> {
        match path {
            Some(p) => Self::load(p),
            None => Self::bundled(),
        }
    }

    pub fn records(&self) -> &[ManifestRecord] {
        &self.records
    }

    /// Record with the given arch key, if any.
    pub fn get(&self, arch: &str) -> Option<&ManifestRecord> {
        self.records.iter().find(|r| r.arch == arch)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Serialize back to the on-disk JSON form.
    pub fn to_json_pretty(&self) -> Result<String, ManifestError> {
        Ok(serde_json::to_string_pretty(&self.records)?)
    }
}
