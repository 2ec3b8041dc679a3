//! Typed errors for manifest loading, resolution and integrity checks.

use thiserror::Error;

/// Reasons a manifest is rejected at load time. Any of these rejects the
/// whole table; nothing is partially loaded.
#[derive(Debug, Error)]
pub enum ManifestError {
    /// Not valid JSON, wrong shape, or a required field is missing.
    #[error("malformed manifest: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("duplicate arch {arch:?} in manifest")]
    DuplicateArch { arch: String },

    #[error("record {arch:?} has a platform but no machine list")]
    PlatformWithoutMachine { arch: String },

    #[error("record {arch:?} has a machine list but no platform")]
    MachineWithoutPlatform { arch: String },

    #[error("record {arch:?} has an empty machine list")]
    EmptyMachine { arch: String },

    /// `arch` or `file_name` is not a single plain path component, so it
    /// could address files outside the cache directory.
    #[error("record {arch:?} has an unsafe {field} {value:?}")]
    UnsafePathComponent {
        arch: String,
        field: &'static str,
        value: String,
    },

    #[error("record {arch:?} has an invalid url {url:?}: {reason}")]
    InvalidUrl {
        arch: String,
        url: String,
        reason: String,
    },

    #[error("read manifest {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// No single record could be selected for the requested target.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ResolveError {
    #[error("unsupported platform: os={os:?} machine={machine:?}")]
    UnsupportedPlatform { os: String, machine: String },

    /// More than one record claims the same (os, machine) pair.
    #[error("ambiguous manifest: os={os:?} machine={machine:?} matches {arches:?}")]
    Ambiguous {
        os: String,
        machine: String,
        arches: Vec<String>,
    },

    #[error("no manifest record for arch {0:?}")]
    UnknownArch(String),
}

/// Downloaded bytes do not match the record. The artifact must be discarded.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum IntegrityError {
    #[error("size mismatch: expected {expected} bytes, got {actual}")]
    SizeMismatch { expected: u64, actual: u64 },

    #[error("sha256 mismatch: expected {expected}, got {actual}")]
    DigestMismatch { expected: String, actual: String },
}
