//! Load-time structural checks. Any failure rejects the whole manifest.

use std::collections::HashSet;
use std::path::{Component, Path};

use crate::error::ManifestError;

use super::record::ManifestRecord;

/// Checks arch uniqueness, cache-safe names, the platform/machine pairing
/// and URL shape.
/// Digest format is not checked here; see `lint_digests`.
pub fn validate_records(records: &[ManifestRecord]) -> Result<(), ManifestError> {
    let mut seen = HashSet::with_capacity(records.len());
    for r in records {
        if !seen.insert(r.arch.as_str()) {
            return Err(ManifestError::DuplicateArch {
                arch: r.arch.clone(),
            });
        }

        check_path_component(r, "arch", &r.arch)?;
        check_path_component(r, "file_name", &r.file_name)?;

        match (&r.platform, &r.machine) {
            (Some(_), None) => {
                return Err(ManifestError::PlatformWithoutMachine {
                    arch: r.arch.clone(),
                })
            }
            (None, Some(_)) => {
                return Err(ManifestError::MachineWithoutPlatform {
                    arch: r.arch.clone(),
                })
            }
            (Some(_), Some(m)) if m.is_empty() => {
                return Err(ManifestError::EmptyMachine {
                    arch: r.arch.clone(),
                })
            }
            _ => {}
        }

        validate_url(r)?;
    }
    Ok(())
}

/// `value` becomes one path component under the cache root; it must be
/// exactly one normal component (no separators, `..`, roots or prefixes).
fn check_path_component(
    r: &ManifestRecord,
    field: &'static str,
    value: &str,
) -> Result<(), ManifestError> {
    let mut components = Path::new(value).components();
    match (components.next(), components.next()) {
        (Some(Component::Normal(c)), None) if c == value => Ok(()),
        _ => Err(ManifestError::UnsafePathComponent {
            arch: r.arch.clone(),
            field,
            value: value.to_string(),
        }),
    }
}

fn validate_url(r: &ManifestRecord) -> Result<(), ManifestError> {
    let invalid = |reason: String| ManifestError::InvalidUrl {
        arch: r.arch.clone(),
        url: r.url.clone(),
        reason,
    };
    let parsed = url::Url::parse(&r.url).map_err(|e| invalid(e.to_string()))?;
    match parsed.scheme() {
        "http" | "https" => {}
        other => return Err(invalid(format!("unsupported scheme {other}"))),
    }
    if parsed.host_str().is_none() {
        return Err(invalid("missing host".to_string()));
    }
    Ok(())
}
