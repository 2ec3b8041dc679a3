//! One manifest entry: a prebuilt artifact for a single platform build.

use serde::{Deserialize, Serialize};

/// Metadata for one downloadable artifact. Field names match the
/// serialized manifest exactly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestRecord {
    /// Platform/architecture key, unique within a manifest (e.g. `linux-arm64`).
    pub arch: String,
    /// Local file name after download.
    pub file_name: String,
    /// Expected byte length of the artifact.
    pub file_size: u64,
    pub url: String,
    /// Hex SHA-256 of the artifact.
    pub sha256: String,
    /// Normalized OS identifier (`darwin`, `linux`, `win32`). Absent for
    /// entries only reachable by arch (android builds).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub platform: Option<String>,
    /// Machine aliases accepted for `platform`, e.g. `["armv6l", "armv7l"]`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub machine: Option<Vec<String>>,
}

impl ManifestRecord {
    /// True if this record is selectable by (os, machine). Comparison is
    /// case-insensitive; callers usually pass already-normalized values.
    pub fn matches(&self, os: &str, machine: &str) -> bool {
        let Some(platform) = self.platform.as_deref() else {
            return false;
        };
        if !platform.eq_ignore_ascii_case(os) {
            return false;
        }
        self.machine
            .as_deref()
            .unwrap_or_default()
            .iter()
            .any(|m| m.eq_ignore_ascii_case(machine))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn linux_arm() -> ManifestRecord {
        ManifestRecord {
            arch: "linux-arm".to_string(),
            file_name: "traceconv".to_string(),
            file_size: 10,
            url: "https://example.com/linux-arm/traceconv".to_string(),
            sha256: "0".repeat(64),
            platform: Some("linux".to_string()),
            machine: Some(vec!["armv6l".into(), "armv7l".into(), "armv8l".into()]),
        }
    }

    #[test]
    fn matches_any_machine_alias() {
        let r = linux_arm();
        assert!(r.matches("linux", "armv6l"));
        assert!(r.matches("linux", "armv8l"));
        assert!(r.matches("Linux", "ARMV7L"));
        assert!(!r.matches("linux", "aarch64"));
        assert!(!r.matches("darwin", "armv7l"));
    }

    #[test]
    fn record_without_platform_never_matches() {
        let mut r = linux_arm();
        r.platform = None;
        r.machine = None;
        assert!(!r.matches("linux", "armv7l"));
        assert!(!r.matches("", ""));
    }

    #[test]
    fn optional_fields_omitted_when_absent() {
        let mut r = linux_arm();
        r.platform = None;
        r.machine = None;
        let json = serde_json::to_string(&r).unwrap();
        assert!(!json.contains("platform"));
        assert!(!json.contains("machine"));
    }
}
