//! Select the manifest record for a target (os, machine).
//!
//! Records with a platform are matched on platform plus machine alias.
//! Android builds carry no platform and are reached through their arch key
//! (`android-<abi>`). A pair matched by several records is an error; the
//! resolver never picks the first of them.

use crate::error::ResolveError;
use crate::manifest::{Manifest, ManifestRecord};
use crate::platform::HostPlatform;

/// Resolve the unique record for `target_os`/`target_machine`.
pub fn resolve<'m>(
    manifest: &'m Manifest,
    target_os: &str,
    target_machine: &str,
) -> Result<&'m ManifestRecord, ResolveError> {
    let target = HostPlatform::new(target_os, target_machine);

    let matches: Vec<&ManifestRecord> = manifest
        .records()
        .iter()
        .filter(|r| r.matches(&target.os, &target.machine))
        .collect();

    match matches.as_slice() {
        [one] => {
            let one = *one;
            tracing::debug!("resolved {} to {}", target, one.arch);
            return Ok(one);
        }
        [] => {}
        many => {
            return Err(ResolveError::Ambiguous {
                os: target.os,
                machine: target.machine,
                arches: many.iter().map(|r| r.arch.clone()).collect(),
            })
        }
    }

    if let Some(arch) = fallback_arch(&target) {
        if let Some(r) = manifest
            .records()
            .iter()
            .find(|r| r.platform.is_none() && r.arch == arch)
        {
            tracing::debug!("resolved {} to {} by arch", target, r.arch);
            return Ok(r);
        }
    }

    Err(ResolveError::UnsupportedPlatform {
        os: target.os,
        machine: target.machine,
    })
}

/// Resolve for the running host.
pub fn resolve_host(manifest: &Manifest) -> Result<&ManifestRecord, ResolveError> {
    let host = HostPlatform::detect();
    resolve(manifest, &host.os, &host.machine)
}

/// Direct lookup by arch key.
pub fn resolve_arch<'m>(
    manifest: &'m Manifest,
    arch: &str,
) -> Result<&'m ManifestRecord, ResolveError> {
    manifest
        .get(arch)
        .ok_or_else(|| ResolveError::UnknownArch(arch.to_string()))
}

/// Arch key for targets whose records have no platform.
fn fallback_arch(target: &HostPlatform) -> Option<String> {
    if target.os != "android" {
        return None;
    }
    android_abi(&target.machine).map(|abi| format!("android-{abi}"))
}

/// Android ABI name as used in manifest arch keys.
fn android_abi(machine: &str) -> Option<&'static str> {
    match machine {
        "arm" | "armv7l" | "armv8l" | "armeabi-v7a" => Some("arm"),
        "arm64" | "aarch64" | "arm64-v8a" => Some("arm64"),
        "x86" | "i686" => Some("x86"),
        "x64" | "x86_64" | "amd64" => Some("x64"),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bundled() -> Manifest {
        Manifest::bundled().unwrap()
    }

    #[test]
    fn darwin_arm64_is_mac_arm64() {
        let m = bundled();
        assert_eq!(resolve(&m, "darwin", "arm64").unwrap().arch, "mac-arm64");
        assert_eq!(resolve(&m, "darwin", "x86_64").unwrap().arch, "mac-amd64");
    }

    #[test]
    fn win32_amd64_is_exe() {
        let m = bundled();
        let r = resolve(&m, "win32", "amd64").unwrap();
        assert_eq!(r.file_name, "traceconv.exe");
        assert_eq!(r.arch, "windows-amd64");
    }

    #[test]
    fn linux_machine_aliases() {
        let m = bundled();
        assert_eq!(resolve(&m, "linux", "x86_64").unwrap().arch, "linux-amd64");
        assert_eq!(resolve(&m, "linux", "aarch64").unwrap().arch, "linux-arm64");
        for alias in ["armv6l", "armv7l", "armv8l"] {
            assert_eq!(resolve(&m, "linux", alias).unwrap().arch, "linux-arm");
        }
    }

    #[test]
    fn input_is_normalized() {
        let m = bundled();
        assert_eq!(resolve(&m, "Darwin", "ARM64").unwrap().arch, "mac-arm64");
        assert_eq!(resolve(&m, "windows", "AMD64").unwrap().arch, "windows-amd64");
    }

    #[test]
    fn unmodeled_pair_is_unsupported() {
        let m = bundled();
        assert_eq!(
            resolve(&m, "freebsd", "x86_64"),
            Err(ResolveError::UnsupportedPlatform {
                os: "freebsd".to_string(),
                machine: "x86_64".to_string()
            })
        );
        // Known OS, unknown machine.
        assert!(matches!(
            resolve(&m, "darwin", "aarch64"),
            Err(ResolveError::UnsupportedPlatform { .. })
        ));
        assert!(matches!(
            resolve(&m, "win32", "arm64"),
            Err(ResolveError::UnsupportedPlatform { .. })
        ));
    }

    #[test]
    fn android_falls_back_to_arch() {
        let m = bundled();
        assert_eq!(resolve(&m, "android", "aarch64").unwrap().arch, "android-arm64");
        assert_eq!(resolve(&m, "android", "armeabi-v7a").unwrap().arch, "android-arm");
        assert_eq!(resolve(&m, "android", "i686").unwrap().arch, "android-x86");
        assert_eq!(resolve(&m, "android", "x86_64").unwrap().arch, "android-x64");
        assert!(matches!(
            resolve(&m, "android", "mips"),
            Err(ResolveError::UnsupportedPlatform { .. })
        ));
    }

    #[test]
    fn overlapping_machines_are_ambiguous() {
        let json = r#"[
            {"arch": "linux-a", "file_name": "t", "file_size": 1,
             "url": "https://example.com/a", "sha256": "00",
             "platform": "linux", "machine": ["x86_64"]},
            {"arch": "linux-b", "file_name": "t", "file_size": 1,
             "url": "https://example.com/b", "sha256": "00",
             "platform": "linux", "machine": ["amd64", "x86_64"]}
        ]"#;
        let m = Manifest::from_json_str(json).unwrap();
        match resolve(&m, "linux", "x86_64") {
            Err(ResolveError::Ambiguous { arches, .. }) => {
                assert_eq!(arches, vec!["linux-a", "linux-b"]);
            }
            other => panic!("expected Ambiguous, got {:?}", other),
        }
        assert_eq!(resolve(&m, "linux", "amd64").unwrap().arch, "linux-b");
    }

    #[test]
    fn arch_lookup() {
        let m = bundled();
        assert_eq!(resolve_arch(&m, "linux-arm").unwrap().file_size, 6770204);
        assert_eq!(
            resolve_arch(&m, "linux-riscv64"),
            Err(ResolveError::UnknownArch("linux-riscv64".to_string()))
        );
    }

    #[test]
    fn host_resolves_or_is_unsupported() {
        let m = bundled();
        let host = HostPlatform::detect();
        match resolve_host(&m) {
            Ok(r) => assert!(r.matches(&host.os, &host.machine) || r.platform.is_none()),
            Err(ResolveError::UnsupportedPlatform { os, machine }) => {
                assert_eq!(os, host.os);
                assert_eq!(machine, host.machine);
            }
            Err(other) => panic!("unexpected error for host {}: {:?}", host, other),
        }
    }
}
