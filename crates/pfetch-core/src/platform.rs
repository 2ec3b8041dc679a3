//! Host platform detection.
//!
//! Produces the (os, machine) pair in the naming the manifest uses: Python
//! style `sys.platform` OS names and `uname -m` style machine names, which
//! differ per OS (`arm64` on macOS, `aarch64` on Linux, `amd64` on Windows).

use std::fmt;

/// Normalized OS and machine identifiers for resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostPlatform {
    pub os: String,
    pub machine: String,
}

impl HostPlatform {
    pub fn new(os: &str, machine: &str) -> Self {
        Self {
            os: normalize_os(os),
            machine: machine.trim().to_ascii_lowercase(),
        }
    }

    /// The platform this binary was built for.
    pub fn detect() -> Self {
        from_rust_target(std::env::consts::OS, std::env::consts::ARCH)
    }
}

impl fmt::Display for HostPlatform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.os, self.machine)
    }
}

/// Map common OS spellings onto manifest platform names. Unknown names are
/// lowercased and passed through.
pub fn normalize_os(os: &str) -> String {
    let os = os.trim().to_ascii_lowercase();
    match os.as_str() {
        "macos" | "mac" | "osx" | "darwin" => "darwin".to_string(),
        "windows" | "win" | "win32" | "win64" => "win32".to_string(),
        _ => os,
    }
}

/// Map Rust's `target_os`/`target_arch` names to manifest naming.
pub fn from_rust_target(os: &str, arch: &str) -> HostPlatform {
    let os = normalize_os(os);
    let machine = match (os.as_str(), arch) {
        ("darwin", "aarch64") => "arm64",
        ("win32", "x86_64") => "amd64",
        ("win32", "aarch64") => "arm64",
        ("win32", "x86") => "x86",
        (_, "x86") => "i686",
        (_, "arm") => "armv7l",
        (_, other) => other,
    };
    HostPlatform {
        os,
        machine: machine.to_string(),
    }
}
