//! SHA-256 helpers for artifact verification.
//!
//! Files are hashed in fixed-size chunks so large binaries never need to be
//! held in memory.

use anyhow::{Context, Result};
use sha2::{Digest, Sha256};
use std::fs::File;
use std::io::Read;
use std::path::Path;

const BUF_SIZE: usize = 64 * 1024;

/// Length of a SHA-256 digest in hex characters.
pub const SHA256_HEX_LEN: usize = 64;

/// Compute SHA-256 of a file and return the digest as lowercase hex.
pub fn sha256_path(path: &Path) -> Result<String> {
    let mut f = File::open(path).with_context(|| format!("open {}", path.display()))?;
    let mut hasher = Sha256::new();
    let mut buf = [0u8; BUF_SIZE];
    loop {
        let n = f
            .read(&mut buf)
            .with_context(|| format!("read {}", path.display()))?;
        if n == 0 {
            break;
        }
        hasher.update(&buf[..n]);
    }
    Ok(hex::encode(hasher.finalize()))
}

/// SHA-256 of an in-memory buffer as lowercase hex.
pub fn sha256_bytes(data: &[u8]) -> String {
    hex::encode(Sha256::digest(data))
}

/// True if `s` is exactly 64 hex characters (either case).
pub fn is_sha256_hex(s: &str) -> bool {
    s.len() == SHA256_HEX_LEN && s.bytes().all(|b| b.is_ascii_hexdigit())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const EMPTY: &str = "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855";

    #[test]
    fn sha256_path_empty_file() {
        let f = tempfile::NamedTempFile::new().unwrap();
        assert_eq!(sha256_path(f.path()).unwrap(), EMPTY);
    }

    #[test]
    fn sha256_path_known_content() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        f.write_all(b"hello\n").unwrap();
        f.flush().unwrap();
        assert_eq!(
            sha256_path(f.path()).unwrap(),
            "5891b5b522d5df086d0ff0b110fbd9d21bb4fc7163af34d08286a2e846f6be03"
        );
    }

    #[test]
    fn sha256_path_spans_multiple_chunks() {
        let body: Vec<u8> = (0u8..=255).cycle().take(BUF_SIZE * 3 + 17).collect();
        let mut f = tempfile::NamedTempFile::new().unwrap();
        f.write_all(&body).unwrap();
        f.flush().unwrap();
        assert_eq!(sha256_path(f.path()).unwrap(), sha256_bytes(&body));
    }

    #[test]
    fn sha256_path_missing_file_errs() {
        let dir = tempfile::tempdir().unwrap();
        assert!(sha256_path(&dir.path().join("missing")).is_err());
    }

    #[test]
    fn sha256_bytes_matches_known_digest() {
        assert_eq!(sha256_bytes(b""), EMPTY);
    }

    #[test]
    fn hex_format_check() {
        assert!(is_sha256_hex(EMPTY));
        assert!(is_sha256_hex(&EMPTY.to_uppercase()));
        assert!(!is_sha256_hex(&EMPTY[..63]));
        assert!(!is_sha256_hex(&format!("{EMPTY}0")));
        assert!(!is_sha256_hex(&"g".repeat(64)));
    }
}
