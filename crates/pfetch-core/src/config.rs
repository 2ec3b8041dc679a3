use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use crate::downloader::CurlOptions;

/// Retry policy parameters (optional section in config.toml).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetryConfig {
    /// Maximum number of attempts per download (including the first).
    pub max_attempts: u32,
    /// Base delay in seconds for exponential backoff (e.g. 0.25 = 250ms).
    pub base_delay_secs: f64,
    pub max_delay_secs: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 5,
            base_delay_secs: 0.25,
            max_delay_secs: 30,
        }
    }
}

/// Global configuration loaded from `~/.config/pfetch/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PfetchConfig {
    /// Alternate manifest file; the bundled traceconv table when unset.
    #[serde(default)]
    pub manifest_path: Option<PathBuf>,
    /// Artifact cache root; `$XDG_CACHE_HOME/pfetch` when unset.
    #[serde(default)]
    pub cache_dir: Option<PathBuf>,
    pub connect_timeout_secs: u64,
    /// Whole-download timeout.
    pub timeout_secs: u64,
    /// How many times a download that fails verification is re-fetched
    /// before giving up.
    pub max_integrity_attempts: u32,
    #[serde(default)]
    pub retry: Option<RetryConfig>,
}

impl Default for PfetchConfig {
    fn default() -> Self {
        Self {
            manifest_path: None,
            cache_dir: None,
            connect_timeout_secs: 30,
            timeout_secs: 600,
            max_integrity_attempts: 3,
            retry: None,
        }
    }
}

impl PfetchConfig {
    pub fn curl_options(&self) -> CurlOptions {
        CurlOptions {
            connect_timeout: Duration::from_secs(self.connect_timeout_secs),
            timeout: Duration::from_secs(self.timeout_secs),
            ..CurlOptions::default()
        }
    }

    /// Configured cache root, or the XDG default.
    pub fn cache_root(&self) -> Result<PathBuf> {
        match &self.cache_dir {
            Some(dir) => Ok(dir.clone()),
            None => default_cache_dir(),
        }
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("pfetch")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

pub fn default_cache_dir() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("pfetch")?;
    Ok(xdg_dirs.get_cache_home().join("pfetch"))
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<PfetchConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = PfetchConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(&path)?;
    let cfg: PfetchConfig = toml::from_str(&data)?;
    Ok(cfg)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_values() {
        let cfg = PfetchConfig::default();
        assert!(cfg.manifest_path.is_none());
        assert!(cfg.cache_dir.is_none());
        assert_eq!(cfg.connect_timeout_secs, 30);
        assert_eq!(cfg.timeout_secs, 600);
        assert_eq!(cfg.max_integrity_attempts, 3);
    }

    #[test]
    fn config_toml_roundtrip() {
        let cfg = PfetchConfig::default();
        let toml = toml::to_string_pretty(&cfg).unwrap();
        let parsed: PfetchConfig = toml::from_str(&toml).unwrap();
        assert_eq!(parsed.timeout_secs, cfg.timeout_secs);
        assert_eq!(parsed.max_integrity_attempts, cfg.max_integrity_attempts);
        assert!(parsed.retry.is_none());
    }

    #[test]
    fn config_toml_custom_values() {
        let toml = r#"
            manifest_path = "/opt/manifests/traceconv.json"
            cache_dir = "/var/cache/pfetch"
            connect_timeout_secs = 5
            timeout_secs = 60
            max_integrity_attempts = 1

            [retry]
            max_attempts = 3
            base_delay_secs = 0.5
            max_delay_secs = 15
        "#;
        let cfg: PfetchConfig = toml::from_str(toml).unwrap();
        assert_eq!(
            cfg.manifest_path.as_deref(),
            Some(std::path::Path::new("/opt/manifests/traceconv.json"))
        );
        assert_eq!(cfg.cache_root().unwrap(), PathBuf::from("/var/cache/pfetch"));
        assert_eq!(cfg.max_integrity_attempts, 1);
        let retry = cfg.retry.as_ref().unwrap();
        assert_eq!(retry.max_attempts, 3);
        assert!((retry.base_delay_secs - 0.5).abs() < 1e-9);
        assert_eq!(retry.max_delay_secs, 15);
    }

    #[test]
    fn curl_options_follow_config() {
        let cfg = PfetchConfig {
            connect_timeout_secs: 7,
            timeout_secs: 70,
            ..PfetchConfig::default()
        };
        let opts = cfg.curl_options();
        assert_eq!(opts.connect_timeout, Duration::from_secs(7));
        assert_eq!(opts.timeout, Duration::from_secs(70));
    }

    #[test]
    fn extreme_retry_delays_build_fetch_options() {
        for value in ["1e300", "inf", "-5.0"] {
            let toml = format!(
                r#"
                cache_dir = "/var/cache/pfetch"
                connect_timeout_secs = 5
                timeout_secs = 60
                max_integrity_attempts = 2

                [retry]
                max_attempts = 3
                base_delay_secs = {value}
                max_delay_secs = 15
            "#
            );
            let cfg: PfetchConfig = toml::from_str(&toml).unwrap();
            let opts = crate::cache::FetchOptions::from_config(&cfg).unwrap();
            assert!(opts.retry.base_delay <= Duration::from_secs(15), "{value}");
        }
    }
}
