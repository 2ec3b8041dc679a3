use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::config::PfetchConfig;
use crate::downloader::{self, CurlOptions};
use crate::error::IntegrityError;
use crate::manifest::ManifestRecord;
use crate::retry::{run_with_retry, RetryPolicy, TransferError};
use crate::storage::{temp_path, StorageWriterBuilder};
use crate::verify::verify_path;

use super::layout::CacheLayout;

#[derive(Debug, Clone)]
pub struct FetchOptions {
    pub layout: CacheLayout,
    /// Applied to transport failures within one download.
    pub retry: RetryPolicy,
    /// Number of full downloads attempted when verification fails.
    pub max_integrity_attempts: u32,
    pub curl: CurlOptions,
}

impl FetchOptions {
    pub fn from_config(cfg: &PfetchConfig) -> Result<Self> {
        Ok(Self {
            layout: CacheLayout::new(cfg.cache_root()?),
            retry: cfg
                .retry
                .as_ref()
                .map(RetryPolicy::from_config)
                .unwrap_or_default(),
            max_integrity_attempts: cfg.max_integrity_attempts.max(1),
            curl: cfg.curl_options(),
        })
    }
}

/// Return a verified local copy of `record`'s artifact, downloading it if
/// the cache has no valid copy. A binary that fails verification is never
/// left at the final path.
pub fn fetch(record: &ManifestRecord, opts: &FetchOptions) -> Result<PathBuf> {
    let final_path = opts.layout.artifact_path(record);

    if final_path.exists() {
        match verify_path(record, &final_path) {
            Ok(()) => {
                tracing::debug!("cache hit for {} at {}", record.arch, final_path.display());
                return Ok(final_path);
            }
            Err(e) => {
                tracing::warn!(
                    "cached {} failed verification ({:#}); re-downloading",
                    final_path.display(),
                    e
                );
                std::fs::remove_file(&final_path)
                    .with_context(|| format!("remove {}", final_path.display()))?;
            }
        }
    }

    let attempts = opts.max_integrity_attempts.max(1);
    let mut attempt = 1u32;
    loop {
        match download_verified(record, &final_path, opts) {
            Ok(()) => {
                tracing::info!("fetched {} to {}", record.arch, final_path.display());
                return Ok(final_path);
            }
            Err(e) if e.downcast_ref::<IntegrityError>().is_some() && attempt < attempts => {
                tracing::warn!(
                    "download of {} failed verification (attempt {}/{}): {:#}",
                    record.arch,
                    attempt,
                    attempts,
                    e
                );
                attempt += 1;
            }
            Err(e) => return Err(e),
        }
    }
}

/// One download into the temp file, verified before the rename.
fn download_verified(
    record: &ManifestRecord,
    final_path: &std::path::Path,
    opts: &FetchOptions,
) -> Result<()> {
    let tmp = temp_path(final_path);
    tracing::debug!("downloading {} to {}", record.url, tmp.display());

    let written = run_with_retry(&opts.retry, |attempt| {
        let mut builder = StorageWriterBuilder::create(&tmp).map_err(storage_error)?;
        builder.preallocate(record.file_size).map_err(storage_error)?;
        let writer = builder.build();
        if attempt > 1 {
            tracing::debug!("download attempt {} for {}", attempt, record.arch);
        }
        let n = downloader::download(&record.url, &writer, &opts.curl)?;
        Ok((writer, n))
    });

    let (writer, n) = match written {
        Ok(v) => v,
        Err(e) => {
            let _ = std::fs::remove_file(&tmp);
            return Err(e).with_context(|| format!("download {}", record.url));
        }
    };

    let checked = writer
        .truncate(n)
        .and_then(|()| writer.sync())
        .and_then(|()| verify_path(record, writer.temp_path()));
    if let Err(e) = checked {
        writer.discard()?;
        return Err(e);
    }
    writer.finalize(final_path, true)?;
    Ok(())
}

fn storage_error(e: anyhow::Error) -> TransferError {
    TransferError::Storage(std::io::Error::new(std::io::ErrorKind::Other, e))
}
