//! Single-stream HTTP GET of an artifact into a temp file.
//!
//! Runs in the current thread; call from `spawn_blocking` in async code.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::retry::TransferError;
use crate::storage::StorageWriter;

/// libcurl settings for artifact downloads.
#[derive(Debug, Clone, Copy)]
pub struct CurlOptions {
    pub connect_timeout: Duration,
    /// Whole-transfer timeout.
    pub timeout: Duration,
    /// Abort when slower than `low_speed_limit` bytes/s for `low_speed_time`.
    pub low_speed_limit: u32,
    pub low_speed_time: Duration,
}

impl Default for CurlOptions {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(30),
            timeout: Duration::from_secs(600),
            low_speed_limit: 1024,
            low_speed_time: Duration::from_secs(60),
        }
    }
}

/// GET `url` and write the body to `storage` from offset 0. Returns the
/// number of bytes written. Body length is not checked here; that is part
/// of artifact verification.
pub fn download(
    url: &str,
    storage: &StorageWriter,
    opts: &CurlOptions,
) -> Result<u64, TransferError> {
    let offset = Arc::new(AtomicU64::new(0));
    let offset_cb = Arc::clone(&offset);
    let write_err: Arc<Mutex<Option<std::io::Error>>> = Arc::new(Mutex::new(None));
    let write_err_cb = Arc::clone(&write_err);
    let storage_cb = storage.clone();

    let mut easy = curl::easy::Easy::new();
    easy.url(url)?;
    easy.follow_location(true)?;
    easy.max_redirections(10)?;
    easy.fail_on_error(false)?;
    easy.connect_timeout(opts.connect_timeout)?;
    easy.timeout(opts.timeout)?;
    easy.low_speed_limit(opts.low_speed_limit)?;
    easy.low_speed_time(opts.low_speed_time)?;

    let perform = {
        let mut transfer = easy.transfer();
        transfer.write_function(move |data| {
            let off = offset_cb.fetch_add(data.len() as u64, Ordering::Relaxed);
            match storage_cb.write_at(off, data) {
                Ok(()) => Ok(data.len()),
                Err(e) => {
                    if let Ok(mut slot) = write_err_cb.lock() {
                        *slot = Some(e);
                    }
                    Ok(0) // abort transfer
                }
            }
        })?;
        transfer.perform()
    };

    let stored_err = write_err.lock().ok().and_then(|mut slot| slot.take());
    if let Some(e) = stored_err {
        return Err(TransferError::Storage(e));
    }
    perform?;

    let code = easy.response_code()?;
    if !(200..300).contains(&code) {
        return Err(TransferError::Http(code));
    }

    let written = offset.load(Ordering::Relaxed);
    tracing::debug!("downloaded {} bytes from {}", written, url);
    Ok(written)
}
