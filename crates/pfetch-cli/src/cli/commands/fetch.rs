//! `pfetch fetch` – download and verify into the cache, print the path.

use anyhow::{Context, Result};
use pfetch_core::cache::{self, FetchOptions};
use pfetch_core::config::PfetchConfig;
use pfetch_core::manifest::Manifest;

use super::select_record;
use crate::cli::TargetArgs;

pub async fn run_fetch(manifest: &Manifest, target: &TargetArgs, cfg: &PfetchConfig) -> Result<()> {
    let record = select_record(manifest, target)?.clone();
    let opts = FetchOptions::from_config(cfg)?;
    tracing::info!("fetching {} from {}", record.arch, record.url);

    let path = tokio::task::spawn_blocking(move || cache::fetch(&record, &opts))
        .await
        .context("fetch task panicked")??;
    println!("{}", path.display());
    Ok(())
}
