//! `pfetch verify` – check a local file against a manifest record.

use anyhow::{Context, Result};
use pfetch_core::manifest::Manifest;
use pfetch_core::verify::verify_path;
use std::path::Path;

use super::select_record;
use crate::cli::TargetArgs;

pub fn run_verify(manifest: &Manifest, target: &TargetArgs, path: &Path) -> Result<()> {
    let record = select_record(manifest, target)?;
    verify_path(record, path)
        .with_context(|| format!("{} does not match {}", path.display(), record.arch))?;
    println!("OK  {}  ({})", path.display(), record.arch);
    Ok(())
}
