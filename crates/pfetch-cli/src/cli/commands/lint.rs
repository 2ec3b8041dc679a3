//! `pfetch lint` – load the manifest and report malformed digests.

use anyhow::Result;
use pfetch_core::manifest::{lint_digests, Manifest, GENERATOR};
use std::path::Path;

pub fn run_lint(path: Option<&Path>) -> Result<()> {
    let manifest = Manifest::load_or_bundled(path)?;
    match path {
        Some(p) => println!("manifest {}: {} records", p.display(), manifest.len()),
        None => println!("bundled manifest ({}): {} records", GENERATOR, manifest.len()),
    }

    let anomalies = lint_digests(&manifest);
    for a in &anomalies {
        println!("  {}", a);
    }
    if !anomalies.is_empty() {
        anyhow::bail!("{} record(s) with malformed sha256", anomalies.len());
    }
    println!("ok");
    Ok(())
}
