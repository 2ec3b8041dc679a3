//! `pfetch list` – show every record in the manifest.

use anyhow::Result;
use pfetch_core::manifest::Manifest;

pub fn run_list(manifest: &Manifest) -> Result<()> {
    println!(
        "{:<16} {:<9} {:<24} {:>10} {}",
        "ARCH", "PLATFORM", "MACHINE", "SIZE", "FILE"
    );
    for r in manifest.records() {
        let machine = r
            .machine
            .as_ref()
            .map(|m| m.join(","))
            .unwrap_or_else(|| "-".to_string());
        println!(
            "{:<16} {:<9} {:<24} {:>10} {}",
            r.arch,
            r.platform.as_deref().unwrap_or("-"),
            machine,
            r.file_size,
            r.file_name
        );
    }
    Ok(())
}
