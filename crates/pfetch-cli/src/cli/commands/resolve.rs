//! `pfetch resolve` – show the record chosen for a target.

use anyhow::Result;
use pfetch_core::manifest::{Manifest, ManifestRecord};
use pfetch_core::platform::HostPlatform;
use pfetch_core::resolver;

use crate::cli::TargetArgs;

/// Pick the record for `target`: by arch when given, else by os/machine
/// with the host filling in whatever is missing.
pub fn select_record<'m>(manifest: &'m Manifest, target: &TargetArgs) -> Result<&'m ManifestRecord> {
    if let Some(arch) = &target.arch {
        return Ok(resolver::resolve_arch(manifest, arch)?);
    }
    let host = HostPlatform::detect();
    let os = target.os.as_deref().unwrap_or(&host.os);
    let machine = target.machine.as_deref().unwrap_or(&host.machine);
    Ok(resolver::resolve(manifest, os, machine)?)
}

pub fn run_resolve(manifest: &Manifest, target: &TargetArgs, json: bool) -> Result<()> {
    let r = select_record(manifest, target)?;
    if json {
        println!("{}", serde_json::to_string_pretty(r)?);
        return Ok(());
    }
    println!("arch:      {}", r.arch);
    println!("file_name: {}", r.file_name);
    println!("file_size: {}", r.file_size);
    println!("url:       {}", r.url);
    println!("sha256:    {}", r.sha256);
    if let Some(p) = &r.platform {
        println!("platform:  {}", p);
    }
    if let Some(m) = &r.machine {
        println!("machine:   {}", m.join(", "));
    }
    Ok(())
}
