//! CLI for the pfetch prebuilt fetcher.

mod commands;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use pfetch_core::config;
use pfetch_core::manifest::Manifest;
use std::path::PathBuf;

use commands::{run_checksum, run_fetch, run_lint, run_list, run_resolve, run_verify};

/// Top-level CLI for pfetch.
#[derive(Debug, Parser)]
#[command(name = "pfetch")]
#[command(about = "pfetch: resolve, download and verify prebuilt traceconv binaries", long_about = None)]
pub struct Cli {
    /// Use this manifest file instead of the bundled traceconv table.
    #[arg(long, global = true, value_name = "PATH")]
    pub manifest: Option<PathBuf>,

    #[command(subcommand)]
    pub command: CliCommand,
}

/// Target selection shared by resolve/fetch/verify. Missing parts default
/// to the running host.
#[derive(Debug, Clone, Default, Args)]
pub struct TargetArgs {
    /// OS name (darwin, linux, win32, android; macos/windows accepted).
    #[arg(long)]
    pub os: Option<String>,
    /// Machine name as reported by `uname -m` (x86_64, arm64, aarch64, ...).
    #[arg(long)]
    pub machine: Option<String>,
    /// Select a record directly by arch key (e.g. linux-arm64).
    #[arg(long, conflicts_with_all = ["os", "machine"])]
    pub arch: Option<String>,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// List all records in the manifest.
    List,

    /// Show the record selected for a target.
    Resolve {
        #[command(flatten)]
        target: TargetArgs,
        /// Print the record as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Download (or reuse from cache) and verify the artifact for a target.
    Fetch {
        #[command(flatten)]
        target: TargetArgs,
    },

    /// Verify a local file against a manifest record.
    Verify {
        /// Path to the file.
        path: PathBuf,
        #[command(flatten)]
        target: TargetArgs,
    },

    /// Validate the manifest and report malformed digests.
    Lint,

    /// Compute SHA-256 of a file.
    Checksum {
        /// Path to the file.
        path: PathBuf,
    },
}

impl CliCommand {
    pub async fn run_from_args() -> Result<()> {
        let cli = Cli::parse();
        let cfg = config::load_or_init()?;
        tracing::debug!("loaded config: {:?}", cfg);

        let manifest_path = cli.manifest.or_else(|| cfg.manifest_path.clone());
        let load = || Manifest::load_or_bundled(manifest_path.as_deref());

        match cli.command {
            CliCommand::List => run_list(&load()?)?,
            CliCommand::Resolve { target, json } => run_resolve(&load()?, &target, json)?,
            CliCommand::Fetch { target } => run_fetch(&load()?, &target, &cfg).await?,
            CliCommand::Verify { path, target } => run_verify(&load()?, &target, &path)?,
            CliCommand::Lint => run_lint(manifest_path.as_deref())?,
            CliCommand::Checksum { path } => run_checksum(&path)?,
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests;
