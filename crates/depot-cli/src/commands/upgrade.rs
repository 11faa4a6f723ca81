//! Upgrade command (depot upgrade)

use std::path::PathBuf;

use anyhow::{Context, Result};
use depot_core::PackageError;

use super::{load_engine, save_state};

/// Arguments for the upgrade command
#[derive(Debug, Clone)]
pub struct UpgradeArgs {
    /// Path to the manifest
    pub manifest: PathBuf,
    /// Path to the state file
    pub state: PathBuf,
    /// Package to upgrade
    pub package: String,
    /// New version string
    pub version: String,
}

/// Run the upgrade command
pub fn run(args: UpgradeArgs) -> Result<()> {
    let mut engine = load_engine(&args.manifest, &args.state)?;

    match engine.upgrade(&args.package, &args.version) {
        Ok(()) => {
            println!("Upgraded {} to version {}", args.package, args.version);
            save_state(&engine, &args.state)
        }
        Err(PackageError::AlreadyCurrent { package, version }) => {
            println!("{package} is already at version {version}");
            Ok(())
        }
        Err(err) => Err(err).with_context(|| format!("Failed to upgrade '{}'", args.package)),
    }
}
