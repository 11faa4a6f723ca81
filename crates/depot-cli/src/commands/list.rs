//! List command (depot list)

use std::path::PathBuf;

use anyhow::Result;
use serde_json::json;

use super::load_engine;

/// Arguments for the list command
#[derive(Debug, Clone)]
pub struct ListArgs {
    /// Path to the manifest
    pub manifest: PathBuf,
    /// Path to the state file
    pub state: PathBuf,
    /// Output as JSON
    pub json: bool,
}

/// Run the list command
pub fn run(args: ListArgs) -> Result<()> {
    let engine = load_engine(&args.manifest, &args.state)?;

    let mut installed = engine.installed_packages();
    installed.sort_by(|a, b| a.name.cmp(&b.name));

    if args.json {
        let records: Vec<_> = installed
            .iter()
            .map(|p| json!({ "name": p.name, "version": p.version }))
            .collect();
        println!("{}", serde_json::to_string_pretty(&records)?);
        return Ok(());
    }

    if installed.is_empty() {
        println!("No packages installed.");
        return Ok(());
    }

    println!("Installed packages:");
    for package in installed {
        println!("  {} v{}", package.name, package.version);
    }
    Ok(())
}
