//! Installation order command (depot order)

use anyhow::{Context, Result};
use depot_core::{Installer, Manifest};
use std::path::PathBuf;

/// Arguments for the order command
#[derive(Debug, Clone)]
pub struct OrderArgs {
    /// Path to the manifest
    pub manifest: PathBuf,
    /// Output as a JSON array
    pub json: bool,
}

/// Run the order command
pub fn run(args: OrderArgs) -> Result<()> {
    let manifest = Manifest::from_file(&args.manifest)
        .with_context(|| format!("Failed to read manifest {}", args.manifest.display()))?;

    let mut engine = Installer::new();
    manifest.populate(&mut engine);

    let order = engine
        .resolve_order()
        .context("Failed to resolve installation order")?;

    if args.json {
        println!("{}", serde_json::to_string(&order)?);
        return Ok(());
    }

    if order.is_empty() {
        println!("No packages in manifest.");
        return Ok(());
    }

    println!("Installation order:");
    for (index, name) in order.iter().enumerate() {
        println!("  {}. {}", index + 1, name);
    }
    Ok(())
}
