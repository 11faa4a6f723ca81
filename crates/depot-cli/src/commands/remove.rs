//! Remove command (depot remove)

use std::path::PathBuf;

use anyhow::{Context, Result};

use super::{load_engine, save_state};

/// Arguments for the remove command
#[derive(Debug, Clone)]
pub struct RemoveArgs {
    /// Path to the manifest
    pub manifest: PathBuf,
    /// Path to the state file
    pub state: PathBuf,
    /// Package to uninstall
    pub package: String,
    /// Quiet output (errors only)
    pub quiet: bool,
}

/// Run the remove command
pub fn run(args: RemoveArgs) -> Result<()> {
    let mut engine = load_engine(&args.manifest, &args.state)?;

    let orphaned = engine
        .uninstall(&args.package)
        .with_context(|| format!("Failed to remove '{}'", args.package))?;

    if !args.quiet {
        println!("Removed {}", args.package);
        for dependent in &orphaned {
            println!(
                "warning: '{dependent}' is still installed but depends on '{}'",
                args.package
            );
        }
    }

    save_state(&engine, &args.state)
}
