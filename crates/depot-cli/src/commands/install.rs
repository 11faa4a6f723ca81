//! Install command (depot install)

use std::collections::HashSet;
use std::path::PathBuf;

use anyhow::{Context, Result};

use super::{load_engine, save_state};

/// Arguments for the install command
#[derive(Debug, Clone)]
pub struct InstallArgs {
    /// Path to the manifest
    pub manifest: PathBuf,
    /// Path to the state file
    pub state: PathBuf,
    /// Specific package to install (None = everything)
    pub package: Option<String>,
    /// Resolve and report without writing the state file
    pub dry_run: bool,
    /// Verbose output
    pub verbose: bool,
    /// Quiet output (errors only)
    pub quiet: bool,
}

/// Run the install command
pub fn run(args: InstallArgs) -> Result<()> {
    if args.verbose {
        println!("Reading manifest from {}", args.manifest.display());
    }

    let mut engine = load_engine(&args.manifest, &args.state)?;

    let already_installed: HashSet<String> = engine
        .installed_packages()
        .iter()
        .map(|p| p.name.clone())
        .collect();

    match &args.package {
        Some(package) => engine
            .install_on_demand(package)
            .with_context(|| format!("Failed to install '{package}'"))?,
        None => engine
            .install_all()
            .context("Failed to install packages")?,
    }

    let newly_installed: Vec<_> = engine
        .installed_packages()
        .into_iter()
        .filter(|p| !already_installed.contains(&p.name))
        .map(|p| (p.name.clone(), p.version.clone()))
        .collect();

    if !args.quiet {
        if newly_installed.is_empty() {
            println!("Nothing to install.");
        } else {
            for (name, version) in &newly_installed {
                println!("Installing {name} v{version}");
            }
            println!("Installed {} package(s).", newly_installed.len());
        }
    }

    if args.dry_run {
        if !args.quiet {
            println!("Dry run: state file not written.");
        }
        return Ok(());
    }

    save_state(&engine, &args.state)?;
    if args.verbose {
        println!("State written to {}", args.state.display());
    }
    Ok(())
}
