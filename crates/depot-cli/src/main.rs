use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod commands;

/// Depot package installation engine.
///
/// Depot resolves dependency graphs into a deterministic installation order
/// and tracks per-package install state between invocations. The package
/// universe is described by a TOML manifest; installed state is persisted in
/// a state file next to it.
///
/// EXAMPLES:
///     depot order                     Show the installation order
///     depot install                   Install every package
///     depot install json-utils        Install one package on demand
///     depot remove json-utils         Uninstall a package
///     depot upgrade base64 0.9.2      Bump a package version
///     depot list                      List installed packages
#[derive(Parser)]
#[command(name = "depot")]
#[command(version)]
#[command(propagate_version = true)]
struct Cli {
    /// Path to the package manifest
    #[arg(long, global = true, default_value = "depot.toml")]
    manifest: PathBuf,

    /// Path to the install state file
    #[arg(long, global = true, default_value = "depot.state")]
    state: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the resolved installation order
    ///
    /// Resolves the whole manifest and prints a dependency-first order, or
    /// fails if the graph contains a cycle.
    Order {
        /// Output the order as a JSON array
        #[arg(long, env = "DEPOT_JSON")]
        json: bool,
    },

    /// Install packages
    ///
    /// Without arguments, installs every package in the manifest in
    /// dependency order. With a package name, installs just that package
    /// and its unmet dependencies.
    #[command(visible_alias = "i")]
    Install {
        /// Package to install (omit to install everything)
        package: Option<String>,
        /// Resolve and report without writing the state file
        #[arg(long)]
        dry_run: bool,
        /// Verbose output
        #[arg(long, short = 'v')]
        verbose: bool,
        /// Quiet output (errors only)
        #[arg(long, short = 'q')]
        quiet: bool,
    },

    /// Uninstall a package
    ///
    /// Does not cascade: installed dependents are left in place, but every
    /// dependent that loses a dependency is reported as a warning.
    #[command(visible_alias = "rm")]
    Remove {
        /// Package to uninstall
        package: String,
        /// Quiet output (errors only)
        #[arg(long, short = 'q')]
        quiet: bool,
    },

    /// Upgrade a package to a new version
    ///
    /// Changes the version in place; installed state is untouched and no
    /// re-resolution happens.
    #[command(disable_version_flag = true)]
    Upgrade {
        /// Package to upgrade
        package: String,
        /// New version string
        version: String,
    },

    /// List installed packages
    #[command(visible_alias = "ls")]
    List {
        /// Output as JSON
        #[arg(long, env = "DEPOT_JSON")]
        json: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Order { json } => commands::order::run(commands::order::OrderArgs {
            manifest: cli.manifest,
            json,
        }),
        Commands::Install {
            package,
            dry_run,
            verbose,
            quiet,
        } => commands::install::run(commands::install::InstallArgs {
            manifest: cli.manifest,
            state: cli.state,
            package,
            dry_run,
            verbose,
            quiet,
        }),
        Commands::Remove { package, quiet } => {
            commands::remove::run(commands::remove::RemoveArgs {
                manifest: cli.manifest,
                state: cli.state,
                package,
                quiet,
            })
        }
        Commands::Upgrade { package, version } => {
            commands::upgrade::run(commands::upgrade::UpgradeArgs {
                manifest: cli.manifest,
                state: cli.state,
                package,
                version,
            })
        }
        Commands::List { json } => commands::list::run(commands::list::ListArgs {
            manifest: cli.manifest,
            state: cli.state,
            json,
        }),
    }
}
