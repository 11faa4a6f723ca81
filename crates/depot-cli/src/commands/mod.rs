pub mod install;
pub mod list;
pub mod order;
pub mod remove;
pub mod upgrade;

use anyhow::{Context, Result};
use depot_core::{Installer, Manifest, StateFile};
use std::path::Path;

/// Load the manifest, build an engine over it and replay any saved state.
pub(crate) fn load_engine(manifest_path: &Path, state_path: &Path) -> Result<Installer> {
    let manifest = Manifest::from_file(manifest_path)
        .with_context(|| format!("Failed to read manifest {}", manifest_path.display()))?;

    let mut engine = Installer::new();
    manifest.populate(&mut engine);

    if state_path.exists() {
        let state = StateFile::from_file(state_path)
            .with_context(|| format!("Failed to read state file {}", state_path.display()))?;
        state
            .apply_to(&mut engine)
            .context("Failed to replay install state")?;
    }

    Ok(engine)
}

/// Persist the engine's installed set back to the state file.
pub(crate) fn save_state(engine: &Installer, state_path: &Path) -> Result<()> {
    StateFile::capture(engine)
        .write_to_file(state_path)
        .with_context(|| format!("Failed to write state file {}", state_path.display()))
}
