//! CLI subcommand implementations.

pub mod devices;
pub mod play;
pub mod render;

use anyhow::Context;
use solovox_config::Patch;
use std::path::Path;

/// Load a patch file, or fall back to the built-in default patch.
pub fn load_patch(path: Option<&Path>) -> anyhow::Result<Patch> {
    match path {
        Some(path) => {
            let patch = Patch::load(path)
                .with_context(|| format!("loading patch '{}'", path.display()))?;
            tracing::info!(name = %patch.name, "patch loaded");
            Ok(patch)
        }
        None => Ok(Patch::default()),
    }
}
