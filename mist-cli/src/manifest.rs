//! Desired-state manifest loading.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use mist_reconcile::Manifest;

/// Read a manifest from disk. `.json` files are parsed as JSON, everything
/// else as YAML.
pub fn load(path: &Path) -> Result<Manifest> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read manifest {}", path.display()))?;

    let is_json = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

    if is_json {
        serde_json::from_str(&text)
            .with_context(|| format!("Invalid JSON manifest {}", path.display()))
    } else {
        serde_yaml::from_str(&text)
            .with_context(|| format!("Invalid YAML manifest {}", path.display()))
    }
}
