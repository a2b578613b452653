//! Persistence of job artifacts.
//!
//! Artifacts are flat files; parent directories are created on demand.

use anyhow::{Context, Result};
use serde::Serialize;
use std::fs;
use std::path::Path;
use tracing::{debug, info};

/// Writes `value` as pretty-printed JSON (two-space indent), replacing any
/// existing file.
pub fn write_json(path: &Path, value: &impl Serialize) -> Result<()> {
    let mut body = serde_json::to_vec_pretty(value)?;
    body.push(b'\n');
    write_bytes(path, &body)
}

/// Writes a text artifact, replacing any existing file.
pub fn write_text(path: &Path, contents: &str) -> Result<()> {
    write_bytes(path, contents.as_bytes())
}

fn write_bytes(path: &Path, body: &[u8]) -> Result<()> {
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        fs::create_dir_all(dir)
            .with_context(|| format!("failed to create directory {}", dir.display()))?;
    }
    debug!(path = %path.display(), bytes = body.len(), "Writing artifact");

    fs::write(path, body).with_context(|| format!("failed to write {}", path.display()))?;
    info!(path = %path.display(), "Artifact saved");
    Ok(())
}
