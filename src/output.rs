//! Writing the product collection to disk.

use crate::site::models::Product;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

/// Failures while persisting the collection. All of them are fatal to a run.
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("Failed to create output directory {}: {source}", .path.display())]
    CreateDir { path: PathBuf, source: io::Error },

    #[error("Failed to write {}: {source}", .path.display())]
    Write { path: PathBuf, source: io::Error },

    #[error("Failed to move {} into place at {}: {source}", .from.display(), .to.display())]
    Rename { from: PathBuf, to: PathBuf, source: io::Error },

    #[error("Failed to encode products: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Writes products as a pretty-printed (2-space) JSON array, replacing any
/// existing file. Parent directories are created as needed.
///
/// The document goes to a sibling temp file first and is renamed over the
/// target, so readers never see a half-written file.
pub fn write_products(path: &Path, products: &[Product]) -> Result<(), OutputError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .map_err(|source| OutputError::CreateDir { path: parent.to_path_buf(), source })?;
    }

    let json = serde_json::to_string_pretty(products)?;

    let tmp = temp_path(path);
    fs::write(&tmp, json.as_bytes())
        .map_err(|source| OutputError::Write { path: tmp.clone(), source })?;

    fs::rename(&tmp, path).map_err(|source| {
        let _ = fs::remove_file(&tmp);
        OutputError::Rename { from: tmp.clone(), to: path.to_path_buf(), source }
    })?;

    debug!("Wrote {} products to {}", products.len(), path.display());
    Ok(())
}

/// Reads a previously written collection.
pub fn read_products(path: &Path) -> anyhow::Result<Vec<Product>> {
    use anyhow::Context;

    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read product file: {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse product file: {}", path.display()))
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(|n| n.to_os_string()).unwrap_or_else(|| "products.json".into());
    name.push(".tmp");
    path.with_file_name(name)
}
