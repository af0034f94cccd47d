//! Seed file generation.

use std::fs;
use std::path::Path;

use maplewick_storefront::catalog::seed::default_catalog;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SeedError {
    #[error("{0} already exists (use --force to overwrite)")]
    AlreadyExists(String),
    #[error("failed to write seed file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to serialize catalog: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Write the built-in starter catalog to `out` as pretty-printed JSON, in
/// the document-array shape the storefront's seed loader reads.
pub fn write_seed(out: &Path, force: bool) -> Result<(), SeedError> {
    if out.exists() && !force {
        return Err(SeedError::AlreadyExists(out.display().to_string()));
    }

    if let Some(parent) = out.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let catalog = default_catalog();
    fs::write(out, serde_json::to_vec_pretty(&catalog)?)?;

    tracing::info!(
        path = %out.display(),
        count = catalog.len(),
        "Seed catalog written"
    );
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_writes_readable_seed() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("nested/catalog.json");

        write_seed(&out, false).unwrap();

        let content = fs::read_to_string(&out).unwrap();
        let documents: Vec<serde_json::Value> = serde_json::from_str(&content).unwrap();
        assert_eq!(documents.len(), default_catalog().len());
        assert!(documents.first().unwrap().get("id").is_some());
    }

    #[test]
    fn test_refuses_to_overwrite_without_force() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("catalog.json");

        write_seed(&out, false).unwrap();
        assert!(matches!(
            write_seed(&out, false),
            Err(SeedError::AlreadyExists(_))
        ));
        write_seed(&out, true).unwrap();
    }
}
