//! Durable round trip of the cart across process restarts.
//!
//! The cart persists as a single named JSON slot (`cart.json` inside the data
//! directory). Loading is infallible from the caller's point of view: a
//! missing or unparseable slot yields an empty cart so startup never fails on
//! a corrupt file. Saving happens after every mutation; writes go through a
//! temp file and rename so a crash mid-write never leaves a torn slot.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use maplewick_core::Cart;
use thiserror::Error;

/// Errors that can occur while persisting the cart.
#[derive(Debug, Error)]
pub enum CartStoreError {
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    #[error("serialize error: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// File-backed persistence for the single cart slot.
#[derive(Debug, Clone)]
pub struct CartStore {
    path: PathBuf,
}

impl CartStore {
    /// Create a store around the given slot path. Nothing is touched on disk
    /// until the first load or save.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The slot path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the persisted cart.
    ///
    /// A missing slot is an ordinary first run and yields an empty cart; an
    /// unreadable or unparseable slot is logged and also yields an empty
    /// cart. This never fails.
    #[must_use]
    pub fn load(&self) -> Cart {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Cart::new(),
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "Failed to read cart slot; starting empty");
                return Cart::new();
            }
        };

        match serde_json::from_slice(&bytes) {
            Ok(cart) => cart,
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "Cart slot is corrupt; starting empty");
                Cart::new()
            }
        }
    }

    /// Serialize and save the cart to the slot.
    ///
    /// # Errors
    ///
    /// Returns `CartStoreError` if the directory cannot be created or the
    /// file cannot be written or renamed into place.
    pub fn save(&self, cart: &Cart) -> Result<(), CartStoreError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let json = serde_json::to_vec_pretty(cart)?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, json)?;
        fs::rename(&tmp, &self.path)?;

        Ok(())
    }
}
