//! Local read cache of the externally owned product catalog.
//!
//! The mirror holds the current product list behind a watch channel. Each
//! feed delivery replaces the list wholesale; readers take cheap `Arc`
//! snapshots and view components can subscribe for change notifications.
//! The mirror never fails a lookup - a product that is gone simply is not
//! found, which callers treat as an ordinary transient state.

pub mod decode;
pub mod feed;
pub mod seed;

use std::sync::Arc;

use maplewick_core::{Price, Product, ProductId};
use tokio::sync::watch;

/// Shared, wholesale-replaceable product list.
///
/// Cheaply cloneable; all clones observe the same list.
#[derive(Debug, Clone)]
pub struct CatalogMirror {
    tx: watch::Sender<Arc<Vec<Product>>>,
}

impl CatalogMirror {
    /// Create a mirror seeded with an initial product list.
    #[must_use]
    pub fn new(products: Vec<Product>) -> Self {
        let (tx, _rx) = watch::channel(Arc::new(products));
        Self { tx }
    }

    /// Create an empty mirror (live-feed startup before the first delivery).
    #[must_use]
    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    /// Replace the product list wholesale with already-decoded products.
    pub fn replace(&self, products: Vec<Product>) {
        tracing::debug!(count = products.len(), "Catalog replaced");
        self.tx.send_replace(Arc::new(products));
    }

    /// Replace the product list wholesale from raw feed documents.
    ///
    /// Each document is decoded defensively; malformed fields get safe
    /// defaults and documents without a usable ID are dropped. This never
    /// propagates a decoding failure.
    pub fn replace_documents(&self, documents: &[serde_json::Value]) {
        let mut dropped = 0usize;
        let products: Vec<Product> = documents
            .iter()
            .filter_map(|doc| {
                let product = decode::product_from_document(doc);
                if product.is_none() {
                    dropped += 1;
                }
                product
            })
            .collect();

        if dropped > 0 {
            tracing::warn!(dropped, "Dropped feed documents without a usable id");
        }
        self.replace(products);
    }

    /// Snapshot of the current product list.
    #[must_use]
    pub fn products(&self) -> Arc<Vec<Product>> {
        self.tx.borrow().clone()
    }

    /// Look up a product by ID. Absence is an ordinary outcome, not an error.
    #[must_use]
    pub fn product_by_id(&self, id: &ProductId) -> Option<Product> {
        self.tx.borrow().iter().find(|p| &p.id == id).cloned()
    }

    /// Current price of a product, if it is still in the catalog.
    #[must_use]
    pub fn price_of(&self, id: &ProductId) -> Option<Price> {
        self.tx.borrow().iter().find(|p| &p.id == id).map(|p| p.price)
    }

    /// Subscribe to catalog replacements.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Arc<Vec<Product>>> {
        self.tx.subscribe()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.tx.borrow().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tx.borrow().is_empty()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_replace_documents_wholesale() {
        let mirror = CatalogMirror::new(seed::default_catalog());
        assert!(!mirror.is_empty());

        mirror.replace_documents(&[
            json!({"id": "a", "name": "Mug", "price": 12.5}),
            json!({"name": "no id, dropped"}),
            json!({"id": "b"}),
        ]);

        assert_eq!(mirror.len(), 2);
        let mug = mirror.product_by_id(&ProductId::new("a")).unwrap();
        assert_eq!(mug.name, "Mug");
        assert!(mirror.product_by_id(&ProductId::new("missing")).is_none());
    }

    #[test]
    fn test_price_of_tracks_replacements() {
        let mirror = CatalogMirror::empty();
        assert!(mirror.price_of(&ProductId::new("a")).is_none());

        mirror.replace_documents(&[json!({"id": "a", "price": 10})]);
        assert!(mirror.price_of(&ProductId::new("a")).is_some());

        mirror.replace_documents(&[]);
        assert!(mirror.price_of(&ProductId::new("a")).is_none());
    }

    #[tokio::test]
    async fn test_subscribers_observe_replacements() {
        let mirror = CatalogMirror::empty();
        let mut rx = mirror.subscribe();

        mirror.replace_documents(&[json!({"id": "a"})]);

        rx.changed().await.unwrap();
        assert_eq!(rx.borrow().len(), 1);
    }
}
