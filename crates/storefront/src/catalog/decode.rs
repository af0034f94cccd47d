//! Defensive decoding of externally-sourced product documents.
//!
//! Catalog documents arrive from a feed the storefront does not control, so
//! every field is decoded individually with one safe default per field
//! rather than rejecting the whole document:
//!
//! - `name`, `description`: missing or mistyped -> `""`
//! - `category`: anything outside the fixed set -> drinkware
//! - `price`: number or numeric string; missing, mistyped, or negative -> 0
//! - `images`, `tags`: non-array -> empty list; non-string entries dropped
//! - `allowsPersonalization`, `isMadeToOrder`: strictly `true` -> true
//! - `inStock`: strictly `false` -> false (defaults to in stock)
//! - `variants`: non-array -> none; entries without string `id`/`name` dropped
//! - `videoUrl`: non-string -> absent
//!
//! Only a document without a usable string `id` is unrepresentable and
//! yields `None`; nothing here ever returns an error.

use maplewick_core::{
    Price, Product, ProductCategory, ProductId, ProductVariant, VariantId,
};
use rust_decimal::Decimal;
use rust_decimal::prelude::FromPrimitive;
use serde_json::Value;

/// Decode one raw feed document into a typed product.
#[must_use]
pub fn product_from_document(doc: &Value) -> Option<Product> {
    let id = doc.get("id").and_then(Value::as_str)?;

    Some(Product {
        id: ProductId::new(id),
        name: string_field(doc, "name"),
        category: category_field(doc),
        price: price_field(doc),
        description: string_field(doc, "description"),
        images: string_list_field(doc, "images"),
        video_url: doc
            .get("videoUrl")
            .and_then(Value::as_str)
            .map(ToOwned::to_owned),
        variants: variants_field(doc),
        allows_personalization: doc.get("allowsPersonalization") == Some(&Value::Bool(true)),
        in_stock: doc.get("inStock") != Some(&Value::Bool(false)),
        is_made_to_order: doc.get("isMadeToOrder") == Some(&Value::Bool(true)),
        tags: string_list_field(doc, "tags"),
    })
}

fn string_field(doc: &Value, key: &str) -> String {
    doc.get(key)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_owned()
}

fn category_field(doc: &Value) -> ProductCategory {
    doc.get("category")
        .and_then(Value::as_str)
        .and_then(ProductCategory::parse)
        .unwrap_or_default()
}

fn price_field(doc: &Value) -> Price {
    let amount = match doc.get("price") {
        Some(Value::Number(n)) => n.as_f64().and_then(Decimal::from_f64),
        // The feed occasionally delivers prices as decimal strings.
        Some(Value::String(s)) => s.trim().parse::<Decimal>().ok(),
        _ => None,
    };

    match amount {
        Some(d) if d.is_sign_positive() || d.is_zero() => Price::new(d),
        _ => Price::ZERO,
    }
}

fn string_list_field(doc: &Value, key: &str) -> Vec<String> {
    doc.get(key)
        .and_then(Value::as_array)
        .map(|entries| {
            entries
                .iter()
                .filter_map(Value::as_str)
                .map(ToOwned::to_owned)
                .collect()
        })
        .unwrap_or_default()
}

fn variants_field(doc: &Value) -> Vec<ProductVariant> {
    doc.get("variants")
        .and_then(Value::as_array)
        .map(|entries| entries.iter().filter_map(variant_from_value).collect())
        .unwrap_or_default()
}

fn variant_from_value(value: &Value) -> Option<ProductVariant> {
    let id = value.get("id").and_then(Value::as_str)?;
    let name = value.get("name").and_then(Value::as_str)?;

    Some(ProductVariant {
        id: VariantId::new(id),
        name: name.to_owned(),
        options: string_list_field(value, "options"),
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_well_formed_document() {
        let doc = json!({
            "id": "p1",
            "name": "Sparkly Tumbler",
            "category": "home-decor",
            "price": 24.99,
            "description": "A tumbler.",
            "images": ["a.jpg", "b.jpg"],
            "videoUrl": "v.mp4",
            "variants": [{"id": "size", "name": "Size", "options": ["12 oz"]}],
            "allowsPersonalization": true,
            "inStock": true,
            "isMadeToOrder": false,
            "tags": ["tumbler", "gift"],
        });

        let product = product_from_document(&doc).unwrap();
        assert_eq!(product.id, ProductId::new("p1"));
        assert_eq!(product.category, ProductCategory::HomeDecor);
        assert_eq!(product.price, Price::new(Decimal::new(2499, 2)));
        assert_eq!(product.images.len(), 2);
        assert_eq!(product.video_url.as_deref(), Some("v.mp4"));
        assert_eq!(product.variants.len(), 1);
        assert!(product.allows_personalization);
    }

    #[test]
    fn test_bare_document_gets_all_defaults() {
        let product = product_from_document(&json!({"id": "p1"})).unwrap();

        assert_eq!(product.name, "");
        assert_eq!(product.category, ProductCategory::Drinkware);
        assert_eq!(product.price, Price::ZERO);
        assert!(product.images.is_empty());
        assert!(product.video_url.is_none());
        assert!(product.variants.is_empty());
        assert!(!product.allows_personalization);
        assert!(product.in_stock);
        assert!(!product.is_made_to_order);
        assert!(product.tags.is_empty());
    }

    #[test]
    fn test_missing_id_is_unrepresentable() {
        assert!(product_from_document(&json!({"name": "x"})).is_none());
        assert!(product_from_document(&json!({"id": 7})).is_none());
    }

    #[test]
    fn test_mistyped_fields_fall_back() {
        let doc = json!({
            "id": "p1",
            "name": 42,
            "category": "outdoor",
            "price": "not a number",
            "images": "nope",
            "tags": [1, "ok", null],
            "variants": [{"id": "size"}, "junk", {"id": "color", "name": "Color"}],
            "inStock": false,
        });

        let product = product_from_document(&doc).unwrap();
        assert_eq!(product.name, "");
        assert_eq!(product.category, ProductCategory::Drinkware);
        assert_eq!(product.price, Price::ZERO);
        assert!(product.images.is_empty());
        assert_eq!(product.tags, vec!["ok".to_owned()]);
        // Only the variant with both id and name survives.
        assert_eq!(product.variants.len(), 1);
        assert!(!product.in_stock);
    }

    #[test]
    fn test_price_variants() {
        let price = |v: Value| {
            product_from_document(&json!({"id": "p", "price": v}))
                .unwrap()
                .price
        };

        assert_eq!(price(json!(30)), Price::new(Decimal::from(30)));
        assert_eq!(price(json!("24.99")), Price::new(Decimal::new(2499, 2)));
        assert_eq!(price(json!(-5)), Price::ZERO);
        assert_eq!(price(json!(null)), Price::ZERO);
    }
}
