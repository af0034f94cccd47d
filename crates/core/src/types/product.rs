//! Product catalog records.
//!
//! Products are owned by the external catalog authority; the storefront only
//! mirrors them. Wire names are camelCase to match the catalog document
//! format, and `variants`/`videoUrl` are omitted from serialized output when
//! absent, matching what the admin gateway expects.

use serde::{Deserialize, Serialize};

use crate::types::id::{ProductId, VariantId};
use crate::types::price::Price;

/// The fixed set of shop categories.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProductCategory {
    /// Also the decode default for unknown or missing categories.
    #[default]
    Drinkware,
    Personalized,
    HomeDecor,
}

impl ProductCategory {
    /// All categories, in shop display order.
    pub const ALL: [Self; 3] = [Self::Drinkware, Self::Personalized, Self::HomeDecor];

    /// The wire name of this category.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Drinkware => "drinkware",
            Self::Personalized => "personalized",
            Self::HomeDecor => "home-decor",
        }
    }

    /// Parse a wire name, returning `None` for anything outside the fixed set.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.as_str() == value)
    }
}

impl std::fmt::Display for ProductCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A named selectable dimension of a product (e.g. "Size") with its options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductVariant {
    pub id: VariantId,
    pub name: String,
    pub options: Vec<String>,
}

impl ProductVariant {
    /// Whether `option` is one of this variant's listed options.
    #[must_use]
    pub fn offers(&self, option: &str) -> bool {
        self.options.iter().any(|o| o == option)
    }
}

/// A product record as mirrored from the external catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub category: ProductCategory,
    pub price: Price,
    pub description: String,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video_url: Option<String>,
    /// Dimensions a buyer must choose from before adding to cart.
    /// Empty means the product has no variants.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub variants: Vec<ProductVariant>,
    pub allows_personalization: bool,
    pub in_stock: bool,
    pub is_made_to_order: bool,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl Product {
    /// Look up a variant definition by ID.
    #[must_use]
    pub fn variant(&self, id: &VariantId) -> Option<&ProductVariant> {
        self.variants.iter().find(|v| &v.id == id)
    }

    /// The gateway payload for this product (everything but the ID).
    #[must_use]
    pub fn data(&self) -> ProductData {
        ProductData {
            name: self.name.clone(),
            category: self.category,
            price: self.price,
            description: self.description.clone(),
            images: self.images.clone(),
            video_url: self.video_url.clone(),
            variants: self.variants.clone(),
            allows_personalization: self.allows_personalization,
            in_stock: self.in_stock,
            is_made_to_order: self.is_made_to_order,
            tags: self.tags.clone(),
        }
    }
}

/// Product fields without an ID: the payload shape the admin gateway takes
/// for create and update operations (the authority assigns IDs).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductData {
    pub name: String,
    pub category: ProductCategory,
    pub price: Price,
    pub description: String,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video_url: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub variants: Vec<ProductVariant>,
    pub allows_personalization: bool,
    pub in_stock: bool,
    pub is_made_to_order: bool,
    #[serde(default)]
    pub tags: Vec<String>,
}
