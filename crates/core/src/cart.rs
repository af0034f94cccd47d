//! Shopping cart domain model and its merge/update semantics.
//!
//! A cart is an ordered sequence of lines. Two lines are the same purchasable
//! configuration iff their product ID, variant selection, and personalization
//! all match; the cart never holds two such lines, merging them into one with
//! a summed quantity instead. Quantities are always >= 1 while a line exists:
//! a line whose quantity would drop to zero is removed outright.
//!
//! Every operation here is total: nothing in this module can fail, and
//! nothing here performs I/O. Persistence and price lookup belong to the
//! caller.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::types::{Price, ProductId, VariantId};

/// The buyer's chosen option for each variant a product defines.
///
/// Backed by a `BTreeMap` so the serialized form and equality are canonical:
/// two selections with the same (variant, option) pairs compare equal no
/// matter what order the pairs were inserted in. Callers rebuild selections
/// from scratch on every interaction, so identity has to be structural.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VariantSelection(BTreeMap<VariantId, String>);

impl VariantSelection {
    /// An empty selection, for products without variants.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the chosen option for a variant, replacing any previous choice.
    pub fn choose(&mut self, variant: impl Into<VariantId>, option: impl Into<String>) {
        self.0.insert(variant.into(), option.into());
    }

    /// The chosen option for a variant, if any.
    #[must_use]
    pub fn option_for(&self, variant: &VariantId) -> Option<&str> {
        self.0.get(variant).map(String::as_str)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Iterate over (variant, option) pairs in canonical key order.
    pub fn iter(&self) -> impl Iterator<Item = (&VariantId, &str)> {
        self.0.iter().map(|(k, v)| (k, v.as_str()))
    }
}

impl From<BTreeMap<VariantId, String>> for VariantSelection {
    fn from(map: BTreeMap<VariantId, String>) -> Self {
        Self(map)
    }
}

impl<K: Into<VariantId>, V: Into<String>> FromIterator<(K, V)> for VariantSelection {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

/// One cart line: a purchasable configuration and its quantity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    pub product_id: ProductId,
    #[serde(default)]
    pub variant_options: VariantSelection,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub personalization: Option<String>,
    pub quantity: u32,
}

impl CartItem {
    /// Whether this line is the same purchasable configuration as `input`.
    ///
    /// This is the *merge* identity: product, variant selection, and
    /// personalization (including both being absent) must all match.
    fn merges_with(&self, input: &CartItemInput) -> bool {
        self.product_id == input.product_id
            && self.variant_options == input.variant_options
            && self.personalization == input.personalization
    }

    /// Whether this line matches a (product, variant selection) pair.
    ///
    /// This is the narrower *removal* identity: personalization is ignored.
    fn matches(&self, product_id: &ProductId, variant_options: &VariantSelection) -> bool {
        &self.product_id == product_id && &self.variant_options == variant_options
    }

    /// The line total given a unit price.
    #[must_use]
    pub fn line_total(&self, unit_price: Price) -> Price {
        unit_price.times(self.quantity)
    }
}

/// An add-to-cart candidate: a [`CartItem`] without a quantity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItemInput {
    pub product_id: ProductId,
    #[serde(default)]
    pub variant_options: VariantSelection,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub personalization: Option<String>,
}

/// The shopping cart: an ordered sequence of lines.
///
/// Serializes to `{ "items": [...] }`, the shape the persistent store writes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cart {
    #[serde(default)]
    pub items: Vec<CartItem>,
}

impl Cart {
    /// An empty cart.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a candidate line to the cart.
    ///
    /// If a line with the same merge identity (product, variant selection,
    /// personalization) already exists, its quantity is incremented by one;
    /// otherwise the candidate is appended as a new line with quantity 1.
    /// Always succeeds.
    pub fn add(&mut self, input: CartItemInput) {
        if let Some(existing) = self.items.iter_mut().find(|item| item.merges_with(&input)) {
            existing.quantity = existing.quantity.saturating_add(1);
            return;
        }

        self.items.push(CartItem {
            product_id: input.product_id,
            variant_options: input.variant_options,
            personalization: input.personalization,
            quantity: 1,
        });
    }

    /// Remove every line matching (product, variant selection).
    ///
    /// Removal deliberately ignores personalization, so one removal sweeps
    /// every personalized copy of a configuration. That asymmetry with
    /// [`Cart::add`]'s merge identity is observable, long-standing behavior,
    /// kept as-is rather than "fixed". No-op when nothing matches.
    pub fn remove(&mut self, product_id: &ProductId, variant_options: &VariantSelection) {
        self.items
            .retain(|item| !item.matches(product_id, variant_options));
    }

    /// Set the quantity of every line matching (product, variant selection).
    ///
    /// The quantity is clamped to a minimum of 0, and any line set to 0 is
    /// dropped from the cart entirely. Matching ignores personalization,
    /// like [`Cart::remove`]. No-op when nothing matches.
    pub fn set_quantity(
        &mut self,
        product_id: &ProductId,
        variant_options: &VariantSelection,
        quantity: i64,
    ) {
        let quantity = u32::try_from(quantity.max(0)).unwrap_or(u32::MAX);

        for item in &mut self.items {
            if item.matches(product_id, variant_options) {
                item.quantity = quantity;
            }
        }
        self.items.retain(|item| item.quantity > 0);
    }

    /// Replace the cart with an empty line list.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Total number of units across all lines.
    #[must_use]
    pub fn count(&self) -> u64 {
        self.items.iter().map(|item| u64::from(item.quantity)).sum()
    }

    /// Sum of quantity x current price across all lines.
    ///
    /// `price_of` resolves a product's current price; a product that is no
    /// longer resolvable (deleted after being added to the cart) contributes
    /// zero rather than failing, so the total is defined for every cart.
    #[must_use]
    pub fn total<F>(&self, price_of: F) -> Price
    where
        F: Fn(&ProductId) -> Option<Price>,
    {
        self.items
            .iter()
            .map(|item| item.line_total(price_of(&item.product_id).unwrap_or(Price::ZERO)))
            .sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of distinct lines (not units).
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }
}
