//! Built-in default catalog.
//!
//! Used when neither a feed nor a seed file is configured, and by the CLI
//! `seed` command to produce a starting seed file.

use maplewick_core::{
    Price, Product, ProductCategory, ProductId, ProductVariant, VariantId,
};
use rust_decimal::Decimal;

fn variant(id: &str, name: &str, options: &[&str]) -> ProductVariant {
    ProductVariant {
        id: VariantId::new(id),
        name: name.to_owned(),
        options: options.iter().map(|&o| o.to_owned()).collect(),
    }
}

#[allow(clippy::too_many_arguments)]
fn product(
    id: &str,
    name: &str,
    category: ProductCategory,
    price_cents: i64,
    description: &str,
    images: &[&str],
    variants: Vec<ProductVariant>,
    allows_personalization: bool,
    is_made_to_order: bool,
    tags: &[&str],
) -> Product {
    Product {
        id: ProductId::new(id),
        name: name.to_owned(),
        category,
        price: Price::new(Decimal::new(price_cents, 2)),
        description: description.to_owned(),
        images: images.iter().map(|&i| i.to_owned()).collect(),
        video_url: None,
        variants,
        allows_personalization,
        in_stock: true,
        is_made_to_order,
        tags: tags.iter().map(|&t| t.to_owned()).collect(),
    }
}

/// The handmade starter catalog.
#[must_use]
pub fn default_catalog() -> Vec<Product> {
    vec![
        product(
            "1",
            "Sparkly Valentine's Tumbler",
            ProductCategory::Drinkware,
            2499,
            "Beautiful 12 oz stainless steel tumbler with red sparkly design. \
             Includes lid, straw, and straw cleaner. Optional name personalization available.",
            &["https://images.unsplash.com/photo-1704663198277?w=1080"],
            vec![variant("size", "Size", &["12 oz"])],
            true,
            false,
            &["tumbler", "valentine", "sparkly", "personalized", "gift"],
        ),
        product(
            "2",
            "Animal Lovers Tumbler",
            ProductCategory::Drinkware,
            2999,
            "20 oz stainless steel tumbler perfect for animal lovers. Features adorable \
             pet designs. Keeps hot drinks hot and cold drinks cold. Includes lid and straw.",
            &["https://images.unsplash.com/photo-1704663198277?w=1080"],
            vec![variant("size", "Size", &["20 oz"])],
            true,
            true,
            &["tumbler", "animals", "pets", "personalized"],
        ),
        product(
            "3",
            "Breast Cancer Awareness Tumbler",
            ProductCategory::Drinkware,
            2999,
            "20 oz stainless steel tumbler with pink ribbons and hearts design. \
             Show your support with this beautiful awareness tumbler.",
            &["https://images.unsplash.com/photo-1683818051102?w=1080"],
            vec![variant("size", "Size", &["20 oz"])],
            true,
            true,
            &["tumbler", "awareness", "charity", "pink"],
        ),
        product(
            "4",
            "GO DAWGS Fan Tumbler",
            ProductCategory::Drinkware,
            2999,
            "20 oz Georgia Bulldogs fan tumbler. Perfect for game days! \
             Show your team spirit with this custom designed tumbler.",
            &["https://images.unsplash.com/photo-1704663198277?w=1080"],
            vec![variant("size", "Size", &["20 oz"])],
            false,
            true,
            &["tumbler", "sports", "georgia", "fan"],
        ),
        product(
            "5",
            "Fur Parent Wall Plaque",
            ProductCategory::HomeDecor,
            3499,
            "Charming painted gray wooden plaque perfect for pet owners. Features a hook \
             for a lint roller and comes with a roller included. Custom pet name available.",
            &["https://images.unsplash.com/photo-1760067537888?w=1080"],
            vec![variant("color", "Color", &["Gray"])],
            true,
            false,
            &["plaque", "wood", "pets", "personalized", "decor"],
        ),
        product(
            "6",
            "Custom Name Tumbler",
            ProductCategory::Personalized,
            2799,
            "Fully personalized 20 oz tumbler with custom name design. \
             Choose your favorite colors and make it uniquely yours!",
            &["https://images.unsplash.com/photo-1683818051102?w=1080"],
            vec![variant("size", "Size", &["20 oz"])],
            true,
            true,
            &["tumbler", "personalized", "custom", "name"],
        ),
    ]
}
