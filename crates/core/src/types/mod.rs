//! Domain types shared across Maplewick crates.

pub mod id;
pub mod price;
pub mod product;

pub use id::*;
pub use price::*;
pub use product::*;
