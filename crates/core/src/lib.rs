//! Maplewick Core - Shared domain library.
//!
//! This crate provides the domain model used across all Maplewick components:
//! - `storefront` - Catalog mirror, cart persistence, and the JSON route surface
//! - `cli` - Command-line tools for seeding and configuration checks
//!
//! # Architecture
//!
//! The core crate contains only types and the cart domain logic - no I/O, no
//! HTTP clients, no async. This keeps it lightweight and allows it to be used
//! anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for IDs and prices, plus the product model
//! - [`cart`] - The shopping cart and its merge/update semantics

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod types;

pub use cart::*;
pub use types::*;
