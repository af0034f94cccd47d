//! Maplewick Storefront library.
//!
//! This crate provides the storefront functionality as a library,
//! allowing it to be tested and reused by the CLI tools.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart_store;
pub mod catalog;
pub mod config;
pub mod error;
pub mod gateway;
pub mod routes;
pub mod state;
