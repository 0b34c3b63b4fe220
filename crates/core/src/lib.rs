//! Boutique Core - Shared types library.
//!
//! This crate provides the catalog types used across the Boutique workspace:
//! - `storefront` - State containers and the JSON storefront service
//! - `cli` - Command-line tools for inspecting persisted shopper state
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no storage access,
//! no HTTP. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Product identifiers, prices, products and notification severities

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
