//! Boutique Storefront library.
//!
//! Shopper state containers (cart, wishlist, cart drawer, notifications),
//! the JSON storage they persist to, the product catalog, and the HTTP
//! surface over all of it. Packaged as a library so the binary, the CLI and
//! the integration tests share one implementation.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod catalog;
pub mod config;
pub mod error;
pub mod middleware;
pub mod routes;
pub mod state;
pub mod storage;
