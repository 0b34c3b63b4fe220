//! Core types for Boutique.
//!
//! This module provides type-safe wrappers for common catalog concepts.

pub mod id;
pub mod price;
pub mod product;
pub mod status;

pub use id::*;
pub use price::{Price, PriceError};
pub use product::{ALL_CATEGORIES, Product};
pub use status::Severity;
