//! Core types for Pokemart.
//!
//! This module provides type-safe wrappers for the catalog and cart.

pub mod cart;
pub mod id;
pub mod price;
pub mod product;

pub use cart::{Cart, CartLine, CartTotals};
pub use id::*;
pub use price::{DEFAULT_BASE_EXPERIENCE, Price, format_money, two_places};
pub use product::{Product, Stat, capitalize};
