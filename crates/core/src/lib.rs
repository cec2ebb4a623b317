//! Pokemart Core - Shared types library.
//!
//! This crate provides the catalog and cart types used by every Pokemart
//! component:
//! - `storefront` - Local storefront web server and the catalog/cart engine
//! - `cli` - Terminal front end over the same engine
//!
//! # Architecture
//!
//! The core crate contains only types and pure operations over them - no I/O,
//! no HTTP clients, no persistence. Cart mutations here are in-memory only;
//! the storefront's `CartStore` wraps them with durable persistence.
//!
//! # Modules
//!
//! - [`types`] - Product identity, prices, products, and the cart

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
