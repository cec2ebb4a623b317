//! Pokemart storefront library.
//!
//! Catalog loading, the persistent cart, and the shop state machine, plus the
//! HTTP surface that renders them. Exposed as a library so the CLI and the
//! integration tests share one implementation.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod catalog;
pub mod config;
pub mod error;
pub mod routes;
pub mod shop;
pub mod state;
