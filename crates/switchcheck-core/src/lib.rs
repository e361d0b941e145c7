//! Core types, catalog storage, and configuration for switchcheck.
//!
//! - [`types`]: module handles, resolved names, diagnostics
//! - [`catalog`]: the per-module [`ConstantCatalog`](catalog::ConstantCatalog)
//! - [`store`]: the [`FactStore`](store::FactStore) trait and an in-memory implementation
//! - [`config`]: configuration loading from `switchcheck.json`
//! - [`hash`]: catalog fingerprints (base62 of xxhash64)

pub mod catalog;
pub mod config;
pub mod hash;
pub mod store;
pub mod types;
