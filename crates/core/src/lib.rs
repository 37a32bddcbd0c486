//! GameVerse Core - Shared types library.
//!
//! This crate provides the types shared by every GameVerse component:
//! - `storefront` - Catalog filtering, cart ledger, auth and checkout logic
//! - `cli` - Command-line driver for the storefront
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no storage access,
//! no logging. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for prices and product keys,
//!   plus the delivery, checkout and filter-selection enums

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
