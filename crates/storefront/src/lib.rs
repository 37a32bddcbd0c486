//! GameVerse storefront library.
//!
//! The storefront's behavior without a browser: the catalog filter engine,
//! the cart and order ledger, prototype accounts and the checkout wizard, all
//! persisted through a [`storage::KeyValueStore`]. [`Storefront`] ties them
//! together for one session.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod catalog;
pub mod config;
pub mod error;
pub mod models;
pub mod services;
pub mod state;
pub mod storage;

pub use error::{Result, StorefrontError};
pub use state::Storefront;
