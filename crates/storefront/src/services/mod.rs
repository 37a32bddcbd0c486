//! Business logic services.
//!
//! Services borrow the key-value store for the duration of one operation and
//! never hold state of their own beyond what they persist.

pub mod auth;
pub mod checkout;
