//! Domain models for the storefront.
//!
//! These are the records handed to the rendering and navigation
//! collaborators, plus the stored account type.

pub mod account;
pub mod navigation;
pub mod notice;

pub use account::UserAccount;
pub use navigation::{Destination, ProfileAction};
pub use notice::{Notice, NoticeLevel};
