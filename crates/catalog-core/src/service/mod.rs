//! # Services
//!
//! The three catalog services. Each borrows a [`Stores`] bundle for the
//! duration of one call chain and performs its store operations sequentially.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  RegistrationService  register_book, register_author                   │
//! │  SyncService          update_book, update_book_authors, update_author  │
//! │  LookupService        find_books_by_author_name, get_book              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! None of them open a transaction. Whether a call is atomic depends on the
//! stores passed in.
//!
//! [`Stores`]: crate::store::Stores

use chrono::{NaiveDate, Utc};

pub mod lookup;
pub mod registration;
pub mod sync;

pub use lookup::LookupService;
pub use registration::RegistrationService;
pub use sync::SyncService;

/// The date birthdates are validated against.
pub(crate) fn today() -> NaiveDate {
    Utc::now().date_naive()
}

#[cfg(test)]
pub(crate) mod memory;
