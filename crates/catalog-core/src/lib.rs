//! # catalog-core: Domain Logic for the Book Catalog
//!
//! Types, validation, author-set reconciliation and the three catalog
//! services. Persistence is reached only through the traits in [`store`].
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Book Catalog Architecture                        │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    catalog-api (axum)                           │   │
//! │  │    POST /book/info ─ POST /book/info/{id} ─ POST /book/author   │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ catalog-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │ validation│  │ reconcile │  │  service  │  │   │
//! │  │   │   Book    │  │   rules   │  │  SyncPlan │  │ Register  │  │   │
//! │  │   │  Author   │  │  per field│  │   plan()  │  │ Sync      │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  │ Lookup    │  │   │
//! │  │                                                └─────┬─────┘  │   │
//! │  │                                   store traits ◄─────┘        │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ implemented by                         │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                  catalog-db (SQLite via sqlx)                   │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Books, authors and request bodies
//! - [`error`] - `CatalogError`, `ValidationErrors`, `StoreError`
//! - [`validation`] - Request rules, checked before any store access
//! - [`reconcile`] - Pure diff between current and requested author ids
//! - [`store`] - Async persistence traits
//! - [`service`] - Registration, sync and lookup
//!
//! ## Example Usage
//!
//! ```rust
//! use catalog_core::reconcile;
//!
//! let plan = reconcile::plan(&[10, 11], &[10, 12]);
//! assert_eq!(plan.to_delete, vec![11]);
//! assert_eq!(plan.to_insert, vec![12]);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod reconcile;
pub mod service;
pub mod store;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{
    CatalogError, CatalogResult, ErrorKind, FieldViolation, StoreError, StoreResult,
    ValidationError, ValidationErrors,
};
pub use reconcile::SyncPlan;
pub use service::{LookupService, RegistrationService, SyncService};
pub use store::{AssociationStore, AuthorStore, BookStore, Stores};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum authors a single book request may carry.
pub const MAX_AUTHORS_PER_BOOK: usize = 100;

/// Every book must have at least one author.
pub const MIN_AUTHORS_PER_BOOK: usize = 1;
