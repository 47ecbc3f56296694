//! # catalog-db: Database Layer for the Book Catalog
//!
//! SQLite persistence behind the `catalog-core` store traits, using sqlx for
//! async operations.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Book Catalog Data Flow                           │
//! │                                                                         │
//! │  HTTP handler → RegistrationService / SyncService / LookupService      │
//! │       │                                                                 │
//! │       ▼  &dyn BookStore, &dyn AuthorStore, &dyn AssociationStore        │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     catalog-db (THIS CRATE)                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │   Database    │    │  Repositories │    │  Migrations  │  │   │
//! │  │   │   (pool.rs)   │    │  book.rs      │    │  (embedded)  │  │   │
//! │  │   │               │    │  author.rs    │    │              │  │   │
//! │  │   │ SqlitePool    │◄───│  book_author  │    │ 001_init.sql │  │   │
//! │  │   │ StoreScope    │    │               │    │              │  │   │
//! │  │   └───────────────┘    └───────────────┘    └──────────────┘  │   │
//! │  │                                                                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     SQLite Database (catalog.db)                │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Database error types
//! - [`repository`] - Pool-backed store implementations
//! - [`scope`] - Transaction-backed store implementation
//!
//! ## Usage
//!
//! ```rust,ignore
//! use catalog_core::{Stores, SyncService};
//! use catalog_db::{Database, DbConfig};
//!
//! let db = Database::new(DbConfig::new("catalog.db")).await?;
//!
//! let (books, authors, links) = (db.books(), db.authors(), db.book_authors());
//! let stores = Stores::new(&books, &authors, &links);
//! SyncService::new(stores).update_book_authors(1, &request).await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;
pub mod scope;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};
pub use scope::StoreScope;

// Repository re-exports for convenience
pub use repository::author::AuthorRepository;
pub use repository::book::BookRepository;
pub use repository::book_author::BookAuthorRepository;
