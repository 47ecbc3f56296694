//! # Store Traits
//!
//! Persistence contracts the services run against.
//!
//! ## Seams
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Store Contracts                                 │
//! │                                                                         │
//! │  RegistrationService   SyncService   LookupService                     │
//! │          │                  │              │                            │
//! │          └──────────┬───────┴──────┬───────┘                            │
//! │                     ▼              ▼                                    │
//! │    &dyn BookStore   &dyn AuthorStore   &dyn AssociationStore            │
//! │                     │                                                   │
//! │         ┌───────────┴────────────┐                                      │
//! │         ▼                        ▼                                      │
//! │  catalog-db repositories   catalog-db StoreScope (one transaction)     │
//! │  (one unit of work per call)                                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every method is an independent unit of work unless the implementation
//! itself is transactional. Implementations must be `Send + Sync` so the
//! services can be driven from any Tokio worker.

use async_trait::async_trait;

use crate::error::StoreResult;
use crate::types::{Author, AuthorId, AuthorIdentity, AuthorProfile, BookId, BookSummary};

/// Persistence for `books` rows.
#[async_trait]
pub trait BookStore: Send + Sync {
    /// Returns true if a book with `id` exists.
    async fn exists_by_id(&self, id: BookId) -> StoreResult<bool>;

    /// Counts, summed over `authors`, the books titled `title` that are
    /// already linked to each author.
    ///
    /// `ById` matches the association directly; `ByProfile` matches on the
    /// author's exact name and birthdate.
    async fn count_by_content(&self, title: &str, authors: &[AuthorIdentity])
        -> StoreResult<i64>;

    async fn fetch_by_id(&self, id: BookId) -> StoreResult<Option<BookSummary>>;

    /// Inserts a book and returns its generated id.
    async fn insert(&self, book: &BookSummary) -> StoreResult<BookId>;

    /// Overwrites title, price and publish flag, refreshing `updated_at`.
    async fn update_by_id(&self, id: BookId, book: &BookSummary) -> StoreResult<()>;
}

/// Persistence for `authors` rows.
#[async_trait]
pub trait AuthorStore: Send + Sync {
    async fn exists_by_id(&self, id: AuthorId) -> StoreResult<bool>;

    async fn fetch_by_id(&self, id: AuthorId) -> StoreResult<Option<Author>>;

    /// Returns the id of an author with exactly this name and birthdate.
    /// When several match, the lowest id wins.
    async fn find_id_by_profile(&self, profile: &AuthorProfile) -> StoreResult<Option<AuthorId>>;

    /// Inserts an author and returns its generated id.
    async fn insert(&self, profile: &AuthorProfile) -> StoreResult<AuthorId>;

    /// Overwrites name and birthdate, refreshing `updated_at`.
    async fn update_by_id(&self, id: AuthorId, profile: &AuthorProfile) -> StoreResult<()>;

    /// Book ids linked to any author whose name equals `name`, in join order.
    async fn find_book_ids_by_name(&self, name: &str) -> StoreResult<Vec<BookId>>;
}

/// Persistence for `books_authors` rows.
#[async_trait]
pub trait AssociationStore: Send + Sync {
    /// Author ids linked to `book_id`.
    async fn find_author_ids(&self, book_id: BookId) -> StoreResult<Vec<AuthorId>>;

    /// Links the pair. Inserting an existing pair is a no-op.
    async fn insert(&self, book_id: BookId, author_id: AuthorId) -> StoreResult<()>;

    /// Unlinks the pair. Deleting a missing pair is a no-op.
    async fn delete(&self, book_id: BookId, author_id: AuthorId) -> StoreResult<()>;
}

/// The three stores a service call needs, borrowed together.
///
/// ## Usage
/// ```rust,ignore
/// let (books, authors, links) = (db.books(), db.authors(), db.book_authors());
/// let stores = Stores::new(&books, &authors, &links);
/// SyncService::new(stores).update_book(1, &request).await?;
/// ```
#[derive(Clone, Copy)]
pub struct Stores<'a> {
    pub books: &'a dyn BookStore,
    pub authors: &'a dyn AuthorStore,
    pub associations: &'a dyn AssociationStore,
}

impl<'a> Stores<'a> {
    pub fn new(
        books: &'a dyn BookStore,
        authors: &'a dyn AuthorStore,
        associations: &'a dyn AssociationStore,
    ) -> Self {
        Stores {
            books,
            authors,
            associations,
        }
    }

    /// Uses one value for all three stores.
    pub fn from_single<S>(store: &'a S) -> Self
    where
        S: BookStore + AuthorStore + AssociationStore,
    {
        Stores {
            books: store,
            authors: store,
            associations: store,
        }
    }
}
