//! # Sync Service
//!
//! Updates a book and reconciles its author associations against a request.
//!
//! ## Two Request Shapes
//! ```text
//! update_book_authors(book, [10, 12])              pure id list
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  book exists? → current = {10, 11} (empty → InvalidState)              │
//! │  delete 11                                                              │
//! │  for 10, 12: author exists? (else InvalidReference, abort) → link      │
//! └─────────────────────────────────────────────────────────────────────────┘
//!
//! update_book(book, {title, ..., authors: [Existing 10, New "X"]})
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  validate → book exists? → update book fields                          │
//! │  current = find_author_ids(book)                                       │
//! │  delete every current id not named by an Existing entry                │
//! │  Existing → overwrite author name/birthdate                            │
//! │  New      → insert author (not linked to the book)                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Partial Effects
//! Store calls run one after another with no rollback. When a later step
//! fails, the book update and any deletions already made stay applied. Pass
//! a transactional store to get all-or-nothing behavior.

use tracing::{debug, info, warn};

use crate::error::{CatalogError, CatalogResult};
use crate::reconcile;
use crate::store::Stores;
use crate::types::{AuthorEntry, AuthorId, AuthorProfile, BookAuthorsRequest, BookId, BookRequest};
use crate::validation::{validate_author_profile, validate_book_request, BookRequestMode};

use super::today;

/// Applies book and author updates.
pub struct SyncService<'a> {
    stores: Stores<'a>,
}

impl<'a> SyncService<'a> {
    pub fn new(stores: Stores<'a>) -> Self {
        SyncService { stores }
    }

    /// Replaces the book's author set with exactly `request.author_ids`.
    ///
    /// The id list itself is not validated. An id that is not positive or not
    /// stored fails the existence check; an empty list unlinks every author.
    ///
    /// Only `plan.to_delete` drives writes. The insert pass walks the request
    /// in order and re-links retained ids too, so `to_insert` and `retained`
    /// are reported in the debug log only.
    ///
    /// ## Errors
    /// - `NotFound` - the book does not exist
    /// - `InvalidState` - the book currently has no authors
    /// - `InvalidReference` - a requested author does not exist; deletions
    ///   and links made before it are kept
    pub async fn update_book_authors(
        &self,
        book_id: BookId,
        request: &BookAuthorsRequest,
    ) -> CatalogResult<()> {
        self.ensure_book(book_id).await?;

        let current = self.stores.associations.find_author_ids(book_id).await?;
        if current.is_empty() {
            warn!(book_id, "Book has no authors to sync from");
            return Err(CatalogError::InvalidState { book_id });
        }

        let plan = reconcile::plan(&current, &request.author_ids);
        debug!(
            book_id,
            delete = ?plan.to_delete,
            insert = ?plan.to_insert,
            retained = ?plan.retained,
            "Computed author sync plan"
        );
        self.unlink_all(book_id, &plan.to_delete).await?;

        for &author_id in &request.author_ids {
            if !self.stores.authors.exists_by_id(author_id).await? {
                warn!(book_id, author_id, "Author sync references unknown author");
                return Err(CatalogError::missing_author(author_id));
            }
            self.stores.associations.insert(book_id, author_id).await?;
        }

        info!(book_id, authors = request.author_ids.len(), "Synced book authors");
        Ok(())
    }

    /// Updates the book fields, drops associations to authors the request no
    /// longer references, and writes every author entry.
    ///
    /// `Existing` entries overwrite the stored author; an unknown id is a
    /// silent no-op. `New` entries create an author that is not linked to
    /// the book.
    ///
    /// ## Errors
    /// - `Validation` - request is malformed, or tries to unpublish
    /// - `NotFound` - the book does not exist
    pub async fn update_book(&self, book_id: BookId, request: &BookRequest) -> CatalogResult<()> {
        validate_book_request(request, BookRequestMode::Update, today())?;
        self.ensure_book(book_id).await?;

        self.stores
            .books
            .update_by_id(book_id, &request.summary())
            .await?;
        debug!(book_id, title = %request.title, "Updated book fields");

        let current = self.stores.associations.find_author_ids(book_id).await?;
        let stale = reconcile::stale_ids(&current, &request.referenced_author_ids());
        self.unlink_all(book_id, &stale).await?;

        for entry in &request.authors {
            match entry {
                AuthorEntry::Existing { id, .. } => {
                    self.stores
                        .authors
                        .update_by_id(*id, &entry.profile())
                        .await?;
                    debug!(book_id, author_id = id, "Updated author");
                }
                AuthorEntry::New { .. } => {
                    let author_id = self.stores.authors.insert(&entry.profile()).await?;
                    debug!(book_id, author_id, "Inserted author without association");
                }
            }
        }

        info!(book_id, removed = stale.len(), "Updated book");
        Ok(())
    }

    /// Overwrites an author's name and birthdate.
    pub async fn update_author(
        &self,
        author_id: AuthorId,
        profile: &AuthorProfile,
    ) -> CatalogResult<()> {
        validate_author_profile(profile, today())?;

        if !self.stores.authors.exists_by_id(author_id).await? {
            return Err(CatalogError::author_not_found(author_id));
        }
        self.stores.authors.update_by_id(author_id, profile).await?;

        info!(author_id, name = %profile.name, "Updated author");
        Ok(())
    }

    async fn ensure_book(&self, book_id: BookId) -> CatalogResult<()> {
        if self.stores.books.exists_by_id(book_id).await? {
            Ok(())
        } else {
            Err(CatalogError::book_not_found(book_id))
        }
    }

    async fn unlink_all(&self, book_id: BookId, author_ids: &[AuthorId]) -> CatalogResult<()> {
        for &author_id in author_ids {
            self.stores.associations.delete(book_id, author_id).await?;
            debug!(book_id, author_id, "Removed author association");
        }
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
