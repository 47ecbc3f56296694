//! # Registration Service
//!
//! Book registration with duplicate prevention, and standalone author
//! registration.
//!
//! ## register_book
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  1. validate request                       (no store access on error)  │
//! │  2. count_by_content(title, identities) > 0 → DuplicateEntity          │
//! │  3. insert book                                                        │
//! │  4. for each author entry, in order:                                   │
//! │       New      → reuse id of same name+birthdate, else insert author   │
//! │       Existing → must exist, else InvalidReference                     │
//! │     insert (book, author) association                                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Steps 3-4 are not atomic on their own: a failure in step 4 leaves the
//! book and any authors inserted before it.

use tracing::{debug, info, warn};

use crate::error::{CatalogError, CatalogResult};
use crate::store::Stores;
use crate::types::{AuthorEntry, AuthorId, AuthorIdentity, AuthorProfile, BookId, BookRequest};
use crate::validation::{validate_author_profile, validate_book_request, BookRequestMode};

use super::today;

/// Registers books and authors.
pub struct RegistrationService<'a> {
    stores: Stores<'a>,
}

impl<'a> RegistrationService<'a> {
    pub fn new(stores: Stores<'a>) -> Self {
        RegistrationService { stores }
    }

    /// Registers a book and links its authors. Returns the new book id.
    ///
    /// ## Errors
    /// - `Validation` - request is malformed
    /// - `DuplicateEntity` - a book with this title already has one of the
    ///   requested authors
    /// - `InvalidReference` - an `Existing` entry names an unknown author id
    /// - `Store` - persistence failure
    pub async fn register_book(&self, request: &BookRequest) -> CatalogResult<BookId> {
        validate_book_request(request, BookRequestMode::Register, today())?;

        let identities: Vec<AuthorIdentity> =
            request.authors.iter().map(AuthorEntry::identity).collect();
        let duplicates = self
            .stores
            .books
            .count_by_content(&request.title, &identities)
            .await?;
        if duplicates > 0 {
            warn!(title = %request.title, duplicates, "Rejecting duplicate book registration");
            return Err(CatalogError::DuplicateEntity {
                title: request.title.clone(),
            });
        }

        let book_id = self.stores.books.insert(&request.summary()).await?;
        debug!(book_id, "Inserted book");

        for entry in &request.authors {
            let author_id = self.resolve_author(entry).await?;
            self.stores.associations.insert(book_id, author_id).await?;
        }

        info!(
            book_id,
            title = %request.title,
            authors = request.authors.len(),
            "Registered book"
        );
        Ok(book_id)
    }

    /// Registers a standalone author. Authors sharing name and birthdate are
    /// allowed.
    pub async fn register_author(&self, profile: &AuthorProfile) -> CatalogResult<AuthorId> {
        validate_author_profile(profile, today())?;

        let author_id = self.stores.authors.insert(profile).await?;
        info!(author_id, name = %profile.name, "Registered author");
        Ok(author_id)
    }

    async fn resolve_author(&self, entry: &AuthorEntry) -> CatalogResult<AuthorId> {
        match entry {
            AuthorEntry::Existing { id, .. } => {
                if !self.stores.authors.exists_by_id(*id).await? {
                    warn!(author_id = id, "Registration references unknown author");
                    return Err(CatalogError::missing_author(*id));
                }
                Ok(*id)
            }
            AuthorEntry::New { .. } => {
                let profile = entry.profile();
                if let Some(id) = self.stores.authors.find_id_by_profile(&profile).await? {
                    debug!(author_id = id, name = %profile.name, "Reusing existing author");
                    return Ok(id);
                }
                let id = self.stores.authors.insert(&profile).await?;
                debug!(author_id = id, name = %profile.name, "Inserted author");
                Ok(id)
            }
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::service::memory::{date, Fault, MemoryStore};

    fn new_author(name: &str) -> AuthorEntry {
        AuthorEntry::New {
            name: name.to_string(),
            birthdate: date(1970, 1, 1),
        }
    }

    fn request(title: &str, authors: Vec<AuthorEntry>) -> BookRequest {
        BookRequest {
            title: title.to_string(),
            price: 2500,
            is_published: Some(true),
            authors,
        }
    }

    #[tokio::test]
    async fn test_register_inserts_book_authors_and_links() {
        let store = MemoryStore::new();
        let service = RegistrationService::new(Stores::from_single(&store));

        let book_id = service
            .register_book(&request("Rust", vec![new_author("Jane Doe"), new_author("Joe")]))
            .await
            .unwrap();

        assert_eq!(store.book(book_id).unwrap().title, "Rust");
        assert_eq!(store.author_count(), 2);
        assert_eq!(store.associated(book_id).len(), 2);
    }

    #[tokio::test]
    async fn test_register_reuses_author_with_same_profile() {
        let store = MemoryStore::new();
        let existing = store.seed_author("Jane Doe", date(1970, 1, 1));
        let service = RegistrationService::new(Stores::from_single(&store));

        let book_id = service
            .register_book(&request("Other Book", vec![new_author("Jane Doe")]))
            .await
            .unwrap();

        assert_eq!(store.author_count(), 1);
        assert_eq!(store.associated(book_id), vec![existing]);
    }

    #[tokio::test]
    async fn test_register_duplicate_title_and_author_writes_nothing() {
        let store = MemoryStore::new();
        let author = store.seed_author("Jane Doe", date(1970, 1, 1));
        let book = store.seed_book("Rust");
        store.seed_link(book, author);
        store.clear_log();
        let service = RegistrationService::new(Stores::from_single(&store));

        let err = service
            .register_book(&request("Rust", vec![new_author("Jane Doe")]))
            .await
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::DuplicateEntity);
        assert!(store.writes().is_empty());
        assert_eq!(store.book_count(), 1);
    }

    #[tokio::test]
    async fn test_register_duplicate_detected_by_author_id() {
        let store = MemoryStore::new();
        let author = store.seed_author("Jane Doe", date(1970, 1, 1));
        let book = store.seed_book("Rust");
        store.seed_link(book, author);
        let service = RegistrationService::new(Stores::from_single(&store));

        let err = service
            .register_book(&request(
                "Rust",
                vec![AuthorEntry::Existing {
                    id: author,
                    name: "Renamed".to_string(),
                    birthdate: date(1970, 1, 1),
                }],
            ))
            .await
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::DuplicateEntity);
    }

    #[tokio::test]
    async fn test_same_author_different_title_is_allowed() {
        let store = MemoryStore::new();
        let author = store.seed_author("Jane Doe", date(1970, 1, 1));
        let book = store.seed_book("Rust");
        store.seed_link(book, author);
        let service = RegistrationService::new(Stores::from_single(&store));

        let book_id = service
            .register_book(&request("Rust 2nd Edition", vec![new_author("Jane Doe")]))
            .await
            .unwrap();

        assert_eq!(store.associated(book_id), vec![author]);
    }

    #[tokio::test]
    async fn test_register_unknown_author_id_keeps_partial_writes() {
        let store = MemoryStore::new();
        let service = RegistrationService::new(Stores::from_single(&store));

        let err = service
            .register_book(&request(
                "Rust",
                vec![
                    new_author("Jane Doe"),
                    AuthorEntry::Existing {
                        id: 99,
                        name: "Ghost".to_string(),
                        birthdate: date(1960, 1, 1),
                    },
                ],
            ))
            .await
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::InvalidReference);
        assert_eq!(err.to_string(), "author id 99 does not exist");
        // The book, the first author and its link stay persisted.
        assert_eq!(store.book_count(), 1);
        assert_eq!(store.author_count(), 1);
    }

    #[tokio::test]
    async fn test_register_validation_happens_before_store_access() {
        let store = MemoryStore::new();
        let service = RegistrationService::new(Stores::from_single(&store));

        let mut bad = request("", vec![]);
        bad.price = -1;
        let err = service.register_book(&bad).await.unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Validation);
        assert!(store.log().is_empty());
    }

    #[tokio::test]
    async fn test_register_store_failure_is_internal() {
        let store = MemoryStore::new();
        store.fail_on(Fault::InsertBook);
        let service = RegistrationService::new(Stores::from_single(&store));

        let err = service
            .register_book(&request("Rust", vec![new_author("Jane Doe")]))
            .await
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::StoreFailure);
    }

    #[tokio::test]
    async fn test_register_author_allows_same_profile_twice() {
        let store = MemoryStore::new();
        let service = RegistrationService::new(Stores::from_single(&store));
        let profile = AuthorProfile::new("Jane Doe", date(1970, 1, 1));

        let first = service.register_author(&profile).await.unwrap();
        let second = service.register_author(&profile).await.unwrap();

        assert_ne!(first, second);
        assert_eq!(store.author_count(), 2);
    }
}
