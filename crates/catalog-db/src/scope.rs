//! # Store Scope
//!
//! All three store traits over one SQLite transaction.
//!
//! ## Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    One Service Call, One Transaction                    │
//! │                                                                         │
//! │  db.begin_scope()          BEGIN                                        │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  SyncService::new(scope.stores()).update_book_authors(...)             │
//! │       │   every store call runs on the same connection                 │
//! │       │                                                                 │
//! │       ├── Ok  → scope.commit()     COMMIT                              │
//! │       └── Err → scope.rollback()   ROLLBACK (deletions undone too)     │
//! │                                                                         │
//! │  Dropping an unfinished scope rolls back.                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The transaction holds a pooled connection until it finishes. With an
//! in-memory database (one connection) nothing else can query meanwhile.

use async_trait::async_trait;
use sqlx::{Sqlite, SqliteConnection, SqlitePool, Transaction};
use tokio::sync::Mutex;
use tracing::debug;

use crate::error::{DbError, DbResult};
use crate::repository::{author, book, book_author};
use catalog_core::{
    AssociationStore, Author, AuthorId, AuthorIdentity, AuthorProfile, AuthorStore, BookId,
    BookStore, BookSummary, StoreResult, Stores,
};

/// A transaction usable wherever the services expect stores.
pub struct StoreScope {
    tx: Mutex<Option<Transaction<'static, Sqlite>>>,
}

impl StoreScope {
    pub(crate) async fn begin(pool: &SqlitePool) -> DbResult<Self> {
        let tx = pool
            .begin()
            .await
            .map_err(|e| DbError::TransactionFailed(e.to_string()))?;
        debug!("Store scope opened");

        Ok(StoreScope {
            tx: Mutex::new(Some(tx)),
        })
    }

    /// Borrows the scope as a [`Stores`] bundle.
    pub fn stores(&self) -> Stores<'_> {
        Stores::from_single(self)
    }

    /// Commits every write made through this scope.
    pub async fn commit(self) -> DbResult<()> {
        let tx = self.tx.into_inner().ok_or_else(finished)?;
        tx.commit()
            .await
            .map_err(|e| DbError::TransactionFailed(e.to_string()))?;
        debug!("Store scope committed");
        Ok(())
    }

    /// Discards every write made through this scope.
    pub async fn rollback(self) -> DbResult<()> {
        let tx = self.tx.into_inner().ok_or_else(finished)?;
        tx.rollback()
            .await
            .map_err(|e| DbError::TransactionFailed(e.to_string()))?;
        debug!("Store scope rolled back");
        Ok(())
    }
}

fn finished() -> DbError {
    DbError::TransactionFailed("store scope already finished".to_string())
}

fn active<'a>(
    slot: &'a mut Option<Transaction<'static, Sqlite>>,
) -> DbResult<&'a mut SqliteConnection> {
    slot.as_mut().map(|tx| &mut **tx).ok_or_else(finished)
}

// =============================================================================
// Store Implementations
// =============================================================================

#[async_trait]
impl BookStore for StoreScope {
    async fn exists_by_id(&self, id: BookId) -> StoreResult<bool> {
        let mut guard = self.tx.lock().await;
        let conn = active(&mut guard)?;
        Ok(book::exists(conn, id).await?)
    }

    async fn count_by_content(
        &self,
        title: &str,
        authors: &[AuthorIdentity],
    ) -> StoreResult<i64> {
        let mut guard = self.tx.lock().await;
        let conn = active(&mut guard)?;

        let mut total = 0;
        for identity in authors {
            total += match identity {
                AuthorIdentity::ById(author_id) => {
                    book::count_by_title_and_author_id(&mut *conn, title, *author_id).await?
                }
                AuthorIdentity::ByProfile(profile) => {
                    book::count_by_title_and_profile(&mut *conn, title, profile).await?
                }
            };
        }
        Ok(total)
    }

    async fn fetch_by_id(&self, id: BookId) -> StoreResult<Option<BookSummary>> {
        let mut guard = self.tx.lock().await;
        let conn = active(&mut guard)?;
        Ok(book::fetch(conn, id).await?.map(|b| b.summary()))
    }

    async fn insert(&self, summary: &BookSummary) -> StoreResult<BookId> {
        let mut guard = self.tx.lock().await;
        let conn = active(&mut guard)?;
        Ok(book::insert(conn, summary).await?)
    }

    async fn update_by_id(&self, id: BookId, summary: &BookSummary) -> StoreResult<()> {
        let mut guard = self.tx.lock().await;
        let conn = active(&mut guard)?;
        Ok(book::update(conn, id, summary).await?)
    }
}

#[async_trait]
impl AuthorStore for StoreScope {
    async fn exists_by_id(&self, id: AuthorId) -> StoreResult<bool> {
        let mut guard = self.tx.lock().await;
        let conn = active(&mut guard)?;
        Ok(author::exists(conn, id).await?)
    }

    async fn fetch_by_id(&self, id: AuthorId) -> StoreResult<Option<Author>> {
        let mut guard = self.tx.lock().await;
        let conn = active(&mut guard)?;
        Ok(author::fetch(conn, id).await?)
    }

    async fn find_id_by_profile(&self, profile: &AuthorProfile) -> StoreResult<Option<AuthorId>> {
        let mut guard = self.tx.lock().await;
        let conn = active(&mut guard)?;
        Ok(author::find_id_by_profile(conn, profile).await?)
    }

    async fn insert(&self, profile: &AuthorProfile) -> StoreResult<AuthorId> {
        let mut guard = self.tx.lock().await;
        let conn = active(&mut guard)?;
        Ok(author::insert(conn, profile).await?)
    }

    async fn update_by_id(&self, id: AuthorId, profile: &AuthorProfile) -> StoreResult<()> {
        let mut guard = self.tx.lock().await;
        let conn = active(&mut guard)?;
        Ok(author::update(conn, id, profile).await?)
    }

    async fn find_book_ids_by_name(&self, name: &str) -> StoreResult<Vec<BookId>> {
        let mut guard = self.tx.lock().await;
        let conn = active(&mut guard)?;
        Ok(author::find_book_ids_by_name(conn, name).await?)
    }
}

#[async_trait]
impl AssociationStore for StoreScope {
    async fn find_author_ids(&self, book_id: BookId) -> StoreResult<Vec<AuthorId>> {
        let mut guard = self.tx.lock().await;
        let conn = active(&mut guard)?;
        Ok(book_author::find_author_ids(conn, book_id).await?)
    }

    async fn insert(&self, book_id: BookId, author_id: AuthorId) -> StoreResult<()> {
        let mut guard = self.tx.lock().await;
        let conn = active(&mut guard)?;
        Ok(book_author::insert(conn, book_id, author_id).await?)
    }

    async fn delete(&self, book_id: BookId, author_id: AuthorId) -> StoreResult<()> {
        let mut guard = self.tx.lock().await;
        let conn = active(&mut guard)?;
        Ok(book_author::delete(conn, book_id, author_id).await?)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Database, DbConfig};
    use catalog_core::{BookAuthorsRequest, ErrorKind, SyncService};
    use chrono::NaiveDate;

    /// Book linked to two authors; returns (book, kept author, dropped author).
    async fn seeded(db: &Database) -> (BookId, AuthorId, AuthorId) {
        let birthdate = NaiveDate::from_ymd_opt(1970, 1, 1).unwrap();
        let book_id = BookStore::insert(
            &db.books(),
            &BookSummary {
                title: "Rust".to_string(),
                price: 100,
                is_published: true,
            },
        )
        .await
        .unwrap();
        let kept = AuthorStore::insert(&db.authors(), &AuthorProfile::new("Kept", birthdate))
            .await
            .unwrap();
        let dropped = AuthorStore::insert(&db.authors(), &AuthorProfile::new("Dropped", birthdate))
            .await
            .unwrap();
        AssociationStore::insert(&db.book_authors(), book_id, kept)
            .await
            .unwrap();
        AssociationStore::insert(&db.book_authors(), book_id, dropped)
            .await
            .unwrap();
        (book_id, kept, dropped)
    }

    #[tokio::test]
    async fn test_failed_sync_rolls_back_deletions() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let (book_id, kept, dropped) = seeded(&db).await;

        let scope = db.begin_scope().await.unwrap();
        let err = SyncService::new(scope.stores())
            .update_book_authors(
                book_id,
                &BookAuthorsRequest {
                    author_ids: vec![kept, 999],
                },
            )
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidReference);
        scope.rollback().await.unwrap();

        let links = db.book_authors().find_author_ids(book_id).await.unwrap();
        assert_eq!(links, vec![kept, dropped]);
    }

    #[tokio::test]
    async fn test_successful_sync_commits() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let (book_id, kept, _) = seeded(&db).await;

        let scope = db.begin_scope().await.unwrap();
        SyncService::new(scope.stores())
            .update_book_authors(
                book_id,
                &BookAuthorsRequest {
                    author_ids: vec![kept],
                },
            )
            .await
            .unwrap();
        scope.commit().await.unwrap();

        let links = db.book_authors().find_author_ids(book_id).await.unwrap();
        assert_eq!(links, vec![kept]);
    }

    #[tokio::test]
    async fn test_scope_reads_its_own_writes() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();

        let scope = db.begin_scope().await.unwrap();
        let id = BookStore::insert(
            &scope,
            &BookSummary {
                title: "Draft".to_string(),
                price: 0,
                is_published: false,
            },
        )
        .await
        .unwrap();
        assert!(BookStore::exists_by_id(&scope, id).await.unwrap());
        scope.rollback().await.unwrap();

        assert!(!BookStore::exists_by_id(&db.books(), id).await.unwrap());
    }
}
