//! # Book Repository
//!
//! Database operations for the `books` table.
//!
//! ## Duplicate Detection
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │              How count_by_content Matches Existing Books                │
//! │                                                                         │
//! │  Request: title "Rust", authors [#10, Jane Doe (1970-01-01)]           │
//! │       │                                                                 │
//! │       ├── #10       → books ⋈ books_authors                             │
//! │       │               WHERE title = 'Rust' AND author_id = 10           │
//! │       │                                                                 │
//! │       └── Jane Doe  → books ⋈ books_authors ⋈ authors                  │
//! │                       WHERE title = 'Rust' AND name = 'Jane Doe'        │
//! │                         AND birthdate = '1970-01-01'                    │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  total = sum of both counts  (> 0 means duplicate)                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The query functions take any SQLite executor so the same SQL runs
//! against the pool and inside a [`StoreScope`](crate::StoreScope).

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, SqliteExecutor, SqlitePool};
use tracing::debug;

use crate::error::{DbError, DbResult};
use catalog_core::{
    AuthorId, AuthorIdentity, AuthorProfile, Book, BookId, BookStore, BookSummary, StoreResult,
};

#[derive(Debug, FromRow)]
struct BookRow {
    id: i64,
    title: String,
    price: i64,
    is_published: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<BookRow> for Book {
    fn from(row: BookRow) -> Self {
        Book {
            id: row.id,
            title: row.title,
            price: row.price,
            is_published: row.is_published,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

// =============================================================================
// Queries
// =============================================================================

pub(crate) async fn exists<'e, E>(executor: E, id: BookId) -> DbResult<bool>
where
    E: SqliteExecutor<'e>,
{
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM books WHERE id = ?1")
        .bind(id)
        .fetch_one(executor)
        .await?;

    Ok(count > 0)
}

pub(crate) async fn count_by_title_and_author_id<'e, E>(
    executor: E,
    title: &str,
    author_id: AuthorId,
) -> DbResult<i64>
where
    E: SqliteExecutor<'e>,
{
    let count: i64 = sqlx::query_scalar(
        r#"
        SELECT COUNT(*)
        FROM books b
        INNER JOIN books_authors ba ON ba.book_id = b.id
        WHERE b.title = ?1 AND ba.author_id = ?2
        "#,
    )
    .bind(title)
    .bind(author_id)
    .fetch_one(executor)
    .await?;

    Ok(count)
}

pub(crate) async fn count_by_title_and_profile<'e, E>(
    executor: E,
    title: &str,
    profile: &AuthorProfile,
) -> DbResult<i64>
where
    E: SqliteExecutor<'e>,
{
    let count: i64 = sqlx::query_scalar(
        r#"
        SELECT COUNT(*)
        FROM books b
        INNER JOIN books_authors ba ON ba.book_id = b.id
        INNER JOIN authors a ON a.id = ba.author_id
        WHERE b.title = ?1 AND a.name = ?2 AND a.birthdate = ?3
        "#,
    )
    .bind(title)
    .bind(&profile.name)
    .bind(profile.birthdate)
    .fetch_one(executor)
    .await?;

    Ok(count)
}

pub(crate) async fn fetch<'e, E>(executor: E, id: BookId) -> DbResult<Option<Book>>
where
    E: SqliteExecutor<'e>,
{
    let row: Option<BookRow> = sqlx::query_as(
        r#"
        SELECT id, title, price, is_published, created_at, updated_at
        FROM books
        WHERE id = ?1
        "#,
    )
    .bind(id)
    .fetch_optional(executor)
    .await?;

    Ok(row.map(Book::from))
}

pub(crate) async fn insert<'e, E>(executor: E, book: &BookSummary) -> DbResult<BookId>
where
    E: SqliteExecutor<'e>,
{
    debug!(title = %book.title, "Inserting book");

    let now = Utc::now();
    let result = sqlx::query(
        r#"
        INSERT INTO books (title, price, is_published, created_at, updated_at)
        VALUES (?1, ?2, ?3, ?4, ?4)
        "#,
    )
    .bind(&book.title)
    .bind(book.price)
    .bind(book.is_published)
    .bind(now)
    .execute(executor)
    .await?;

    Ok(result.last_insert_rowid())
}

pub(crate) async fn update<'e, E>(executor: E, id: BookId, book: &BookSummary) -> DbResult<()>
where
    E: SqliteExecutor<'e>,
{
    debug!(id, title = %book.title, "Updating book");

    let result = sqlx::query(
        r#"
        UPDATE books SET
            title = ?2,
            price = ?3,
            is_published = ?4,
            updated_at = ?5
        WHERE id = ?1
        "#,
    )
    .bind(id)
    .bind(&book.title)
    .bind(book.price)
    .bind(book.is_published)
    .bind(Utc::now())
    .execute(executor)
    .await?;

    if result.rows_affected() == 0 {
        return Err(DbError::not_found("Book", id));
    }

    Ok(())
}

// =============================================================================
// Repository
// =============================================================================

/// Repository for book database operations.
///
/// ## Usage
/// ```rust,ignore
/// let repo = db.books();
/// let id = repo.insert(&summary).await?;
/// let book = repo.get_by_id(id).await?;
/// ```
#[derive(Debug, Clone)]
pub struct BookRepository {
    pool: SqlitePool,
}

impl BookRepository {
    /// Creates a new BookRepository.
    pub fn new(pool: SqlitePool) -> Self {
        BookRepository { pool }
    }

    /// Gets a full book row, timestamps included.
    pub async fn get_by_id(&self, id: BookId) -> DbResult<Option<Book>> {
        fetch(&self.pool, id).await
    }

    /// Counts all books (for diagnostics).
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM books")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

#[async_trait]
impl BookStore for BookRepository {
    async fn exists_by_id(&self, id: BookId) -> StoreResult<bool> {
        Ok(exists(&self.pool, id).await?)
    }

    async fn count_by_content(
        &self,
        title: &str,
        authors: &[AuthorIdentity],
    ) -> StoreResult<i64> {
        let mut total = 0;
        for identity in authors {
            total += match identity {
                AuthorIdentity::ById(author_id) => {
                    count_by_title_and_author_id(&self.pool, title, *author_id).await?
                }
                AuthorIdentity::ByProfile(profile) => {
                    count_by_title_and_profile(&self.pool, title, profile).await?
                }
            };
        }
        debug!(title = %title, total, "Counted books with matching content");
        Ok(total)
    }

    async fn fetch_by_id(&self, id: BookId) -> StoreResult<Option<BookSummary>> {
        Ok(fetch(&self.pool, id).await?.map(|book| book.summary()))
    }

    async fn insert(&self, book: &BookSummary) -> StoreResult<BookId> {
        Ok(insert(&self.pool, book).await?)
    }

    async fn update_by_id(&self, id: BookId, book: &BookSummary) -> StoreResult<()> {
        Ok(update(&self.pool, id, book).await?)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
