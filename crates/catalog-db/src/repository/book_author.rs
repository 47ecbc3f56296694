//! # Book-Author Repository
//!
//! The `books_authors` join table. Its composite primary key makes every
//! pair unique, so inserts skip pairs that are already linked.

use async_trait::async_trait;
use sqlx::{SqliteExecutor, SqlitePool};
use tracing::debug;

use crate::error::DbResult;
use catalog_core::{AssociationStore, AuthorId, BookId, StoreResult};

pub(crate) async fn find_author_ids<'e, E>(executor: E, book_id: BookId) -> DbResult<Vec<AuthorId>>
where
    E: SqliteExecutor<'e>,
{
    let ids: Vec<i64> = sqlx::query_scalar(
        "SELECT author_id FROM books_authors WHERE book_id = ?1 ORDER BY author_id",
    )
    .bind(book_id)
    .fetch_all(executor)
    .await?;

    Ok(ids)
}

pub(crate) async fn insert<'e, E>(executor: E, book_id: BookId, author_id: AuthorId) -> DbResult<()>
where
    E: SqliteExecutor<'e>,
{
    let result = sqlx::query(
        r#"
        INSERT INTO books_authors (book_id, author_id)
        VALUES (?1, ?2)
        ON CONFLICT (book_id, author_id) DO NOTHING
        "#,
    )
    .bind(book_id)
    .bind(author_id)
    .execute(executor)
    .await?;

    debug!(book_id, author_id, inserted = result.rows_affected(), "Linked author");
    Ok(())
}

pub(crate) async fn delete<'e, E>(executor: E, book_id: BookId, author_id: AuthorId) -> DbResult<()>
where
    E: SqliteExecutor<'e>,
{
    let result = sqlx::query("DELETE FROM books_authors WHERE book_id = ?1 AND author_id = ?2")
        .bind(book_id)
        .bind(author_id)
        .execute(executor)
        .await?;

    debug!(book_id, author_id, deleted = result.rows_affected(), "Unlinked author");
    Ok(())
}

/// Repository for book-author associations.
#[derive(Debug, Clone)]
pub struct BookAuthorRepository {
    pool: SqlitePool,
}

impl BookAuthorRepository {
    pub fn new(pool: SqlitePool) -> Self {
        BookAuthorRepository { pool }
    }
}

#[async_trait]
impl AssociationStore for BookAuthorRepository {
    async fn find_author_ids(&self, book_id: BookId) -> StoreResult<Vec<AuthorId>> {
        Ok(find_author_ids(&self.pool, book_id).await?)
    }

    async fn insert(&self, book_id: BookId, author_id: AuthorId) -> StoreResult<()> {
        Ok(insert(&self.pool, book_id, author_id).await?)
    }

    async fn delete(&self, book_id: BookId, author_id: AuthorId) -> StoreResult<()> {
        Ok(delete(&self.pool, book_id, author_id).await?)
    }
}
