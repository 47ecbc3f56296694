//! # Author Repository
//!
//! Database operations for the `authors` table.
//!
//! Authors are not unique by name: two rows may share name and birthdate.
//! Profile lookups resolve to the lowest id.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::{FromRow, SqliteExecutor, SqlitePool};
use tracing::debug;

use crate::error::DbResult;
use catalog_core::{Author, AuthorId, AuthorProfile, AuthorStore, BookId, StoreResult};

#[derive(Debug, FromRow)]
struct AuthorRow {
    id: i64,
    name: String,
    birthdate: NaiveDate,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<AuthorRow> for Author {
    fn from(row: AuthorRow) -> Self {
        Author {
            id: row.id,
            name: row.name,
            birthdate: row.birthdate,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

// =============================================================================
// Queries
// =============================================================================

pub(crate) async fn exists<'e, E>(executor: E, id: AuthorId) -> DbResult<bool>
where
    E: SqliteExecutor<'e>,
{
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM authors WHERE id = ?1")
        .bind(id)
        .fetch_one(executor)
        .await?;

    Ok(count > 0)
}

pub(crate) async fn fetch<'e, E>(executor: E, id: AuthorId) -> DbResult<Option<Author>>
where
    E: SqliteExecutor<'e>,
{
    let row: Option<AuthorRow> = sqlx::query_as(
        r#"
        SELECT id, name, birthdate, created_at, updated_at
        FROM authors
        WHERE id = ?1
        "#,
    )
    .bind(id)
    .fetch_optional(executor)
    .await?;

    Ok(row.map(Author::from))
}

pub(crate) async fn find_id_by_profile<'e, E>(
    executor: E,
    profile: &AuthorProfile,
) -> DbResult<Option<AuthorId>>
where
    E: SqliteExecutor<'e>,
{
    let id: Option<i64> = sqlx::query_scalar(
        r#"
        SELECT id FROM authors
        WHERE name = ?1 AND birthdate = ?2
        ORDER BY id
        LIMIT 1
        "#,
    )
    .bind(&profile.name)
    .bind(profile.birthdate)
    .fetch_optional(executor)
    .await?;

    Ok(id)
}

pub(crate) async fn insert<'e, E>(executor: E, profile: &AuthorProfile) -> DbResult<AuthorId>
where
    E: SqliteExecutor<'e>,
{
    debug!(name = %profile.name, "Inserting author");

    let now = Utc::now();
    let result = sqlx::query(
        r#"
        INSERT INTO authors (name, birthdate, created_at, updated_at)
        VALUES (?1, ?2, ?3, ?3)
        "#,
    )
    .bind(&profile.name)
    .bind(profile.birthdate)
    .bind(now)
    .execute(executor)
    .await?;

    Ok(result.last_insert_rowid())
}

/// Overwrites name and birthdate. Touching no row is not an error.
pub(crate) async fn update<'e, E>(
    executor: E,
    id: AuthorId,
    profile: &AuthorProfile,
) -> DbResult<()>
where
    E: SqliteExecutor<'e>,
{
    let result = sqlx::query(
        r#"
        UPDATE authors SET
            name = ?2,
            birthdate = ?3,
            updated_at = ?4
        WHERE id = ?1
        "#,
    )
    .bind(id)
    .bind(&profile.name)
    .bind(profile.birthdate)
    .bind(Utc::now())
    .execute(executor)
    .await?;

    debug!(id, rows = result.rows_affected(), "Updated author");
    Ok(())
}

pub(crate) async fn find_book_ids_by_name<'e, E>(executor: E, name: &str) -> DbResult<Vec<BookId>>
where
    E: SqliteExecutor<'e>,
{
    let ids: Vec<i64> = sqlx::query_scalar(
        r#"
        SELECT ba.book_id
        FROM authors a
        INNER JOIN books_authors ba ON ba.author_id = a.id
        WHERE a.name = ?1
        ORDER BY a.id, ba.book_id
        "#,
    )
    .bind(name)
    .fetch_all(executor)
    .await?;

    Ok(ids)
}

// =============================================================================
// Repository
// =============================================================================

/// Repository for author database operations.
#[derive(Debug, Clone)]
pub struct AuthorRepository {
    pool: SqlitePool,
}

impl AuthorRepository {
    /// Creates a new AuthorRepository.
    pub fn new(pool: SqlitePool) -> Self {
        AuthorRepository { pool }
    }

    /// Counts all authors (for diagnostics).
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM authors")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

#[async_trait]
impl AuthorStore for AuthorRepository {
    async fn exists_by_id(&self, id: AuthorId) -> StoreResult<bool> {
        Ok(exists(&self.pool, id).await?)
    }

    async fn fetch_by_id(&self, id: AuthorId) -> StoreResult<Option<Author>> {
        Ok(fetch(&self.pool, id).await?)
    }

    async fn find_id_by_profile(&self, profile: &AuthorProfile) -> StoreResult<Option<AuthorId>> {
        Ok(find_id_by_profile(&self.pool, profile).await?)
    }

    async fn insert(&self, profile: &AuthorProfile) -> StoreResult<AuthorId> {
        Ok(insert(&self.pool, profile).await?)
    }

    async fn update_by_id(&self, id: AuthorId, profile: &AuthorProfile) -> StoreResult<()> {
        Ok(update(&self.pool, id, profile).await?)
    }

    async fn find_book_ids_by_name(&self, name: &str) -> StoreResult<Vec<BookId>> {
        Ok(find_book_ids_by_name(&self.pool, name).await?)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
