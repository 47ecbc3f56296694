//! # Schema Migrations
//!
//! `migrations/sqlite/` is compiled into the binary and applied by
//! [`Database::new`](crate::Database::new) when `run_migrations` is set.
//!
//! ```text
//! 001_initial_schema.sql
//!   books          id, title, price (CHECK >= 0), is_published, timestamps
//!   authors        id, name, birthdate, timestamps; index (name, birthdate)
//!   books_authors  (book_id, author_id) PK, both FK ON DELETE CASCADE
//! ```
//!
//! Applied files are checksummed in `_sqlx_migrations`; add a new numbered
//! file instead of editing one that has shipped.

use sqlx::SqlitePool;
use tracing::info;

use crate::error::DbResult;

static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("../../migrations/sqlite");

/// Applies every pending catalog migration.
pub async fn run_migrations(pool: &SqlitePool) -> DbResult<()> {
    MIGRATOR.run(pool).await?;
    info!(
        migrations = MIGRATOR.migrations.len(),
        "Catalog schema up to date"
    );
    Ok(())
}
