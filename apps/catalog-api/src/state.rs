//! # Application State
//!
//! Shared handler state and the per-request store session.
//!
//! ## Write Sessions
//! ```text
//! transactional_sync = false          transactional_sync = true
//! ─────────────────────────           ─────────────────────────
//! Session::Pooled                     Session::Scoped
//!   each store call autocommits         BEGIN
//!   partial writes survive errors       service call
//!                                       Ok → COMMIT, Err → ROLLBACK
//! ```

use catalog_core::{CatalogResult, Stores};
use catalog_db::{AuthorRepository, BookAuthorRepository, BookRepository, Database, StoreScope};
use tracing::error;

use crate::error::{ApiError, ApiResult};

/// State shared by every handler.
#[derive(Clone)]
pub struct AppState {
    pub db: Database,
    pub transactional_sync: bool,
}

impl AppState {
    pub fn new(db: Database, transactional_sync: bool) -> Self {
        AppState {
            db,
            transactional_sync,
        }
    }

    /// Session for read-only service calls.
    pub fn reader(&self) -> Session {
        Session::pooled(&self.db)
    }

    /// Session for mutating service calls.
    pub async fn writer(&self) -> ApiResult<Session> {
        if self.transactional_sync {
            Ok(Session::Scoped(self.db.begin_scope().await?))
        } else {
            Ok(Session::pooled(&self.db))
        }
    }
}

/// Stores backing one request.
pub enum Session {
    Pooled {
        books: BookRepository,
        authors: AuthorRepository,
        links: BookAuthorRepository,
    },
    Scoped(StoreScope),
}

impl Session {
    fn pooled(db: &Database) -> Self {
        Session::Pooled {
            books: db.books(),
            authors: db.authors(),
            links: db.book_authors(),
        }
    }

    pub fn stores(&self) -> Stores<'_> {
        match self {
            Session::Pooled {
                books,
                authors,
                links,
            } => Stores::new(books, authors, links),
            Session::Scoped(scope) => scope.stores(),
        }
    }

    /// Commits or rolls back a scoped session according to `result`.
    pub async fn finish<T>(self, result: CatalogResult<T>) -> ApiResult<T> {
        let scope = match self {
            Session::Pooled { .. } => return result.map_err(ApiError::from),
            Session::Scoped(scope) => scope,
        };

        match result {
            Ok(value) => {
                scope.commit().await?;
                Ok(value)
            }
            Err(err) => {
                if let Err(rollback) = scope.rollback().await {
                    error!(error = %rollback, "Rollback failed");
                }
                Err(err.into())
            }
        }
    }
}
