//! Author registration, updates, and the author-name book lookup.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::Json;
use catalog_core::{
    AuthorId, AuthorProfile, AuthorSearchRequest, BookSummary, LookupService,
    RegistrationService, SyncService,
};
use serde::Serialize;
use tracing::debug;

use crate::error::ApiResult;
use crate::state::AppState;

/// `{"message": "...", "authorId": N}`
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorAck {
    pub message: &'static str,
    pub author_id: AuthorId,
}

/// `{"message": "found", "books": [...]}`
#[derive(Debug, Serialize)]
pub struct BooksFound {
    pub message: &'static str,
    pub books: Vec<BookSummary>,
}

/// `POST /book/author`
pub async fn register_author(
    State(state): State<AppState>,
    payload: Result<Json<AuthorProfile>, JsonRejection>,
) -> ApiResult<Json<AuthorAck>> {
    let Json(profile) = payload?;
    debug!(name = %profile.name, "register_author");

    let session = state.writer().await?;
    let result = RegistrationService::new(session.stores())
        .register_author(&profile)
        .await;
    let author_id = session.finish(result).await?;

    Ok(Json(AuthorAck {
        message: "registered",
        author_id,
    }))
}

/// `POST /book/author/{id}`
pub async fn update_author(
    State(state): State<AppState>,
    Path(author_id): Path<AuthorId>,
    payload: Result<Json<AuthorProfile>, JsonRejection>,
) -> ApiResult<Json<AuthorAck>> {
    let Json(profile) = payload?;
    debug!(author_id, "update_author");

    let session = state.writer().await?;
    let result = SyncService::new(session.stores())
        .update_author(author_id, &profile)
        .await;
    session.finish(result).await?;

    Ok(Json(AuthorAck {
        message: "updated",
        author_id,
    }))
}

/// `POST /book/author/info`
pub async fn find_books_by_author_name(
    State(state): State<AppState>,
    payload: Result<Json<AuthorSearchRequest>, JsonRejection>,
) -> ApiResult<Json<BooksFound>> {
    let Json(search) = payload?;
    debug!(name = %search.name, "find_books_by_author_name");

    let session = state.reader();
    let result = LookupService::new(session.stores())
        .find_books_by_author_name(&search.name)
        .await;
    let books = session.finish(result).await?;

    Ok(Json(BooksFound {
        message: "found",
        books,
    }))
}
