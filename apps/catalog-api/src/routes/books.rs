//! Book registration, updates, author sync, and reads.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::Json;
use catalog_core::{
    BookAuthorsRequest, BookId, BookRequest, BookSummary, LookupService, RegistrationService,
    SyncService,
};
use serde::Serialize;
use tracing::debug;

use crate::error::ApiResult;
use crate::state::AppState;

/// `{"message": "...", "id": N}`
#[derive(Debug, Serialize)]
pub struct BookAck {
    pub message: &'static str,
    pub id: BookId,
}

/// `POST /book/info`
pub async fn register_book(
    State(state): State<AppState>,
    payload: Result<Json<BookRequest>, JsonRejection>,
) -> ApiResult<Json<BookAck>> {
    let Json(request) = payload?;
    debug!(title = %request.title, "register_book");

    let session = state.writer().await?;
    let result = RegistrationService::new(session.stores())
        .register_book(&request)
        .await;
    let id = session.finish(result).await?;

    Ok(Json(BookAck {
        message: "registered",
        id,
    }))
}

/// `POST /book/info/{id}`
pub async fn update_book(
    State(state): State<AppState>,
    Path(id): Path<BookId>,
    payload: Result<Json<BookRequest>, JsonRejection>,
) -> ApiResult<Json<BookAck>> {
    let Json(request) = payload?;
    debug!(book_id = id, "update_book");

    let session = state.writer().await?;
    let result = SyncService::new(session.stores())
        .update_book(id, &request)
        .await;
    session.finish(result).await?;

    Ok(Json(BookAck {
        message: "updated",
        id,
    }))
}

/// `POST /book/info/{id}/authors`
pub async fn update_book_authors(
    State(state): State<AppState>,
    Path(id): Path<BookId>,
    payload: Result<Json<BookAuthorsRequest>, JsonRejection>,
) -> ApiResult<Json<BookAck>> {
    let Json(request) = payload?;
    debug!(book_id = id, requested = request.author_ids.len(), "update_book_authors");

    let session = state.writer().await?;
    let result = SyncService::new(session.stores())
        .update_book_authors(id, &request)
        .await;
    session.finish(result).await?;

    Ok(Json(BookAck {
        message: "updated",
        id,
    }))
}

/// `GET /book/info/{id}`
pub async fn get_book(
    State(state): State<AppState>,
    Path(id): Path<BookId>,
) -> ApiResult<Json<BookSummary>> {
    let session = state.reader();
    let result = LookupService::new(session.stores()).get_book(id).await;
    let summary = session.finish(result).await?;
    Ok(Json(summary))
}
