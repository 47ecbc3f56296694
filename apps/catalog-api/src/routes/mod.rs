//! # Routes
//!
//! ```text
//! POST /book/info                 register_book
//! GET  /book/info/{id}            get_book
//! POST /book/info/{id}            update_book
//! POST /book/info/{id}/authors    update_book_authors
//! POST /book/author               register_author
//! POST /book/author/info          find_books_by_author_name
//! POST /book/author/{id}          update_author
//! GET  /health                    health
//! ```
//!
//! `/book/author/info` is a static segment and wins over `/book/author/{id}`.

pub mod authors;
pub mod books;
pub mod health;

use axum::routing::{get, post};
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Builds the application router with request tracing.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health))
        .route("/book/info", post(books::register_book))
        .route(
            "/book/info/{id}",
            get(books::get_book).post(books::update_book),
        )
        .route("/book/info/{id}/authors", post(books::update_book_authors))
        .route("/book/author", post(authors::register_author))
        .route("/book/author/info", post(authors::find_books_by_author_name))
        .route("/book/author/{id}", post(authors::update_author))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

// =============================================================================
// Router Tests
// =============================================================================
