//! Read-only catalog queries.

use tracing::{debug, warn};

use crate::error::{CatalogError, CatalogResult};
use crate::store::Stores;
use crate::types::{BookId, BookSummary};
use crate::validation::validate_search_name;

pub struct LookupService<'a> {
    stores: Stores<'a>,
}

impl<'a> LookupService<'a> {
    pub fn new(stores: Stores<'a>) -> Self {
        LookupService { stores }
    }

    /// Summaries of every book linked to an author named exactly `name`.
    ///
    /// Books appear once per matching author, in join order. A book linked
    /// to two authors with that name is listed twice.
    pub async fn find_books_by_author_name(&self, name: &str) -> CatalogResult<Vec<BookSummary>> {
        validate_search_name(name)?;

        let book_ids = self.stores.authors.find_book_ids_by_name(name).await?;
        if book_ids.is_empty() {
            debug!(name, "No books for author name");
            return Err(CatalogError::NoMatch {
                name: name.to_string(),
            });
        }

        let mut books = Vec::with_capacity(book_ids.len());
        for book_id in book_ids {
            match self.stores.books.fetch_by_id(book_id).await? {
                Some(summary) => books.push(summary),
                None => {
                    warn!(book_id, "Association points at a missing book");
                    return Err(CatalogError::missing_book(book_id));
                }
            }
        }

        debug!(name, count = books.len(), "Resolved books by author name");
        Ok(books)
    }

    pub async fn get_book(&self, book_id: BookId) -> CatalogResult<BookSummary> {
        self.stores
            .books
            .fetch_by_id(book_id)
            .await?
            .ok_or_else(|| CatalogError::book_not_found(book_id))
    }
}
