//! # Repository Module
//!
//! Store trait implementations backed by the connection pool.
//!
//! ## Layout
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Two Ways Into the Same SQL                           │
//! │                                                                         │
//! │  book.rs / author.rs / book_author.rs                                  │
//! │  ├── query functions   fn exists<'e, E: SqliteExecutor<'e>>(E, ..)     │
//! │  │        ▲                              ▲                              │
//! │  │        │ &SqlitePool                  │ &mut SqliteConnection        │
//! │  │        │                              │                              │
//! │  ├── XxxRepository  (one unit of work    StoreScope (one transaction   │
//! │  │                   per call)            for the whole service call)   │
//! │  │                                                                      │
//! │  └── impl BookStore / AuthorStore / AssociationStore for both          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`BookRepository`](book::BookRepository) - `books`
//! - [`AuthorRepository`](author::AuthorRepository) - `authors`
//! - [`BookAuthorRepository`](book_author::BookAuthorRepository) - `books_authors`

pub mod author;
pub mod book;
pub mod book_author;
