//! # Error Types
//!
//! Domain-specific error types for catalog-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  catalog-core errors (this file)                                       │
//! │  ├── CatalogError      - Everything a service call can fail with       │
//! │  ├── ValidationErrors  - All violated request fields                   │
//! │  │   └── ValidationError - One violated rule                          │
//! │  └── StoreError        - Persistence failure reported by a store      │
//! │                                                                         │
//! │  catalog-db errors (separate crate)                                    │
//! │  └── DbError          - Database operation failures → StoreError      │
//! │                                                                         │
//! │  API errors (in app)                                                   │
//! │  └── ApiError         - What HTTP clients see (serialized)             │
//! │                                                                         │
//! │  Flow: DbError → StoreError → CatalogError → ApiError → Client         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (ids, titles, field names)
//! 3. Errors are enum variants, never String
//! 4. Callers branch on [`ErrorKind`], never on message text

use std::fmt;

use thiserror::Error;

use crate::types::BookId;

// =============================================================================
// Error Kind
// =============================================================================

/// Stable classification of a [`CatalogError`].
///
/// Business kinds (everything except `StoreFailure`) are recoverable by the
/// caller. `StoreFailure` is an internal error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Validation,
    DuplicateEntity,
    NotFound,
    InvalidReference,
    InvalidState,
    StoreFailure,
}

impl ErrorKind {
    /// Machine-readable code used in API responses.
    pub fn code(self) -> &'static str {
        match self {
            ErrorKind::Validation => "VALIDATION_ERROR",
            ErrorKind::DuplicateEntity => "DUPLICATE_ENTITY",
            ErrorKind::NotFound => "NOT_FOUND",
            ErrorKind::InvalidReference => "INVALID_REFERENCE",
            ErrorKind::InvalidState => "INVALID_STATE",
            ErrorKind::StoreFailure => "STORE_FAILURE",
        }
    }
}

// =============================================================================
// Catalog Error
// =============================================================================

/// Errors returned by the catalog services.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// One or more request fields are invalid. Raised before any store access.
    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationErrors),

    /// A book with the same title is already linked to a requested author.
    ///
    /// ## When This Occurs
    /// ```text
    /// register_book { title: "Rust", authors: [Jane Doe (1970-01-01)] }
    ///      │
    ///      ▼
    /// books ⋈ books_authors ⋈ authors
    ///   WHERE title = 'Rust' AND name = 'Jane Doe' AND birthdate = ...
    ///      │
    ///      ▼
    /// count = 1 → DuplicateEntity { title: "Rust" }   (nothing written)
    /// ```
    #[error("Book '{title}' is already registered for one of the given authors")]
    DuplicateEntity { title: String },

    /// The addressed book or author does not exist.
    #[error("{entity} {id} does not exist")]
    NotFound { entity: &'static str, id: i64 },

    /// An author-name lookup resolved no books.
    #[error("No books match the search criteria (author name '{name}')")]
    NoMatch { name: String },

    /// A referenced id does not exist. Writes made earlier in the same call
    /// are not undone.
    #[error("{entity} id {id} does not exist")]
    InvalidReference { entity: &'static str, id: i64 },

    /// The book has no associated authors at the start of an id-list sync.
    #[error("Book {book_id} has no authors associated")]
    InvalidState { book_id: BookId },

    /// Unexpected persistence failure.
    #[error("Store failure: {0}")]
    Store(#[from] StoreError),
}

impl CatalogError {
    /// Returns the stable kind of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            CatalogError::Validation(_) => ErrorKind::Validation,
            CatalogError::DuplicateEntity { .. } => ErrorKind::DuplicateEntity,
            CatalogError::NotFound { .. } | CatalogError::NoMatch { .. } => ErrorKind::NotFound,
            CatalogError::InvalidReference { .. } => ErrorKind::InvalidReference,
            CatalogError::InvalidState { .. } => ErrorKind::InvalidState,
            CatalogError::Store(_) => ErrorKind::StoreFailure,
        }
    }

    pub fn book_not_found(id: BookId) -> Self {
        CatalogError::NotFound { entity: "book", id }
    }

    pub fn author_not_found(id: i64) -> Self {
        CatalogError::NotFound {
            entity: "author",
            id,
        }
    }

    pub fn missing_author(id: i64) -> Self {
        CatalogError::InvalidReference {
            entity: "author",
            id,
        }
    }

    pub fn missing_book(id: BookId) -> Self {
        CatalogError::InvalidReference { entity: "book", id }
    }
}

// =============================================================================
// Store Error
// =============================================================================

/// A persistence failure surfaced through a store trait.
///
/// The message is for logs; API clients only ever see a generic text.
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct StoreError {
    message: String,
}

impl StoreError {
    pub fn new(message: impl Into<String>) -> Self {
        StoreError {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

// =============================================================================
// Validation Error
// =============================================================================

/// A single violated validation rule.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or blank.
    #[error("is required")]
    Required,

    /// Numeric value is out of range.
    #[error("must be between {min} and {max}")]
    OutOfRange { min: i64, max: i64 },

    /// Numeric value must be zero or greater.
    #[error("must be 0 or greater")]
    Negative,

    /// Numeric value must be greater than zero.
    #[error("must be positive")]
    MustBePositive,

    /// Collection size is out of range.
    #[error("must contain between {min} and {max} entries")]
    CountOutOfRange { min: usize, max: usize },

    /// A date must lie strictly in the past.
    #[error("must be a date in the past")]
    NotInPast,

    /// A book cannot be changed back to unpublished.
    #[error("cannot change a book to unpublished")]
    Unpublish,
}

/// A validation failure attached to a request field path (e.g.
/// `authors[1].birthdate`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldViolation {
    pub field: String,
    pub error: ValidationError,
}

impl fmt::Display for FieldViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.error)
    }
}

/// Every violated field of one request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    violations: Vec<FieldViolation>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a violation for `field`.
    pub fn add(&mut self, field: impl Into<String>, error: ValidationError) {
        self.violations.push(FieldViolation {
            field: field.into(),
            error,
        });
    }

    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }

    pub fn len(&self) -> usize {
        self.violations.len()
    }

    pub fn violations(&self) -> &[FieldViolation] {
        &self.violations
    }

    /// Returns the violation recorded for `field`, if any.
    pub fn get(&self, field: &str) -> Option<&ValidationError> {
        self.violations
            .iter()
            .find(|v| v.field == field)
            .map(|v| &v.error)
    }

    /// `Ok(())` when nothing was recorded.
    pub fn into_result(self) -> Result<(), ValidationErrors> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for violation in &self.violations {
            if !first {
                f.write_str("; ")?;
            }
            write!(f, "{}", violation)?;
            first = false;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Convenience type alias for Results with CatalogError.
pub type CatalogResult<T> = Result<T, CatalogError>;

/// Result type returned by store trait methods.
pub type StoreResult<T> = Result<T, StoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
