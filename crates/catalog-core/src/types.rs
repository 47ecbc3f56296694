//! # Domain Types
//!
//! Core domain types used throughout the book catalog.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │      Book       │   │     Author      │   │  books_authors  │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (i64)       │   │  id (i64)       │   │  book_id (FK)   │       │
//! │  │  title          │◄──┤  name           │──►│  author_id (FK) │       │
//! │  │  price          │   │  birthdate      │   │  (composite PK) │       │
//! │  │  is_published   │   │  updated_at     │   └─────────────────┘       │
//! │  └─────────────────┘   └─────────────────┘                             │
//! │                                                                         │
//! │  Request side:                                                          │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │ AuthorEntry                                                     │   │
//! │  │   Existing { id, name, birthdate }  → overwrite + keep linked   │   │
//! │  │   New      { name, birthdate }      → create                    │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Reference vs Value
//! An author entry either *references* an existing author by id or
//! *describes* a new one. On the wire the difference is whether the
//! `authorId` field is present.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Book identifier (SQLite rowid).
pub type BookId = i64;

/// Author identifier (SQLite rowid).
pub type AuthorId = i64;

// =============================================================================
// Book
// =============================================================================

/// A book row as stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Book {
    pub id: BookId,

    pub title: String,

    /// Price in the smallest currency unit.
    pub price: i64,

    pub is_published: bool,

    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,

    #[ts(as = "String")]
    pub updated_at: DateTime<Utc>,
}

impl Book {
    /// Projects the caller-visible fields.
    pub fn summary(&self) -> BookSummary {
        BookSummary {
            title: self.title.clone(),
            price: self.price,
            is_published: self.is_published,
        }
    }
}

/// The mutable part of a book: what gets inserted, updated, and returned by
/// author lookups.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct BookSummary {
    pub title: String,
    pub price: i64,
    pub is_published: bool,
}

// =============================================================================
// Author
// =============================================================================

/// An author row as stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Author {
    pub id: AuthorId,

    pub name: String,

    #[ts(as = "String")]
    pub birthdate: NaiveDate,

    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,

    #[ts(as = "String")]
    pub updated_at: DateTime<Utc>,
}

/// Name and birthdate of an author.
///
/// Used as the payload for author inserts and updates, and as the natural
/// key when registration looks for an already-known author.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct AuthorProfile {
    pub name: String,

    #[ts(as = "String")]
    pub birthdate: NaiveDate,
}

impl AuthorProfile {
    pub fn new(name: impl Into<String>, birthdate: NaiveDate) -> Self {
        AuthorProfile {
            name: name.into(),
            birthdate,
        }
    }
}

// =============================================================================
// Author Entry (request element)
// =============================================================================

/// One author in a book request.
///
/// ## Wire Format
/// ```text
/// {"authorId": 10, "name": "Jane Doe", "birthdate": "1970-01-01"}  → Existing
/// {"name": "New Person", "birthdate": "1990-05-05"}                 → New
/// ```
///
/// `Existing` is tried first, so any object carrying `authorId` is a
/// reference and everything else is a value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(untagged)]
#[ts(export)]
pub enum AuthorEntry {
    /// Reference to a stored author; its name and birthdate are overwritten.
    Existing {
        #[serde(rename = "authorId")]
        id: AuthorId,
        name: String,
        #[ts(as = "String")]
        birthdate: NaiveDate,
    },

    /// An author to be created.
    New {
        name: String,
        #[ts(as = "String")]
        birthdate: NaiveDate,
    },
}

impl AuthorEntry {
    /// Returns the referenced id for `Existing` entries.
    #[inline]
    pub fn id(&self) -> Option<AuthorId> {
        match self {
            AuthorEntry::Existing { id, .. } => Some(*id),
            AuthorEntry::New { .. } => None,
        }
    }

    #[inline]
    pub fn name(&self) -> &str {
        match self {
            AuthorEntry::Existing { name, .. } | AuthorEntry::New { name, .. } => name,
        }
    }

    #[inline]
    pub fn birthdate(&self) -> NaiveDate {
        match self {
            AuthorEntry::Existing { birthdate, .. } | AuthorEntry::New { birthdate, .. } => {
                *birthdate
            }
        }
    }

    /// The name/birthdate payload carried by either variant.
    pub fn profile(&self) -> AuthorProfile {
        AuthorProfile::new(self.name(), self.birthdate())
    }

    /// How the duplicate-registration check should match this author.
    pub fn identity(&self) -> AuthorIdentity {
        match self {
            AuthorEntry::Existing { id, .. } => AuthorIdentity::ById(*id),
            AuthorEntry::New { name, birthdate } => AuthorIdentity::ByProfile(AuthorProfile {
                name: name.clone(),
                birthdate: *birthdate,
            }),
        }
    }
}

/// How a requested author is matched against stored authors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthorIdentity {
    ById(AuthorId),
    ByProfile(AuthorProfile),
}

// =============================================================================
// Requests
// =============================================================================

/// Body of a book registration or book update.
///
/// Missing fields deserialize to empty values (`is_published` to `None`) so
/// that validation reports them per field instead of the JSON extractor
/// rejecting the whole body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct BookRequest {
    #[serde(default)]
    pub title: String,

    #[serde(default)]
    pub price: i64,

    #[serde(default)]
    pub is_published: Option<bool>,

    #[serde(default)]
    pub authors: Vec<AuthorEntry>,
}

impl BookRequest {
    /// Book fields as they will be written.
    ///
    /// Only meaningful after validation; an absent publish flag reads as
    /// unpublished.
    pub fn summary(&self) -> BookSummary {
        BookSummary {
            title: self.title.clone(),
            price: self.price,
            is_published: self.is_published.unwrap_or(false),
        }
    }

    /// Ids of the `Existing` entries, in request order.
    pub fn referenced_author_ids(&self) -> Vec<AuthorId> {
        self.authors.iter().filter_map(AuthorEntry::id).collect()
    }
}

/// Body of a pure id-list author sync.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct BookAuthorsRequest {
    #[serde(default)]
    pub author_ids: Vec<AuthorId>,
}

/// Body of an author-name lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct AuthorSearchRequest {
    #[serde(default)]
    pub name: String,
}

// =============================================================================
// Unit Tests
// =============================================================================
