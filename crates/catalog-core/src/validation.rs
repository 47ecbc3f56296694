//! # Validation Module
//!
//! Request validation for the catalog services.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: HTTP extractor (axum Json)                                   │
//! │  └── Shape: malformed JSON, wrong types                                │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Services (THIS MODULE)                                       │
//! │  ├── Business rules: blank title, negative price, future birthdate     │
//! │  └── Every violated field is collected, not just the first             │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Database (SQLite)                                            │
//! │  ├── NOT NULL / CHECK constraints                                      │
//! │  └── Foreign key + composite primary key on books_authors              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Single-field validators return `Result<(), ValidationError>`; the request
//! validators run all of them and return [`ValidationErrors`].
//!
//! ## Usage
//! ```rust
//! use catalog_core::validation::{validate_price, validate_title};
//!
//! assert!(validate_title("The Rust Book").is_ok());
//! assert!(validate_price(-1).is_err());
//! ```

use chrono::NaiveDate;

use crate::error::{ValidationError, ValidationErrors};
use crate::types::{AuthorEntry, AuthorId, AuthorProfile, BookRequest};
use crate::{MAX_AUTHORS_PER_BOOK, MIN_AUTHORS_PER_BOOK};

/// Result type for single-field validators.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Which operation a [`BookRequest`] is validated for.
///
/// Updates may not flip a book back to unpublished.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookRequestMode {
    Register,
    Update,
}

// =============================================================================
// Field Validators
// =============================================================================

/// Validates a book title: must not be blank.
pub fn validate_title(title: &str) -> ValidationResult<()> {
    if title.trim().is_empty() {
        return Err(ValidationError::Required);
    }
    Ok(())
}

/// Validates a price in the smallest currency unit.
///
/// ## Rules
/// - Must be non-negative (>= 0)
/// - Zero is allowed (free books)
pub fn validate_price(price: i64) -> ValidationResult<()> {
    if price < 0 {
        return Err(ValidationError::Negative);
    }
    Ok(())
}

/// Validates the publish flag.
///
/// ## Rules
/// - Must be present
/// - On update it must be `true`
pub fn validate_published(flag: Option<bool>, mode: BookRequestMode) -> ValidationResult<()> {
    match (flag, mode) {
        (None, _) => Err(ValidationError::Required),
        (Some(false), BookRequestMode::Update) => Err(ValidationError::Unpublish),
        _ => Ok(()),
    }
}

/// Validates how many authors a request names.
pub fn validate_author_count(count: usize) -> ValidationResult<()> {
    if !(MIN_AUTHORS_PER_BOOK..=MAX_AUTHORS_PER_BOOK).contains(&count) {
        return Err(ValidationError::CountOutOfRange {
            min: MIN_AUTHORS_PER_BOOK,
            max: MAX_AUTHORS_PER_BOOK,
        });
    }
    Ok(())
}

/// Validates an author name: must not be blank.
pub fn validate_author_name(name: &str) -> ValidationResult<()> {
    if name.trim().is_empty() {
        return Err(ValidationError::Required);
    }
    Ok(())
}

/// Validates a birthdate: must be strictly before `today`.
///
/// ## Example
/// ```rust
/// use catalog_core::validation::validate_birthdate;
/// use chrono::NaiveDate;
///
/// let today = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
/// assert!(validate_birthdate(NaiveDate::from_ymd_opt(1970, 1, 1).unwrap(), today).is_ok());
/// assert!(validate_birthdate(today, today).is_err());
/// ```
pub fn validate_birthdate(birthdate: NaiveDate, today: NaiveDate) -> ValidationResult<()> {
    if birthdate >= today {
        return Err(ValidationError::NotInPast);
    }
    Ok(())
}

/// Validates an author id named in a request.
pub fn validate_author_id(id: AuthorId) -> ValidationResult<()> {
    if id <= 0 {
        return Err(ValidationError::MustBePositive);
    }
    Ok(())
}

// =============================================================================
// Request Validators
// =============================================================================

/// Validates a book registration or update body.
///
/// ## Field Paths
/// ```text
/// title
/// price
/// isPublished
/// authors
/// authors[i].authorId
/// authors[i].name
/// authors[i].birthdate
/// ```
pub fn validate_book_request(
    request: &BookRequest,
    mode: BookRequestMode,
    today: NaiveDate,
) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::new();

    if let Err(e) = validate_title(&request.title) {
        errors.add("title", e);
    }
    if let Err(e) = validate_price(request.price) {
        errors.add("price", e);
    }
    if let Err(e) = validate_published(request.is_published, mode) {
        errors.add("isPublished", e);
    }
    if let Err(e) = validate_author_count(request.authors.len()) {
        errors.add("authors", e);
    }

    for (i, entry) in request.authors.iter().enumerate() {
        if let AuthorEntry::Existing { id, .. } = entry {
            if let Err(e) = validate_author_id(*id) {
                errors.add(format!("authors[{}].authorId", i), e);
            }
        }
        if let Err(e) = validate_author_name(entry.name()) {
            errors.add(format!("authors[{}].name", i), e);
        }
        if let Err(e) = validate_birthdate(entry.birthdate(), today) {
            errors.add(format!("authors[{}].birthdate", i), e);
        }
    }

    errors.into_result()
}

/// Validates a standalone author body.
pub fn validate_author_profile(
    profile: &AuthorProfile,
    today: NaiveDate,
) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::new();

    if let Err(e) = validate_author_name(&profile.name) {
        errors.add("name", e);
    }
    if let Err(e) = validate_birthdate(profile.birthdate, today) {
        errors.add("birthdate", e);
    }

    errors.into_result()
}

/// Validates an author-name search term.
pub fn validate_search_name(name: &str) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::new();
    if let Err(e) = validate_author_name(name) {
        errors.add("name", e);
    }
    errors.into_result()
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn today() -> NaiveDate {
        date(2024, 6, 1)
    }

    fn valid_request() -> BookRequest {
        BookRequest {
            title: "Programming Rust".to_string(),
            price: 4800,
            is_published: Some(true),
            authors: vec![AuthorEntry::New {
                name: "Jim Blandy".to_string(),
                birthdate: date(1965, 3, 4),
            }],
        }
    }

    #[test]
    fn test_validate_title() {
        assert!(validate_title("Rust").is_ok());
        assert_eq!(validate_title(""), Err(ValidationError::Required));
        assert_eq!(validate_title("   "), Err(ValidationError::Required));
    }

    #[test]
    fn test_validate_price() {
        assert!(validate_price(0).is_ok());
        assert!(validate_price(1999).is_ok());
        assert_eq!(validate_price(-1), Err(ValidationError::Negative));
    }

    #[test]
    fn test_validate_published() {
        assert!(validate_published(Some(false), BookRequestMode::Register).is_ok());
        assert!(validate_published(Some(true), BookRequestMode::Update).is_ok());
        assert_eq!(
            validate_published(None, BookRequestMode::Register),
            Err(ValidationError::Required)
        );
        assert_eq!(
            validate_published(Some(false), BookRequestMode::Update),
            Err(ValidationError::Unpublish)
        );
    }

    #[test]
    fn test_validate_author_count() {
        assert!(validate_author_count(1).is_ok());
        assert!(validate_author_count(100).is_ok());
        assert!(validate_author_count(0).is_err());
        assert!(validate_author_count(101).is_err());
    }

    #[test]
    fn test_validate_birthdate_must_be_strictly_past() {
        assert!(validate_birthdate(date(2024, 5, 31), today()).is_ok());
        assert_eq!(
            validate_birthdate(today(), today()),
            Err(ValidationError::NotInPast)
        );
        assert!(validate_birthdate(date(2030, 1, 1), today()).is_err());
    }

    #[test]
    fn test_valid_book_request_passes() {
        assert!(
            validate_book_request(&valid_request(), BookRequestMode::Register, today()).is_ok()
        );
        assert!(validate_book_request(&valid_request(), BookRequestMode::Update, today()).is_ok());
    }

    #[test]
    fn test_book_request_reports_every_field() {
        let request = BookRequest {
            title: " ".to_string(),
            price: -5,
            is_published: None,
            authors: vec![
                AuthorEntry::Existing {
                    id: 0,
                    name: "".to_string(),
                    birthdate: date(2030, 1, 1),
                },
                AuthorEntry::New {
                    name: "Ok Name".to_string(),
                    birthdate: date(1990, 1, 1),
                },
            ],
        };

        let errors =
            validate_book_request(&request, BookRequestMode::Register, today()).unwrap_err();

        assert_eq!(errors.get("title"), Some(&ValidationError::Required));
        assert_eq!(errors.get("price"), Some(&ValidationError::Negative));
        assert_eq!(errors.get("isPublished"), Some(&ValidationError::Required));
        assert_eq!(
            errors.get("authors[0].authorId"),
            Some(&ValidationError::MustBePositive)
        );
        assert_eq!(errors.get("authors[0].name"), Some(&ValidationError::Required));
        assert_eq!(
            errors.get("authors[0].birthdate"),
            Some(&ValidationError::NotInPast)
        );
        assert!(errors.get("authors[1].name").is_none());
        assert_eq!(errors.len(), 6);
    }

    #[test]
    fn test_update_rejects_unpublish() {
        let mut request = valid_request();
        request.is_published = Some(false);

        assert!(validate_book_request(&request, BookRequestMode::Register, today()).is_ok());
        let errors = validate_book_request(&request, BookRequestMode::Update, today()).unwrap_err();
        assert_eq!(errors.get("isPublished"), Some(&ValidationError::Unpublish));
    }

    #[test]
    fn test_empty_author_list_rejected() {
        let mut request = valid_request();
        request.authors.clear();

        let errors =
            validate_book_request(&request, BookRequestMode::Register, today()).unwrap_err();
        assert_eq!(
            errors.get("authors"),
            Some(&ValidationError::CountOutOfRange { min: 1, max: 100 })
        );
    }

    #[test]
    fn test_validate_author_profile() {
        let ok = AuthorProfile::new("Carol Nichols", date(1983, 2, 2));
        assert!(validate_author_profile(&ok, today()).is_ok());

        let bad = AuthorProfile::new("", today());
        let errors = validate_author_profile(&bad, today()).unwrap_err();
        assert_eq!(errors.len(), 2);
    }

    #[test]
    fn test_validate_search_name() {
        assert!(validate_search_name("Jane Doe").is_ok());
        assert!(validate_search_name("").is_err());
    }
}
