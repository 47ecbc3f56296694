//! In-memory store double for service tests.
//!
//! Implements all three store traits over one shared state, records every
//! call in an operation log, and can be told to fail a given write.

use std::collections::{BTreeMap, HashSet};
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};

use crate::error::{StoreError, StoreResult};
use crate::store::{AssociationStore, AuthorStore, BookStore};
use crate::types::{Author, AuthorId, AuthorIdentity, AuthorProfile, BookId, BookSummary};

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// One recorded store call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Op {
    BookExists(BookId),
    CountByContent(String),
    FetchBook(BookId),
    InsertBook(BookId),
    UpdateBook(BookId),
    AuthorExists(AuthorId),
    FetchAuthor(AuthorId),
    FindAuthorByProfile(String),
    InsertAuthor(AuthorId),
    UpdateAuthor(AuthorId),
    FindBookIdsByName(String),
    FindAuthorIds(BookId),
    Link(BookId, AuthorId),
    Unlink(BookId, AuthorId),
}

impl Op {
    fn is_write(&self) -> bool {
        matches!(
            self,
            Op::InsertBook(_)
                | Op::UpdateBook(_)
                | Op::InsertAuthor(_)
                | Op::UpdateAuthor(_)
                | Op::Link(..)
                | Op::Unlink(..)
        )
    }
}

/// A write that should fail with a store error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Fault {
    InsertBook,
    UpdateBook,
    InsertAuthor,
    UpdateAuthor,
    Link,
    Unlink,
}

#[derive(Default)]
struct State {
    books: BTreeMap<BookId, BookSummary>,
    authors: BTreeMap<AuthorId, Author>,
    links: Vec<(BookId, AuthorId)>,
    next_book_id: BookId,
    next_author_id: AuthorId,
    log: Vec<Op>,
    faults: HashSet<Fault>,
}

#[derive(Default)]
pub struct MemoryStore {
    state: Mutex<State>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    // -------------------------------------------------------------------------
    // Seeding (not logged)
    // -------------------------------------------------------------------------

    pub fn seed_book(&self, title: &str) -> BookId {
        let mut state = self.state.lock().unwrap();
        state.next_book_id += 1;
        let id = state.next_book_id;
        state.books.insert(
            id,
            BookSummary {
                title: title.to_string(),
                price: 1000,
                is_published: true,
            },
        );
        id
    }

    pub fn seed_book_with_id(&self, id: BookId, title: &str) {
        let mut state = self.state.lock().unwrap();
        state.next_book_id = state.next_book_id.max(id);
        state.books.insert(
            id,
            BookSummary {
                title: title.to_string(),
                price: 1000,
                is_published: true,
            },
        );
    }

    pub fn seed_author(&self, name: &str, birthdate: NaiveDate) -> AuthorId {
        let id = self.state.lock().unwrap().next_author_id + 1;
        self.seed_author_with_id(id, name, birthdate);
        id
    }

    pub fn seed_author_with_id(&self, id: AuthorId, name: &str, birthdate: NaiveDate) {
        let mut state = self.state.lock().unwrap();
        state.next_author_id = state.next_author_id.max(id);
        let now = Utc::now();
        state.authors.insert(
            id,
            Author {
                id,
                name: name.to_string(),
                birthdate,
                created_at: now,
                updated_at: now,
            },
        );
    }

    pub fn seed_link(&self, book_id: BookId, author_id: AuthorId) {
        let mut state = self.state.lock().unwrap();
        if !state.links.contains(&(book_id, author_id)) {
            state.links.push((book_id, author_id));
        }
    }

    pub fn fail_on(&self, fault: Fault) {
        self.state.lock().unwrap().faults.insert(fault);
    }

    // -------------------------------------------------------------------------
    // Inspection
    // -------------------------------------------------------------------------

    pub fn log(&self) -> Vec<Op> {
        self.state.lock().unwrap().log.clone()
    }

    pub fn writes(&self) -> Vec<Op> {
        self.log().into_iter().filter(Op::is_write).collect()
    }

    pub fn clear_log(&self) {
        self.state.lock().unwrap().log.clear();
    }

    pub fn book(&self, id: BookId) -> Option<BookSummary> {
        self.state.lock().unwrap().books.get(&id).cloned()
    }

    pub fn book_count(&self) -> usize {
        self.state.lock().unwrap().books.len()
    }

    pub fn author(&self, id: AuthorId) -> Option<Author> {
        self.state.lock().unwrap().authors.get(&id).cloned()
    }

    pub fn author_count(&self) -> usize {
        self.state.lock().unwrap().authors.len()
    }

    /// Author ids linked to `book_id`, sorted.
    pub fn associated(&self, book_id: BookId) -> Vec<AuthorId> {
        let mut ids: Vec<AuthorId> = self
            .state
            .lock()
            .unwrap()
            .links
            .iter()
            .filter(|(b, _)| *b == book_id)
            .map(|(_, a)| *a)
            .collect();
        ids.sort_unstable();
        ids
    }

    fn record(&self, op: Op) {
        self.state.lock().unwrap().log.push(op);
    }

    fn check(&self, fault: Fault) -> StoreResult<()> {
        if self.state.lock().unwrap().faults.contains(&fault) {
            return Err(StoreError::new(format!("injected failure: {:?}", fault)));
        }
        Ok(())
    }
}

#[async_trait]
impl BookStore for MemoryStore {
    async fn exists_by_id(&self, id: BookId) -> StoreResult<bool> {
        self.record(Op::BookExists(id));
        Ok(self.state.lock().unwrap().books.contains_key(&id))
    }

    async fn count_by_content(
        &self,
        title: &str,
        authors: &[AuthorIdentity],
    ) -> StoreResult<i64> {
        self.record(Op::CountByContent(title.to_string()));
        let state = self.state.lock().unwrap();

        let mut count = 0;
        for identity in authors {
            for (book_id, author_id) in &state.links {
                let title_matches = state
                    .books
                    .get(book_id)
                    .map(|b| b.title == title)
                    .unwrap_or(false);
                if !title_matches {
                    continue;
                }
                let author_matches = match identity {
                    AuthorIdentity::ById(id) => author_id == id,
                    AuthorIdentity::ByProfile(profile) => state
                        .authors
                        .get(author_id)
                        .map(|a| a.name == profile.name && a.birthdate == profile.birthdate)
                        .unwrap_or(false),
                };
                if author_matches {
                    count += 1;
                }
            }
        }
        Ok(count)
    }

    async fn fetch_by_id(&self, id: BookId) -> StoreResult<Option<BookSummary>> {
        self.record(Op::FetchBook(id));
        Ok(self.book(id))
    }

    async fn insert(&self, book: &BookSummary) -> StoreResult<BookId> {
        self.check(Fault::InsertBook)?;
        let id = {
            let mut state = self.state.lock().unwrap();
            state.next_book_id += 1;
            let id = state.next_book_id;
            state.books.insert(id, book.clone());
            id
        };
        self.record(Op::InsertBook(id));
        Ok(id)
    }

    async fn update_by_id(&self, id: BookId, book: &BookSummary) -> StoreResult<()> {
        self.check(Fault::UpdateBook)?;
        self.record(Op::UpdateBook(id));
        if let Some(existing) = self.state.lock().unwrap().books.get_mut(&id) {
            *existing = book.clone();
        }
        Ok(())
    }
}

#[async_trait]
impl AuthorStore for MemoryStore {
    async fn exists_by_id(&self, id: AuthorId) -> StoreResult<bool> {
        self.record(Op::AuthorExists(id));
        Ok(self.state.lock().unwrap().authors.contains_key(&id))
    }

    async fn fetch_by_id(&self, id: AuthorId) -> StoreResult<Option<Author>> {
        self.record(Op::FetchAuthor(id));
        Ok(self.author(id))
    }

    async fn find_id_by_profile(&self, profile: &AuthorProfile) -> StoreResult<Option<AuthorId>> {
        self.record(Op::FindAuthorByProfile(profile.name.clone()));
        Ok(self
            .state
            .lock()
            .unwrap()
            .authors
            .values()
            .find(|a| a.name == profile.name && a.birthdate == profile.birthdate)
            .map(|a| a.id))
    }

    async fn insert(&self, profile: &AuthorProfile) -> StoreResult<AuthorId> {
        self.check(Fault::InsertAuthor)?;
        let id = self.state.lock().unwrap().next_author_id + 1;
        self.seed_author_with_id(id, &profile.name, profile.birthdate);
        self.record(Op::InsertAuthor(id));
        Ok(id)
    }

    async fn update_by_id(&self, id: AuthorId, profile: &AuthorProfile) -> StoreResult<()> {
        self.check(Fault::UpdateAuthor)?;
        self.record(Op::UpdateAuthor(id));
        if let Some(author) = self.state.lock().unwrap().authors.get_mut(&id) {
            author.name = profile.name.clone();
            author.birthdate = profile.birthdate;
            author.updated_at = Utc::now();
        }
        Ok(())
    }

    async fn find_book_ids_by_name(&self, name: &str) -> StoreResult<Vec<BookId>> {
        self.record(Op::FindBookIdsByName(name.to_string()));
        let state = self.state.lock().unwrap();
        Ok(state
            .links
            .iter()
            .filter(|(_, author_id)| {
                state
                    .authors
                    .get(author_id)
                    .map(|a| a.name == name)
                    .unwrap_or(false)
            })
            .map(|(book_id, _)| *book_id)
            .collect())
    }
}

#[async_trait]
impl AssociationStore for MemoryStore {
    async fn find_author_ids(&self, book_id: BookId) -> StoreResult<Vec<AuthorId>> {
        self.record(Op::FindAuthorIds(book_id));
        Ok(self
            .state
            .lock()
            .unwrap()
            .links
            .iter()
            .filter(|(b, _)| *b == book_id)
            .map(|(_, a)| *a)
            .collect())
    }

    async fn insert(&self, book_id: BookId, author_id: AuthorId) -> StoreResult<()> {
        self.check(Fault::Link)?;
        self.record(Op::Link(book_id, author_id));
        self.seed_link(book_id, author_id);
        Ok(())
    }

    async fn delete(&self, book_id: BookId, author_id: AuthorId) -> StoreResult<()> {
        self.check(Fault::Unlink)?;
        self.record(Op::Unlink(book_id, author_id));
        self.state
            .lock()
            .unwrap()
            .links
            .retain(|pair| *pair != (book_id, author_id));
        Ok(())
    }
}
