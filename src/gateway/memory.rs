//! In-process backend. Same uniqueness rules and id assignment as the PostgreSQL tables,
//! nothing is persisted. Used for local runs (`DIALECT=memory`) and tests.

use super::Gateway;
use crate::error::AppError;
use crate::model::{Book, NewBook, NewPerson, Person};
use async_trait::async_trait;
use chrono::Utc;
use std::collections::BTreeMap;
use tokio::sync::RwLock;

#[derive(Default)]
struct Store {
    people: BTreeMap<i64, Person>,
    books: BTreeMap<i64, Book>,
    last_person_id: i64,
    last_book_id: i64,
    closed: bool,
}

impl Store {
    fn open(&self) -> Result<(), AppError> {
        if self.closed {
            return Err(AppError::Db(sqlx::Error::PoolClosed));
        }
        Ok(())
    }
}

#[derive(Default)]
pub struct MemoryGateway {
    store: RwLock<Store>,
}

impl MemoryGateway {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Gateway for MemoryGateway {
    async fn ensure_schema(&self) -> Result<(), AppError> {
        self.store.read().await.open()
    }

    async fn find_all_people(&self) -> Result<Vec<Person>, AppError> {
        let store = self.store.read().await;
        store.open()?;
        Ok(store.people.values().cloned().collect())
    }

    async fn find_all_books(&self) -> Result<Vec<Book>, AppError> {
        let store = self.store.read().await;
        store.open()?;
        Ok(store.books.values().cloned().collect())
    }

    async fn find_person(&self, id: i64) -> Result<Option<Person>, AppError> {
        let store = self.store.read().await;
        store.open()?;
        Ok(store.people.get(&id).cloned())
    }

    async fn find_book(&self, id: i64) -> Result<Option<Book>, AppError> {
        let store = self.store.read().await;
        store.open()?;
        Ok(store.books.get(&id).cloned())
    }

    async fn find_related_books(&self, person_id: i64) -> Result<Vec<Book>, AppError> {
        let store = self.store.read().await;
        store.open()?;
        Ok(store
            .books
            .values()
            .filter(|b| b.person_id == person_id)
            .cloned()
            .collect())
    }

    async fn create_person(&self, person: NewPerson) -> Result<Person, AppError> {
        let mut store = self.store.write().await;
        store.open()?;
        if store.people.values().any(|p| p.email == person.email) {
            return Err(AppError::Conflict(format!(
                "duplicate key value violates unique constraint (idx_people_email): {}",
                person.email
            )));
        }
        store.last_person_id += 1;
        let now = Utc::now();
        let created = Person {
            id: store.last_person_id,
            created_at: now,
            updated_at: now,
            name: person.name,
            email: person.email,
            books: None,
        };
        store.people.insert(created.id, created.clone());
        Ok(created)
    }

    async fn create_book(&self, book: NewBook) -> Result<Book, AppError> {
        let mut store = self.store.write().await;
        store.open()?;
        if store.books.values().any(|b| b.call_number == book.call_number) {
            return Err(AppError::Conflict(format!(
                "duplicate key value violates unique constraint (idx_books_call_number): {}",
                book.call_number
            )));
        }
        store.last_book_id += 1;
        let now = Utc::now();
        let created = Book {
            id: store.last_book_id,
            created_at: now,
            updated_at: now,
            title: book.title,
            author: book.author,
            call_number: book.call_number,
            person_id: book.person_id,
        };
        store.books.insert(created.id, created.clone());
        Ok(created)
    }

    async fn delete_person(&self, person: Person) -> Result<Option<Person>, AppError> {
        let mut store = self.store.write().await;
        store.open()?;
        Ok(store.people.remove(&person.id))
    }

    async fn delete_book(&self, book: Book) -> Result<Option<Book>, AppError> {
        let mut store = self.store.write().await;
        store.open()?;
        Ok(store.books.remove(&book.id))
    }

    async fn ping(&self) -> Result<(), AppError> {
        self.store.read().await.open()
    }

    async fn close(&self) {
        self.store.write().await.closed = true;
    }
}
