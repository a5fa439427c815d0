//! Persistence gateway: the seam between handlers and storage.
//!
//! Handlers only see `Arc<dyn Gateway>`. Each operation is one independent statement;
//! errors are returned to the caller as they come back from storage, never retried.

mod memory;
mod postgres;

pub use memory::MemoryGateway;
pub use postgres::PgGateway;

use crate::config::{DbConfig, Dialect};
use crate::error::AppError;
use crate::model::{Book, NewBook, NewPerson, Person};
use async_trait::async_trait;
use std::sync::Arc;

#[async_trait]
pub trait Gateway: Send + Sync {
    /// Creates missing tables and indexes. Called once at startup, before serving.
    async fn ensure_schema(&self) -> Result<(), AppError>;

    async fn find_all_people(&self) -> Result<Vec<Person>, AppError>;

    async fn find_all_books(&self) -> Result<Vec<Book>, AppError>;

    async fn find_person(&self, id: i64) -> Result<Option<Person>, AppError>;

    async fn find_book(&self, id: i64) -> Result<Option<Book>, AppError>;

    /// Books whose `PersonID` equals `person_id`, by id.
    async fn find_related_books(&self, person_id: i64) -> Result<Vec<Book>, AppError>;

    /// Inserts and returns the stored row with its assigned id. Unique violations
    /// (email, call number) come back as `AppError::Conflict`.
    async fn create_person(&self, person: NewPerson) -> Result<Person, AppError>;

    async fn create_book(&self, book: NewBook) -> Result<Book, AppError>;

    /// Removes the row with `person.id`. Books owned by the person are left in place.
    async fn delete_person(&self, person: Person) -> Result<Option<Person>, AppError>;

    async fn delete_book(&self, book: Book) -> Result<Option<Book>, AppError>;

    /// Cheap round trip used by the readiness probe.
    async fn ping(&self) -> Result<(), AppError>;

    /// Releases the underlying connections. Later calls fail.
    async fn close(&self);
}

/// A stored entity: which table it lives in and which columns make it up.
pub trait Record {
    const ENTITY: &'static str;
    const TABLE: &'static str;
    const COLUMNS: &'static str;

    fn id(&self) -> i64;
}

impl Record for Person {
    const ENTITY: &'static str = "person";
    const TABLE: &'static str = "people";
    const COLUMNS: &'static str = "id, created_at, updated_at, name, email";

    fn id(&self) -> i64 {
        self.id
    }
}

impl Record for Book {
    const ENTITY: &'static str = "book";
    const TABLE: &'static str = "books";
    const COLUMNS: &'static str = "id, created_at, updated_at, title, author, call_number, person_id";

    fn id(&self) -> i64 {
        self.id
    }
}

/// Opens the backend named by `config.dialect`.
pub async fn connect(config: &DbConfig) -> Result<Arc<dyn Gateway>, AppError> {
    let gateway: Arc<dyn Gateway> = match config.dialect {
        Dialect::Postgres => Arc::new(PgGateway::connect(config).await?),
        Dialect::Memory => {
            tracing::info!("using in-memory store; data is lost on restart");
            Arc::new(MemoryGateway::new())
        }
    };
    Ok(gateway)
}
