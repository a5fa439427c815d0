//! PostgreSQL backend over a `sqlx` pool.

use super::{Gateway, Record};
use crate::config::DbConfig;
use crate::error::AppError;
use crate::migration;
use crate::model::{Book, NewBook, NewPerson, Person};
use async_trait::async_trait;
use sqlx::postgres::{PgArguments, PgConnectOptions, PgPoolOptions, PgRow, PgSslMode};
use sqlx::query::QueryAs;
use sqlx::{FromRow, PgPool, Postgres};

type PgQueryAs<'q, T> = QueryAs<'q, Postgres, T, PgArguments>;

/// Input for an INSERT ... RETURNING of `Output`.
trait Insertable: Send + Sync {
    type Output: Record + for<'r> FromRow<'r, PgRow> + Send + Unpin;
    const INSERT_COLUMNS: &'static str;
    const PLACEHOLDERS: &'static str;

    fn bind<'q>(&'q self, query: PgQueryAs<'q, Self::Output>) -> PgQueryAs<'q, Self::Output>;
}

impl Insertable for NewPerson {
    type Output = Person;
    const INSERT_COLUMNS: &'static str = "name, email";
    const PLACEHOLDERS: &'static str = "$1, $2";

    fn bind<'q>(&'q self, query: PgQueryAs<'q, Person>) -> PgQueryAs<'q, Person> {
        query.bind(&self.name).bind(&self.email)
    }
}

impl Insertable for NewBook {
    type Output = Book;
    const INSERT_COLUMNS: &'static str = "title, author, call_number, person_id";
    const PLACEHOLDERS: &'static str = "$1, $2, $3, $4";

    fn bind<'q>(&'q self, query: PgQueryAs<'q, Book>) -> PgQueryAs<'q, Book> {
        query
            .bind(&self.title)
            .bind(&self.author)
            .bind(self.call_number)
            .bind(self.person_id)
    }
}

fn select_all_sql<T: Record>() -> String {
    format!("SELECT {} FROM {} ORDER BY id", T::COLUMNS, T::TABLE)
}

fn select_by_id_sql<T: Record>() -> String {
    format!("SELECT {} FROM {} WHERE id = $1", T::COLUMNS, T::TABLE)
}

fn related_books_sql() -> String {
    format!(
        "SELECT {} FROM {} WHERE person_id = $1 ORDER BY id",
        Book::COLUMNS,
        Book::TABLE
    )
}

fn insert_sql<I: Insertable>() -> String {
    format!(
        "INSERT INTO {} ({}) VALUES ({}) RETURNING {}",
        <I::Output as Record>::TABLE,
        I::INSERT_COLUMNS,
        I::PLACEHOLDERS,
        <I::Output as Record>::COLUMNS
    )
}

fn delete_sql<T: Record>() -> String {
    format!("DELETE FROM {} WHERE id = $1 RETURNING {}", T::TABLE, T::COLUMNS)
}

#[derive(Clone)]
pub struct PgGateway {
    pool: PgPool,
}

impl PgGateway {
    /// Open a pool with the configured host, port, credentials and database (sslmode disabled).
    pub async fn connect(config: &DbConfig) -> Result<Self, AppError> {
        let options = PgConnectOptions::new()
            .host(&config.host)
            .port(config.port)
            .username(&config.user)
            .password(&config.password)
            .database(&config.name)
            .ssl_mode(PgSslMode::Disable);
        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .connect_with(options)
            .await?;
        tracing::info!(dsn = %config.redacted_dsn(), "successfully connected to database");
        Ok(Self { pool })
    }

    async fn find_all<T>(&self) -> Result<Vec<T>, AppError>
    where
        T: Record + for<'r> FromRow<'r, PgRow> + Send + Unpin,
    {
        let sql = select_all_sql::<T>();
        tracing::debug!(sql = %sql, "query");
        let rows = sqlx::query_as::<_, T>(&sql).fetch_all(&self.pool).await?;
        Ok(rows)
    }

    async fn find_by_id<T>(&self, id: i64) -> Result<Option<T>, AppError>
    where
        T: Record + for<'r> FromRow<'r, PgRow> + Send + Unpin,
    {
        let sql = select_by_id_sql::<T>();
        tracing::debug!(sql = %sql, id, "query");
        let row = sqlx::query_as::<_, T>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn create<I: Insertable>(&self, value: &I) -> Result<I::Output, AppError> {
        let sql = insert_sql::<I>();
        tracing::debug!(sql = %sql, "query");
        let row = value
            .bind(sqlx::query_as::<_, I::Output>(&sql))
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::from_write)?;
        Ok(row)
    }

    async fn delete<T>(&self, id: i64) -> Result<Option<T>, AppError>
    where
        T: Record + for<'r> FromRow<'r, PgRow> + Send + Unpin,
    {
        let sql = delete_sql::<T>();
        tracing::debug!(sql = %sql, id, "query");
        let row = sqlx::query_as::<_, T>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }
}

#[async_trait]
impl Gateway for PgGateway {
    async fn ensure_schema(&self) -> Result<(), AppError> {
        migration::ensure_schema(&self.pool).await
    }

    async fn find_all_people(&self) -> Result<Vec<Person>, AppError> {
        self.find_all().await
    }

    async fn find_all_books(&self) -> Result<Vec<Book>, AppError> {
        self.find_all().await
    }

    async fn find_person(&self, id: i64) -> Result<Option<Person>, AppError> {
        self.find_by_id(id).await
    }

    async fn find_book(&self, id: i64) -> Result<Option<Book>, AppError> {
        self.find_by_id(id).await
    }

    async fn find_related_books(&self, person_id: i64) -> Result<Vec<Book>, AppError> {
        let sql = related_books_sql();
        tracing::debug!(sql = %sql, person_id, "query");
        let rows = sqlx::query_as::<_, Book>(&sql)
            .bind(person_id)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn create_person(&self, person: NewPerson) -> Result<Person, AppError> {
        self.create(&person).await
    }

    async fn create_book(&self, book: NewBook) -> Result<Book, AppError> {
        self.create(&book).await
    }

    async fn delete_person(&self, person: Person) -> Result<Option<Person>, AppError> {
        self.delete(person.id()).await
    }

    async fn delete_book(&self, book: Book) -> Result<Option<Book>, AppError> {
        self.delete(book.id()).await
    }

    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    async fn close(&self) {
        self.pool.close().await;
        tracing::info!("database pool closed");
    }
}
