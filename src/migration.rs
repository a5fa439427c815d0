//! Schema setup: tables for people and books, plus their unique indexes.
//! Every statement is `IF NOT EXISTS`, so running this on each startup is a no-op once applied.

use crate::error::AppError;
use sqlx::PgPool;

const PEOPLE_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS people (
    id BIGSERIAL PRIMARY KEY,
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    name TEXT NOT NULL DEFAULT '',
    email VARCHAR(100) NOT NULL DEFAULT ''
)
"#;

// person_id carries no foreign key: books may point at people that do not exist.
const BOOKS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS books (
    id BIGSERIAL PRIMARY KEY,
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    title TEXT NOT NULL DEFAULT '',
    author TEXT NOT NULL DEFAULT '',
    call_number BIGINT NOT NULL DEFAULT 0,
    person_id BIGINT NOT NULL DEFAULT 0
)
"#;

/// DDL in dependency order.
pub fn schema_statements() -> [&'static str; 5] {
    [
        PEOPLE_TABLE,
        "CREATE UNIQUE INDEX IF NOT EXISTS idx_people_email ON people (email)",
        BOOKS_TABLE,
        "CREATE UNIQUE INDEX IF NOT EXISTS idx_books_call_number ON books (call_number)",
        "CREATE INDEX IF NOT EXISTS idx_books_person_id ON books (person_id)",
    ]
}

/// Create the people and books tables and their indexes if they are missing.
pub async fn ensure_schema(pool: &PgPool) -> Result<(), AppError> {
    for sql in schema_statements() {
        tracing::debug!(sql = %sql.trim(), "ddl");
        sqlx::query(sql).execute(pool).await?;
    }
    tracing::info!("schema ensured");
    Ok(())
}
