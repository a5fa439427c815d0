//! HTTP handlers for people and books.

pub mod book;
pub mod person;
pub use book::*;
pub use person::*;

use crate::error::AppError;

/// Parse the `{id}` path segment.
fn parse_id(id_str: &str) -> Result<i64, AppError> {
    id_str
        .trim()
        .parse()
        .map_err(|_| AppError::BadRequest(format!("invalid id: {}", id_str)))
}
