//! Book handlers: list, read, create, delete.

use super::parse_id;
use crate::error::AppError;
use crate::gateway::Record;
use crate::model::{Book, NewBook};
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    Json,
};

/// GET /books
pub async fn list_books(State(state): State<AppState>) -> Result<Json<Vec<Book>>, AppError> {
    let books = state.gateway.find_all_books().await?;
    Ok(Json(books))
}

/// GET /book/:id
pub async fn get_book(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
) -> Result<Json<Book>, AppError> {
    let id = parse_id(&id_str)?;
    let book = state
        .gateway
        .find_book(id)
        .await?
        .ok_or_else(|| AppError::not_found(Book::ENTITY, id))?;
    Ok(Json(book))
}

/// POST /create/book. `PersonID` is stored as given, even if no such person exists.
pub async fn create_book(
    State(state): State<AppState>,
    Json(body): Json<NewBook>,
) -> Result<Json<Book>, AppError> {
    let book = state.gateway.create_book(body).await.map_err(|e| {
        if let AppError::Conflict(ref msg) = e {
            tracing::warn!(conflict = %msg, "create book rejected");
        }
        e
    })?;
    tracing::info!(id = book.id, call_number = book.call_number, "book created");
    Ok(Json(book))
}

/// DELETE /delete/book/:id
pub async fn delete_book(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
) -> Result<Json<Book>, AppError> {
    let id = parse_id(&id_str)?;
    let book = state
        .gateway
        .find_book(id)
        .await?
        .ok_or_else(|| AppError::not_found(Book::ENTITY, id))?;
    let deleted = state
        .gateway
        .delete_book(book)
        .await?
        .ok_or_else(|| AppError::not_found(Book::ENTITY, id))?;
    tracing::info!(id, "book deleted");
    Ok(Json(deleted))
}
