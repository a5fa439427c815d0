//! Person handlers: list, read with books, create, delete.

use super::parse_id;
use crate::error::AppError;
use crate::gateway::Record;
use crate::model::{NewPerson, Person};
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    Json,
};

/// GET /people. Books are not loaded.
pub async fn list_people(State(state): State<AppState>) -> Result<Json<Vec<Person>>, AppError> {
    let people = state.gateway.find_all_people().await?;
    Ok(Json(people))
}

/// GET /person/:id. The person with `Books` filled from the books table.
pub async fn get_person(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
) -> Result<Json<Person>, AppError> {
    let id = parse_id(&id_str)?;
    let person = state
        .gateway
        .find_person(id)
        .await?
        .ok_or_else(|| AppError::not_found(Person::ENTITY, id))?;
    let books = state.gateway.find_related_books(person.id).await?;
    Ok(Json(person.with_books(books)))
}

/// POST /create/person
pub async fn create_person(
    State(state): State<AppState>,
    Json(body): Json<NewPerson>,
) -> Result<Json<Person>, AppError> {
    let person = state.gateway.create_person(body).await.map_err(|e| {
        if let AppError::Conflict(ref msg) = e {
            tracing::warn!(conflict = %msg, "create person rejected");
        }
        e
    })?;
    tracing::info!(id = person.id, "person created");
    Ok(Json(person))
}

/// DELETE /delete/person/:id. Responds with the removed person. Their books stay.
pub async fn delete_person(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
) -> Result<Json<Person>, AppError> {
    let id = parse_id(&id_str)?;
    let person = state
        .gateway
        .find_person(id)
        .await?
        .ok_or_else(|| AppError::not_found(Person::ENTITY, id))?;
    let deleted = state
        .gateway
        .delete_person(person)
        .await?
        .ok_or_else(|| AppError::not_found(Person::ENTITY, id))?;
    tracing::info!(id, "person deleted");
    Ok(Json(deleted))
}
