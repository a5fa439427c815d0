//! Demo data: one person and three books they own. Only applied to an empty people table.

use crate::error::AppError;
use crate::gateway::Gateway;
use crate::model::{NewBook, NewPerson, Person};

fn demo_person() -> NewPerson {
    NewPerson {
        name: "Jack".into(),
        email: "jack@email.com".into(),
    }
}

fn demo_books(owner: i64) -> Vec<NewBook> {
    [
        ("The Rules fo Thinking", "Richard Templer", 1234),
        ("Book 2", "Author 2", 2345),
        ("Book 3", "Author 3", 3456),
    ]
    .into_iter()
    .map(|(title, author, call_number)| NewBook {
        title: title.into(),
        author: author.into(),
        call_number,
        person_id: owner,
    })
    .collect()
}

/// Returns the seeded person, or `None` when people already exist.
pub async fn seed_demo(gateway: &dyn Gateway) -> Result<Option<Person>, AppError> {
    if !gateway.find_all_people().await?.is_empty() {
        tracing::info!("people table not empty, skipping demo seed");
        return Ok(None);
    }
    let person = gateway.create_person(demo_person()).await?;
    let mut books = Vec::new();
    for book in demo_books(person.id) {
        books.push(gateway.create_book(book).await?);
    }
    tracing::info!(person_id = person.id, books = books.len(), "seeded demo data");
    Ok(Some(person.with_books(books)))
}
