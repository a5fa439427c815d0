//! Entity model: people and the books they own.
//!
//! JSON field names mirror the attribute names (`ID`, `Name`, `PersonID`, ...). Column
//! names are snake_case; `sqlx::FromRow` maps them onto the struct fields.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Person {
    #[serde(rename = "ID")]
    pub id: i64,
    #[serde(rename = "CreatedAt")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "UpdatedAt")]
    pub updated_at: DateTime<Utc>,
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Email")]
    pub email: String,
    /// Not stored with the person. `None` in listings; filled from the books table on
    /// single-person reads.
    #[serde(rename = "Books", default)]
    #[sqlx(skip)]
    pub books: Option<Vec<Book>>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Book {
    #[serde(rename = "ID")]
    pub id: i64,
    #[serde(rename = "CreatedAt")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "UpdatedAt")]
    pub updated_at: DateTime<Utc>,
    #[serde(rename = "Title")]
    pub title: String,
    #[serde(rename = "Author")]
    pub author: String,
    #[serde(rename = "CallNumber")]
    pub call_number: i64,
    /// Owner. Not checked against the people table.
    #[serde(rename = "PersonID")]
    pub person_id: i64,
}

/// Body of `POST /create/person`. Missing fields decode to empty strings; an `ID` in the
/// body is ignored.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NewPerson {
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Email")]
    pub email: String,
}

/// Body of `POST /create/book`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NewBook {
    #[serde(rename = "Title")]
    pub title: String,
    #[serde(rename = "Author")]
    pub author: String,
    #[serde(rename = "CallNumber")]
    pub call_number: i64,
    #[serde(rename = "PersonID")]
    pub person_id: i64,
}

impl Person {
    pub fn with_books(mut self, books: Vec<Book>) -> Self {
        self.books = Some(books);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_person_ignores_id_and_defaults_missing_fields() {
        let p: NewPerson = serde_json::from_str(r#"{"ID": 42, "Name": "Jack"}"#).unwrap();
        assert_eq!(p.name, "Jack");
        assert_eq!(p.email, "");
    }

    #[test]
    fn person_serializes_with_attribute_names() {
        let now = Utc::now();
        let person = Person {
            id: 7,
            created_at: now,
            updated_at: now,
            name: "Jack".into(),
            email: "jack@email.com".into(),
            books: None,
        };
        let v = serde_json::to_value(&person).unwrap();
        assert_eq!(v["ID"], 7);
        assert_eq!(v["Email"], "jack@email.com");
        assert!(v["Books"].is_null());

        let v = serde_json::to_value(person.with_books(Vec::new())).unwrap();
        assert_eq!(v["Books"], serde_json::json!([]));
    }

    #[test]
    fn new_book_decodes_numeric_fields() {
        let b: NewBook = serde_json::from_str(
            r#"{"Title":"Book X","Author":"A","CallNumber":9999,"PersonID":1}"#,
        )
        .unwrap();
        assert_eq!(b.call_number, 9999);
        assert_eq!(b.person_id, 1);
    }
}
