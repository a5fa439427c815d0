//! Library API: REST service over people and the books they own.

pub mod config;
pub mod error;
pub mod gateway;
pub mod handlers;
pub mod logging;
pub mod migration;
pub mod model;
pub mod routes;
pub mod seed;
pub mod state;

pub use config::{AppConfig, DbConfig, Dialect};
pub use error::{AppError, ConfigError};
pub use gateway::{connect, Gateway, MemoryGateway, PgGateway};
pub use migration::ensure_schema;
pub use model::{Book, NewBook, NewPerson, Person};
pub use routes::{app, common_routes, library_routes};
pub use seed::seed_demo;
pub use state::AppState;
