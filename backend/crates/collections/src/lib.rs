//! Collections Backend Module
//!
//! Per-user flashcard collections and their cards. CRUD glue over
//! Postgres: each collection row owns its card list as one JSON
//! document, so cards are only ever touched through their collection.
//!
//! Every route sits behind the auth identity middleware; ownership is
//! enforced on each read and mutation.

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

#[cfg(test)]
mod tests;

// Re-exports for convenience
pub use application::service::CollectionService;
pub use error::{CollectionError, CollectionResult};
pub use infra::postgres::PgCollectionRepository;
pub use presentation::router::collections_router;
