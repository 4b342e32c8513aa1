//! Domain Layer

pub mod entity;
pub mod repository;

pub use entity::{Card, Collection};
pub use repository::CollectionRepository;
