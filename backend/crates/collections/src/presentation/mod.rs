//! Presentation Layer

pub mod dto;
pub mod handlers;
pub mod router;

pub use handlers::CollectionsAppState;
pub use router::collections_router;
