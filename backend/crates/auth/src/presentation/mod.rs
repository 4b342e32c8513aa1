//! Presentation Layer
//!
//! HTTP surface: DTOs, handlers, identity middleware, and the router.

pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod router;

pub use handlers::AuthAppState;
pub use middleware::{deserialize_user, require_user, CurrentUser};
pub use router::{auth_router, users_router};
