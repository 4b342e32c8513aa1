//! Infrastructure Layer
//!
//! PostgreSQL user persistence and Redis session storage.

pub mod postgres;
pub mod redis;

pub use postgres::PgUserRepository;
pub use redis::RedisSessionStore;
