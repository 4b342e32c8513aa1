//! Value Object Module

pub mod email;
pub mod user_role;
pub mod username;

pub use email::Email;
pub use user_role::UserRole;
pub use username::Username;
