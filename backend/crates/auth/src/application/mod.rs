//! Application Layer
//!
//! Use cases orchestrating domain entities and repositories.

pub mod config;
pub mod login;
pub mod logout;
pub mod refresh;
pub mod register;

pub use config::AuthConfig;
pub use login::{LoginInput, LoginOutput, LoginUseCase};
pub use logout::LogoutUseCase;
pub use refresh::{RefreshOutput, RefreshUseCase};
pub use register::{RegisterInput, RegisterUseCase};
