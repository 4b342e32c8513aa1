//! Platform Crate - Technical Infrastructure
//!
//! This crate provides shared technical foundations:
//! - Password hashing (Argon2id, NIST SP 800-63B compliant)
//! - JWT signing and verification (RS256, per-role keypairs)
//! - Cookie management
//! - Base64 helpers for key material

pub mod cookie;
pub mod crypto;
pub mod password;
pub mod token;
