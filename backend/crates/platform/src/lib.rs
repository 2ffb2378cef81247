//! Platform Crate - Technical Infrastructure
//!
//! This crate provides shared technical foundations:
//! - Cryptographic utilities (SHA-256, HMAC, Base64, confirmation codes)
//! - Password hashing (Argon2id)

pub mod crypto;
pub mod password;
