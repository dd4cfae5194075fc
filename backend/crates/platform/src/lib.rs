//! Platform Crate - Technical Infrastructure
//!
//! This crate provides shared technical foundations:
//! - Cryptographic utilities (secure random, Base64, constant-time compare)
//! - Password hashing (Argon2id, salt‖key encoding)
//! - Client metadata extraction (IP, User-Agent)

pub mod client;
pub mod crypto;
pub mod password;
