//! Authentication primitives.
//!
//! Password hashing and verification with Argon2id. Roles live in
//! [`crate::lifecycle::types::AccountRole`]; token handling lives in the
//! shared crate.

mod password;

pub use password::{PasswordError, hash_password, verify_password};
