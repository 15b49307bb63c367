//! Shared types, errors, and configuration for EduLink.
//!
//! This crate provides common types used across all other crates:
//! - JWT claims and token service
//! - Authentication request payloads
//! - Application-wide error types
//! - Configuration management

pub mod auth;
pub mod config;
pub mod error;
pub mod jwt;

pub use auth::Claims;
pub use config::AppConfig;
pub use error::{AppError, AppResult};
pub use jwt::{JwtConfig, JwtError, JwtService};
