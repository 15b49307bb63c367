//! Core business logic for EduLink.
//!
//! This crate contains pure business logic with ZERO web or database dependencies.
//! All domain types, validation rules, and state transitions live here.
//!
//! # Modules
//!
//! - `lifecycle` - Approval status state machine shared by accounts, donations
//!   and supply requests, plus the access guards around it
//! - `auth` - Password hashing
//! - `storage` - Document storage for uploaded files

pub mod auth;
pub mod lifecycle;
pub mod storage;
