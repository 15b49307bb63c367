//! Document storage for uploaded files using Apache OpenDAL.
//!
//! Registration proofs, identity certificates, NIC scans, donation images
//! and principal letters are written server-side before the owning row is
//! created, then served back through the files endpoint. The backend is
//! vendor-agnostic:
//! - S3-compatible: Cloudflare R2, Supabase Storage, AWS S3, DigitalOcean Spaces
//! - Azure Blob Storage
//! - Local filesystem (development only)

mod config;
mod error;
mod service;

pub use config::{StorageConfig, StorageProvider};
pub use error::StorageError;
pub use service::{DocumentKind, StorageService, StoredDocument};
