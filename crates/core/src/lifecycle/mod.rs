//! Approval lifecycle management for EduLink.
//!
//! Accounts, donations and supply requests all move through the same
//! approval lifecycle: created as `pending`, verified or rejected by an
//! admin, and (for submissions) completed by their owner. This module
//! implements that state machine once, parameterized by entity kind,
//! together with the access checks that gate each transition.
//!
//! # Modules
//!
//! - `types` - Domain types (ApprovalStatus, AccountRole, EntityKind, Transition)
//! - `error` - Lifecycle error types with HTTP mappings
//! - `service` - State transition logic
//! - `guard` - Role and ownership checks

pub mod error;
pub mod guard;
pub mod service;
pub mod types;

#[cfg(test)]
mod guard_props;
#[cfg(test)]
mod service_props;

pub use error::LifecycleError;
pub use guard::{AccessGuard, Viewer};
pub use service::Lifecycle;
pub use types::{AccountRole, ApprovalStatus, EntityKind, Transition};
