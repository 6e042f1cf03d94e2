//! Authentication module for the portal backend
//!
//! Provides:
//! - Login with caller-supplied credentials
//! - Account registration
//! - Logout
//!
//! Each operation is a single POST to a fixed path; serialization and
//! transport live in the shared HTTP client, nothing is retried or cached.

mod client;
mod types;

pub use client::AuthClient;
pub use types::*;
