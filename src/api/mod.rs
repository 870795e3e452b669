//! Backend API client and types.
//!
//! This module provides the interface for the client-activity HTTP endpoints.

mod client;
pub mod error;
pub mod types;

pub use client::{ApiClient, DEFAULT_TIMEOUT_SECS};
pub use types::{Activity, ActivityUpdate};
