//! # API Shared
//!
//! Shared definitions for the clinic APIs.
//!
//! Contains:
//! - Wire request/response types (`dto` module)
//! - Shared services like `HealthService`
//! - Bearer token parsing
//!
//! Used by `api-rest` and by clients that want the same wire types.

pub mod auth;
pub mod dto;
pub mod health;

pub use dto::*;
pub use health::HealthService;
