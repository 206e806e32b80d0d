//! Constants used throughout the clinic core crate.
//!
//! Defaults for configuration and the fixed strings the shaping functions rely on live here so
//! the binaries, services and tests agree on them.

use std::time::Duration;

/// Default REST listen address when `CLINIC_REST_ADDR` is not set.
pub const DEFAULT_REST_ADDR: &str = "0.0.0.0:3000";

/// Default page size for list endpoints when neither the request nor the config sets one.
pub const DEFAULT_PAGE_LIMIT: usize = 10;

/// Upper bound on a requested page size.
pub const MAX_PAGE_LIMIT: usize = 100;

/// First page number. Pages are 1-based.
pub const FIRST_PAGE: usize = 1;

/// Prefix of the mock bearer tokens handed out by `/auth/login`.
pub const MOCK_TOKEN_PREFIX: &str = "mock-token-";

/// How long a duplicate-metric notice stays visible before the caller clears it.
pub const DUPLICATE_NOTICE_TTL: Duration = Duration::from_secs(3);

/// Seed data compiled into the crate, used when no seed file override is configured.
pub const EMBEDDED_SEED_YAML: &str = include_str!("../seed/clinic.yaml");

/// Separator between the parts of a legacy flat prescription string.
pub const LEGACY_PRESCRIPTION_DELIMITER: &str = " - ";
