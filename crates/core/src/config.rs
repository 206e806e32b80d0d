//! Core runtime configuration.
//!
//! This module defines configuration that should be resolved once at process startup and then
//! passed into core services. Request handlers never read process-wide environment variables.

use crate::constants::{DEFAULT_PAGE_LIMIT, MAX_PAGE_LIMIT};
use crate::{ClinicError, ClinicResult};
use std::path::{Path, PathBuf};

/// Core configuration resolved at startup.
#[derive(Clone, Debug)]
pub struct CoreConfig {
    seed_file: Option<PathBuf>,
    default_page_limit: usize,
}

impl CoreConfig {
    /// Create a new `CoreConfig`.
    ///
    /// # Errors
    ///
    /// Returns `ClinicError::InvalidInput` if the page limit is zero or above
    /// [`MAX_PAGE_LIMIT`], or if the seed file override does not exist.
    pub fn new(seed_file: Option<PathBuf>, default_page_limit: usize) -> ClinicResult<Self> {
        if default_page_limit == 0 || default_page_limit > MAX_PAGE_LIMIT {
            return Err(ClinicError::InvalidInput(format!(
                "default page limit must be between 1 and {MAX_PAGE_LIMIT}"
            )));
        }

        if let Some(path) = &seed_file {
            if !path.is_file() {
                return Err(ClinicError::InvalidInput(format!(
                    "seed file does not exist: {}",
                    path.display()
                )));
            }
        }

        Ok(Self {
            seed_file,
            default_page_limit,
        })
    }

    /// Seed file override, if one was configured.
    pub fn seed_file(&self) -> Option<&Path> {
        self.seed_file.as_deref()
    }

    pub fn default_page_limit(&self) -> usize {
        self.default_page_limit
    }
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            seed_file: None,
            default_page_limit: DEFAULT_PAGE_LIMIT,
        }
    }
}

/// Parse the default page limit from an optional string value.
///
/// If `value` is `None` or empty/whitespace, returns [`DEFAULT_PAGE_LIMIT`].
pub fn page_limit_from_env_value(value: Option<String>) -> ClinicResult<usize> {
    let value = value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty());

    match value {
        None => Ok(DEFAULT_PAGE_LIMIT),
        Some(v) => v.parse::<usize>().map_err(|_| {
            ClinicError::InvalidInput(format!("page limit must be a positive integer, got {v:?}"))
        }),
    }
}

/// Turn an optional seed file path from the environment into an override.
///
/// Empty values count as unset so `.env` files can leave the key blank.
pub fn seed_file_from_env_value(value: Option<String>) -> Option<PathBuf> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_limit_defaults_when_unset_or_blank() {
        assert_eq!(page_limit_from_env_value(None).unwrap(), DEFAULT_PAGE_LIMIT);
        assert_eq!(
            page_limit_from_env_value(Some("  ".into())).unwrap(),
            DEFAULT_PAGE_LIMIT
        );
    }

    #[test]
    fn test_page_limit_parses_value() {
        assert_eq!(page_limit_from_env_value(Some(" 25 ".into())).unwrap(), 25);
    }

    #[test]
    fn test_page_limit_rejects_garbage() {
        let err = page_limit_from_env_value(Some("ten".into())).expect_err("should reject");
        assert!(matches!(err, ClinicError::InvalidInput(msg) if msg.contains("positive integer")));
    }

    #[test]
    fn test_new_rejects_zero_and_oversized_limits() {
        assert!(CoreConfig::new(None, 0).is_err());
        assert!(CoreConfig::new(None, MAX_PAGE_LIMIT + 1).is_err());
        assert!(CoreConfig::new(None, MAX_PAGE_LIMIT).is_ok());
    }

    #[test]
    fn test_new_rejects_missing_seed_file() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.yaml");
        let err = CoreConfig::new(Some(missing), 10).expect_err("should reject");
        assert!(matches!(err, ClinicError::InvalidInput(msg) if msg.contains("seed file")));
    }

    #[test]
    fn test_seed_file_from_env_value_ignores_blank() {
        assert_eq!(seed_file_from_env_value(Some("".into())), None);
        assert_eq!(
            seed_file_from_env_value(Some("/tmp/seed.yaml".into())),
            Some(PathBuf::from("/tmp/seed.yaml"))
        );
    }
}
