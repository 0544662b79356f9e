//! CSRF guard configuration.

use crate::error::{CsrfError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Configuration for [`crate::CsrfGuard`].
///
/// Immutable once the guard is constructed; shared read-only across
/// concurrent requests.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CsrfConfig {
    /// Name used for the cookie, the form parameter, and the request
    /// attribute. Must be non-blank.
    pub token_name: String,

    /// Paths exempted from validation. Exact string match against the request
    /// path only; no prefix, glob, or regex matching.
    #[serde(default)]
    pub exclude_paths: HashSet<String>,

    /// Path attribute of the issued token cookie.
    #[serde(default = "default_cookie_path")]
    pub cookie_path: String,

    /// Max-Age attribute of the issued token cookie, in seconds.
    #[serde(default = "default_cookie_max_age")]
    pub cookie_max_age: u32,
}

fn default_cookie_path() -> String {
    "/".to_string()
}

fn default_cookie_max_age() -> u32 {
    3600
}

impl CsrfConfig {
    /// Create a new configuration with the given token name.
    ///
    /// Fails with [`CsrfError::Configuration`] when the name is empty or
    /// whitespace-only, so a misconfigured guard can never reach traffic.
    pub fn new(token_name: impl Into<String>) -> Result<Self> {
        let config = Self {
            token_name: token_name.into(),
            exclude_paths: HashSet::new(),
            cookie_path: default_cookie_path(),
            cookie_max_age: default_cookie_max_age(),
        };
        config.validate()?;
        Ok(config)
    }

    /// Re-check invariants, for configurations built by deserialization.
    pub fn validate(&self) -> Result<()> {
        if self.token_name.trim().is_empty() {
            return Err(CsrfError::Configuration(
                "token_name parameter should be specified".to_string(),
            ));
        }
        Ok(())
    }

    /// Set the excluded paths.
    pub fn with_exclude_paths(mut self, paths: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.exclude_paths = paths.into_iter().map(Into::into).collect();
        self
    }

    /// Set the excluded paths from a comma-separated list, as supplied by
    /// host init parameters. Empty segments are dropped, so `"/a,,/b"`
    /// yields two paths; a plain comma-split would keep the interior empty
    /// string and thereby exclude the empty path. Adapters porting an
    /// existing exclude list should check for that edge case.
    pub fn with_exclude(mut self, paths: &str) -> Self {
        self.exclude_paths = paths
            .split(',')
            .filter(|p| !p.is_empty())
            .map(str::to_string)
            .collect();
        self
    }

    /// Set the cookie path.
    pub fn with_cookie_path(mut self, path: impl Into<String>) -> Self {
        self.cookie_path = path.into();
        self
    }

    /// Set the cookie max-age in seconds.
    pub fn with_cookie_max_age(mut self, seconds: u32) -> Self {
        self.cookie_max_age = seconds;
        self
    }

    /// Whether the given request path is exempt from validation.
    pub fn is_excluded(&self, path: &str) -> bool {
        self.exclude_paths.contains(path)
    }
}
