//! Client configuration for the session subsystem.
//!
//! # Design
//! - All tunables live in one value so the app shell builds it once and hands
//!   clones to the transport, coordinator, and guard.
//! - Defaults match the deployed console; loading from files or environment is
//!   left to the host.

use serde::Deserialize;
use std::time::Duration;

/// Default API prefix, relative to the page origin.
pub const DEFAULT_API_BASE: &str = "/api/v1";
/// Default per-request timeout.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
/// Delay between the first 401 of a burst and the login redirect.
pub const DEFAULT_INVALIDATION_WINDOW: Duration = Duration::from_millis(1200);

/// Tunables for the transport pipeline, invalidation coordinator, and guard.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Prefix joined with every request path.
    pub api_base: String,
    /// Per-request timeout applied by the HTTP backend.
    #[serde(with = "duration_ms")]
    pub request_timeout: Duration,
    /// Debounce window before redirecting after an authentication failure.
    #[serde(with = "duration_ms")]
    pub invalidation_window: Duration,
    /// Path of the login view.
    pub login_path: String,
    /// Path authenticated users land on by default.
    pub landing_path: String,
    /// Path of the access-denied view.
    pub forbidden_path: String,
    /// Query parameter carrying the return path to the login view.
    pub return_param: String,
    /// Notice shown once per invalidation cycle and used for bare 401s.
    pub session_expired_message: String,
    /// Display message when a failure body carries no usable text.
    pub request_failed_message: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            invalidation_window: DEFAULT_INVALIDATION_WINDOW,
            login_path: "/login".to_string(),
            landing_path: "/defense".to_string(),
            forbidden_path: "/forbidden".to_string(),
            return_param: "redirect".to_string(),
            session_expired_message: "Session expired, please log in again".to_string(),
            request_failed_message: "Request failed".to_string(),
        }
    }
}

impl ClientConfig {
    /// Override the API prefix (absolute URLs are required off the browser).
    #[must_use]
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }

    /// Override the invalidation debounce window.
    #[must_use]
    pub const fn with_invalidation_window(mut self, window: Duration) -> Self {
        self.invalidation_window = window;
        self
    }

    /// Build the full URL for an API path.
    #[must_use]
    pub fn endpoint(&self, path: &str) -> String {
        let base = self.api_base.trim_end_matches('/');
        if path.starts_with('/') {
            format!("{base}{path}")
        } else {
            format!("{base}/{path}")
        }
    }

    /// Login route carrying `return_to` as the return-path parameter.
    #[must_use]
    pub fn login_redirect(&self, return_to: &str) -> String {
        format!(
            "{}?{}={}",
            self.login_path,
            self.return_param,
            urlencoding::encode(return_to)
        )
    }

    /// Whether `path` is the login view.
    ///
    /// Query, fragment, and empty segments are ignored, so `/login/` matches
    /// the same way the route table resolves it.
    #[must_use]
    pub fn is_login_path(&self, path: &str) -> bool {
        path_segments(strip_location_suffix(path)).eq(path_segments(&self.login_path))
    }
}

/// Drop any `?query` or `#fragment` suffix from a location path.
#[must_use]
pub fn strip_location_suffix(path: &str) -> &str {
    let end = path.find(['?', '#']).unwrap_or(path.len());
    &path[..end]
}

/// Non-empty `/`-separated segments of a path.
pub(crate) fn path_segments(path: &str) -> impl Iterator<Item = &str> {
    path.split('/').filter(|segment| !segment.is_empty())
}

mod duration_ms {
    use serde::{Deserialize, Deserializer};
    use std::time::Duration;

    pub(super) fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        u64::deserialize(deserializer).map(Duration::from_millis)
    }
}
