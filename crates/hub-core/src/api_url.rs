//! API base URL type.

use std::fmt;

use url::Url;

use crate::error::Error;

/// Environment variable overriding the API base URL.
pub const API_URL_ENV: &str = "HUB_API_URL";

/// Development default used when no base URL is configured.
pub const DEFAULT_API_URL: &str = "http://localhost:8080";

/// A validated base URL for the Projects Hub API.
///
/// Accepts `http` and `https` schemes and joins request paths without
/// doubling slashes.
///
/// # Example
///
/// ```
/// use hub_core::ApiUrl;
///
/// let base = ApiUrl::new("http://localhost:8080").unwrap();
/// assert_eq!(base.endpoint("/api/auth/login"),
///            "http://localhost:8080/api/auth/login");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ApiUrl(Url);

impl ApiUrl {
    /// Create a new API URL from a string, validating the format.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL does not parse or uses a scheme other
    /// than `http`/`https`.
    pub fn new(s: impl AsRef<str>) -> Result<Self, Error> {
        let s = s.as_ref();
        let url = Url::parse(s).map_err(|e| Error::InvalidUrl {
            value: s.to_string(),
            reason: e.to_string(),
        })?;

        match url.scheme() {
            "http" | "https" => {}
            other => {
                return Err(Error::InvalidUrl {
                    value: s.to_string(),
                    reason: format!("unsupported scheme '{other}'"),
                });
            }
        }

        Ok(Self(url))
    }

    /// Base URL from [`API_URL_ENV`], or the development default when unset.
    pub fn from_env() -> Result<Self, Error> {
        match std::env::var(API_URL_ENV) {
            Ok(value) => Self::new(value),
            Err(_) => Self::new(DEFAULT_API_URL),
        }
    }

    /// Full URL for an API request path.
    pub fn endpoint(&self, path: &str) -> String {
        // The URL crate adds a trailing slash to root paths; strip it so
        // `/api/...` paths join cleanly.
        let base = self.0.as_str().trim_end_matches('/');
        format!("{base}{path}")
    }

    /// Returns the base URL as a string.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for ApiUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0.as_str().trim_end_matches('/'))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn joins_paths_without_double_slash() {
        let base = ApiUrl::new("http://localhost:8080").unwrap();
        assert_eq!(base.endpoint("/api/test"), "http://localhost:8080/api/test");

        let with_slash = ApiUrl::new("http://localhost:8080/").unwrap();
        assert_eq!(
            with_slash.endpoint("/api/test"),
            "http://localhost:8080/api/test"
        );
    }

    #[test]
    fn accepts_https() {
        assert!(ApiUrl::new("https://hub.example.com").is_ok());
    }

    #[test]
    fn rejects_non_http_schemes() {
        assert!(matches!(
            ApiUrl::new("ftp://example.com"),
            Err(Error::InvalidUrl { .. })
        ));
    }

    #[test]
    fn rejects_garbage() {
        assert!(ApiUrl::new("not a url").is_err());
    }
}
