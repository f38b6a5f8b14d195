//! JSON HTTP client for the Projects Hub API.

use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, instrument, trace};

use hub_core::{ApiError, ApiUrl, Error, Result, TransportError};

/// HTTP client for Projects Hub requests.
///
/// Wraps a shared `reqwest` client and the configured base URL. It does
/// nothing beyond the network call: success payloads come back as parsed
/// JSON and failures are normalized into [`ApiError`]s.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: reqwest::Client,
    base: ApiUrl,
}

impl ApiClient {
    /// Create a new client for the given base URL.
    pub fn new(base: ApiUrl) -> Self {
        let client = reqwest::Client::builder()
            .user_agent(concat!("hub-client/", env!("CARGO_PKG_VERSION")))
            .build()
            .expect("failed to build HTTP client");

        Self { client, base }
    }

    /// Returns the base URL this client is configured for.
    pub fn base_url(&self) -> &ApiUrl {
        &self.base
    }

    /// POST a JSON body without authentication.
    #[instrument(skip(self, body), fields(base = %self.base))]
    pub async fn post_json<B, R>(&self, path: &str, body: &B) -> Result<R>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let url = self.base.endpoint(path);
        debug!(path, "POST");

        let response = self
            .client
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(transport)?;

        handle_response(response).await
    }

    /// POST a JSON body with a bearer token attached.
    #[instrument(skip(self, body, token), fields(base = %self.base))]
    pub async fn post_json_authed<B, R>(&self, path: &str, body: &B, token: &str) -> Result<R>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let url = self.base.endpoint(path);
        debug!(path, "authenticated POST");

        let response = self
            .client
            .post(&url)
            .json(body)
            .headers(auth_headers(token))
            .send()
            .await
            .map_err(transport)?;

        handle_response(response).await
    }

    /// GET without authentication.
    #[instrument(skip(self), fields(base = %self.base))]
    pub async fn get_json<R>(&self, path: &str) -> Result<R>
    where
        R: DeserializeOwned,
    {
        let url = self.base.endpoint(path);
        debug!(path, "GET");

        let response = self.client.get(&url).send().await.map_err(transport)?;

        handle_response(response).await
    }

    /// GET with a bearer token attached.
    #[instrument(skip(self, token), fields(base = %self.base))]
    pub async fn get_json_authed<R>(&self, path: &str, token: &str) -> Result<R>
    where
        R: DeserializeOwned,
    {
        let url = self.base.endpoint(path);
        debug!(path, "authenticated GET");

        let response = self
            .client
            .get(&url)
            .headers(auth_headers(token))
            .send()
            .await
            .map_err(transport)?;

        handle_response(response).await
    }
}

/// Authorization headers for authenticated requests.
fn auth_headers(token: &str) -> HeaderMap {
    let mut headers = HeaderMap::new();
    let auth_value = format!("Bearer {token}");
    headers.insert(
        AUTHORIZATION,
        HeaderValue::from_str(&auth_value).expect("invalid token characters"),
    );
    headers
}

/// Handle a response: the body is parsed as JSON only when the content type
/// says so, and treated as absent otherwise. Non-2xx statuses become
/// [`ApiError`]s built from the body's `{message, code}` when present.
async fn handle_response<R: DeserializeOwned>(response: reqwest::Response) -> Result<R> {
    let status = response.status();
    let is_json = response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| value.contains("application/json"));
    trace!(status = %status, is_json, "response");

    let payload: Option<serde_json::Value> = if is_json {
        Some(response.json().await.map_err(transport)?)
    } else {
        None
    };

    if !status.is_success() {
        return Err(Error::Api(api_error(status.as_u16(), payload)));
    }

    serde_json::from_value(payload.unwrap_or(serde_json::Value::Null)).map_err(|e| {
        Error::Transport(TransportError::Http {
            message: format!("unexpected response body: {e}"),
        })
    })
}

/// Error body shape the API uses for failures.
#[derive(Debug, Default, serde::Deserialize)]
struct ErrorBody {
    message: Option<String>,
    code: Option<String>,
}

fn api_error(status: u16, payload: Option<serde_json::Value>) -> ApiError {
    let body: ErrorBody = payload
        .and_then(|value| serde_json::from_value(value).ok())
        .unwrap_or_default();

    ApiError::new(
        body.message
            .unwrap_or_else(|| format!("Request failed with status {status}")),
        status,
        body.code.unwrap_or_else(|| "HTTP_ERROR".to_string()),
    )
}

/// Map a reqwest transport failure into the crate's error type.
fn transport(err: reqwest::Error) -> Error {
    let err = if err.is_timeout() {
        TransportError::Timeout
    } else if err.is_connect() {
        TransportError::Connection {
            message: err.to_string(),
        }
    } else {
        TransportError::Http {
            message: err.to_string(),
        }
    };

    Error::Transport(err)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn client_creation() {
        let base = ApiUrl::new("http://localhost:8080").unwrap();
        let client = ApiClient::new(base.clone());
        assert_eq!(client.base_url().as_str(), base.as_str());
    }

    #[test]
    fn api_error_from_body() {
        let err = api_error(401, Some(json!({"message": "expired", "code": "TOKEN_EXPIRED"})));
        assert_eq!(err.to_string(), "[TOKEN_EXPIRED] expired");
        assert_eq!(err.status, 401);
    }

    #[test]
    fn api_error_fallback_without_body() {
        let err = api_error(500, None);
        assert_eq!(err.code, "HTTP_ERROR");
        assert_eq!(err.message, "Request failed with status 500");
    }

    #[test]
    fn api_error_fallback_with_partial_body() {
        let err = api_error(422, Some(json!({"message": "bad input"})));
        assert_eq!(err.message, "bad input");
        assert_eq!(err.code, "HTTP_ERROR");
    }

    #[test]
    fn api_error_fallback_with_non_object_body() {
        let err = api_error(500, Some(json!(["unexpected"])));
        assert_eq!(err.code, "HTTP_ERROR");
    }
}
