//! HTTP client abstraction for testability

use std::future::Future;
use std::time::Duration;

use tracing::{debug, trace, warn};

use super::error::SourceError;

/// Default request timeout.
pub(crate) const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Trait for asynchronous HTTP client operations.
///
/// Every remote collaborator of the engine (feature service, raster query,
/// submission endpoint, device-local location endpoint) goes through this
/// trait so tests can substitute a scripted client.
pub trait AsyncHttpClient: Send + Sync {
    /// Performs an async HTTP GET request.
    ///
    /// # Returns
    ///
    /// The response body as bytes or an error.
    fn get(&self, url: &str) -> impl Future<Output = Result<Vec<u8>, SourceError>> + Send;

    /// Performs an async HTTP POST request with JSON body.
    ///
    /// # Arguments
    ///
    /// * `url` - The URL to request
    /// * `json_body` - JSON body as a string
    fn post_json(
        &self,
        url: &str,
        json_body: &str,
    ) -> impl Future<Output = Result<Vec<u8>, SourceError>> + Send;
}

/// HTTP client implementation using reqwest.
#[derive(Clone)]
pub struct ReqwestClient {
    client: reqwest::Client,
}

impl ReqwestClient {
    /// Creates a new ReqwestClient with default configuration.
    pub fn new() -> Result<Self, SourceError> {
        Self::with_timeout(DEFAULT_TIMEOUT_SECS)
    }

    /// Creates a new ReqwestClient with custom timeout.
    pub fn with_timeout(timeout_secs: u64) -> Result<Self, SourceError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .pool_idle_timeout(Duration::from_secs(90))
            .tcp_nodelay(true)
            .build()
            .map_err(|e| SourceError::Http(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { client })
    }

    async fn read_body(response: reqwest::Response, url: &str) -> Result<Vec<u8>, SourceError> {
        let status = response.status();
        if !status.is_success() {
            warn!(url = url, status = status.as_u16(), "HTTP error status");
            return Err(SourceError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        match response.bytes().await {
            Ok(bytes) => {
                trace!(url = url, bytes = bytes.len(), "HTTP response body read");
                Ok(bytes.to_vec())
            }
            Err(e) => {
                warn!(url = url, error = %e, "Failed to read response body");
                Err(SourceError::Http(format!("Failed to read response: {}", e)))
            }
        }
    }
}

impl AsyncHttpClient for ReqwestClient {
    async fn get(&self, url: &str) -> Result<Vec<u8>, SourceError> {
        trace!(url = url, "HTTP GET request starting");

        let response = match self.client.get(url).send().await {
            Ok(resp) => {
                debug!(
                    url = url,
                    status = resp.status().as_u16(),
                    "HTTP response received"
                );
                resp
            }
            Err(e) => {
                warn!(
                    url = url,
                    error = %e,
                    is_connect = e.is_connect(),
                    is_timeout = e.is_timeout(),
                    "HTTP request failed"
                );
                return Err(SourceError::Http(format!("Request failed: {}", e)));
            }
        };

        Self::read_body(response, url).await
    }

    async fn post_json(&self, url: &str, json_body: &str) -> Result<Vec<u8>, SourceError> {
        let response = self
            .client
            .post(url)
            .header("Content-Type", "application/json")
            .body(json_body.to_string())
            .send()
            .await
            .map_err(|e| SourceError::Http(format!("POST request failed: {}", e)))?;

        Self::read_body(response, url).await
    }
}

#[cfg(test)]
pub mod tests {
    use super::*;
    use parking_lot::Mutex;
    use std::sync::Arc;

    /// Scripted async HTTP client for testing.
    ///
    /// Responses are matched by URL substring, first route wins. Unmatched
    /// URLs answer with a 404 status error. Every request is recorded.
    #[derive(Clone, Default)]
    pub struct MockHttpClient {
        routes: Arc<Mutex<Vec<(String, Result<Vec<u8>, SourceError>)>>>,
        requests: Arc<Mutex<Vec<String>>>,
        posts: Arc<Mutex<Vec<(String, String)>>>,
    }

    impl MockHttpClient {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn route(&self, pattern: &str, response: Result<Vec<u8>, SourceError>) -> &Self {
            self.routes.lock().push((pattern.to_string(), response));
            self
        }

        pub fn route_json(&self, pattern: &str, body: serde_json::Value) -> &Self {
            self.route(pattern, Ok(body.to_string().into_bytes()))
        }

        pub fn requests(&self) -> Vec<String> {
            self.requests.lock().clone()
        }

        pub fn request_count(&self, pattern: &str) -> usize {
            self.requests
                .lock()
                .iter()
                .filter(|u| u.contains(pattern))
                .count()
        }

        pub fn posts(&self) -> Vec<(String, String)> {
            self.posts.lock().clone()
        }

        fn respond(&self, url: &str) -> Result<Vec<u8>, SourceError> {
            self.routes
                .lock()
                .iter()
                .find(|(pattern, _)| url.contains(pattern.as_str()))
                .map(|(_, response)| response.clone())
                .unwrap_or_else(|| {
                    Err(SourceError::Status {
                        status: 404,
                        url: url.to_string(),
                    })
                })
        }
    }

    impl AsyncHttpClient for MockHttpClient {
        async fn get(&self, url: &str) -> Result<Vec<u8>, SourceError> {
            self.requests.lock().push(url.to_string());
            self.respond(url)
        }

        async fn post_json(&self, url: &str, json_body: &str) -> Result<Vec<u8>, SourceError> {
            self.requests.lock().push(url.to_string());
            self.posts
                .lock()
                .push((url.to_string(), json_body.to_string()));
            self.respond(url)
        }
    }

    #[tokio::test]
    async fn test_mock_client_routes_by_substring() {
        let mock = MockHttpClient::new();
        mock.route("settlement", Ok(vec![1, 2, 3]));

        let result = mock.get("http://example.com/ows?typeName=settlement_1").await;
        assert_eq!(result.unwrap(), vec![1, 2, 3]);
        assert_eq!(mock.request_count("settlement"), 1);
    }

    #[tokio::test]
    async fn test_mock_client_unmatched_is_404() {
        let mock = MockHttpClient::new();
        let result = mock.get("http://example.com/missing").await;
        assert!(matches!(result, Err(SourceError::Status { status: 404, .. })));
    }

    #[test]
    fn test_reqwest_client_builds() {
        assert!(ReqwestClient::with_timeout(5).is_ok());
    }
}
