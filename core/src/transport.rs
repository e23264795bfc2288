//! Executes `HttpRequest` values over the network.
//!
//! `Transport` is the seam between the pure client and real I/O. Tests
//! substitute their own implementation; `HttpTransport` is the default,
//! backed by reqwest.

use std::future::Future;
use std::time::Duration;

use tracing::warn;

use crate::error::TransportError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};

/// Performs one HTTP round trip.
///
/// An `Err` means no response was obtained at all. Any status the server
/// did send, including 4xx and 5xx, is an `Ok`.
pub trait Transport: Send + Sync {
    fn execute(
        &self,
        request: HttpRequest,
    ) -> impl Future<Output = Result<HttpResponse, TransportError>> + Send;
}

/// reqwest-backed transport.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    timeout: Duration,
}

impl HttpTransport {
    pub fn new(timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { client, timeout })
    }
}

impl Transport for HttpTransport {
    fn execute(
        &self,
        request: HttpRequest,
    ) -> impl Future<Output = Result<HttpResponse, TransportError>> + Send {
        async move {
            let method = match request.method {
                HttpMethod::Post => reqwest::Method::POST,
            };
            let mut builder = self.client.request(method, &request.url);
            for (name, value) in &request.headers {
                builder = builder.header(name.as_str(), value.as_str());
            }

            let response = builder.body(request.body).send().await.map_err(|e| {
                if e.is_timeout() {
                    TransportError::Timeout(self.timeout)
                } else {
                    TransportError::Connect(e.to_string())
                }
            })?;

            let status = response.status().as_u16();
            let headers = response
                .headers()
                .iter()
                .filter_map(|(name, value)| {
                    value
                        .to_str()
                        .ok()
                        .map(|v| (name.as_str().to_string(), v.to_string()))
                })
                .collect();
            // A status arrived, so a broken body still counts as a response.
            let body = match response.text().await {
                Ok(body) => body,
                Err(e) => {
                    warn!(url = %request.url, status, error = %e, "failed to read response body");
                    String::new()
                }
            };

            Ok(HttpResponse {
                status,
                headers,
                body,
            })
        }
    }
}
