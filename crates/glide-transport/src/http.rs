//! HTTP request plumbing

use reqwest::header::{HeaderName, HeaderValue};
use reqwest::{Client, Request};
use std::collections::HashMap;
use std::future::Future;
use std::time::Duration;
use url::Url;

use crate::error::TransportError;
use crate::Result;

/// Header marking the request as a programmatic fetch, so servers can
/// answer with a fragment instead of a full page.
pub const REQUESTED_WITH_HEADER: &str = "X-Requested-With";
pub const REQUESTED_WITH_VALUE: &str = "XMLHttpRequest";

/// Per-request parameters. Everything is optional; an empty value is a
/// plain GET with only the marker header.
#[derive(Debug, Clone, Default)]
pub struct RequestParams {
    /// Flat key-value body; presence switches the request to POST with an
    /// `application/x-www-form-urlencoded` body.
    pub data: Option<HashMap<String, String>>,
    /// Caller headers, overlaid on the defaults (caller wins).
    pub headers: HashMap<String, String>,
    /// Send the request with the cookie-bearing client.
    pub credentials: bool,
    /// Abort the request when the deadline elapses.
    pub timeout: Option<Duration>,
}

/// Issues one request per call. Resolves exactly once: a body on success,
/// an error otherwise — never both, never twice.
pub trait Transport {
    fn send(&self, url: &Url, params: RequestParams) -> impl Future<Output = Result<String>> + Send;
}

/// The reqwest-backed transport.
pub struct HttpTransport {
    plain: Client,
    credentialed: Client,
}

impl HttpTransport {
    /// Build the underlying clients. A build failure means the
    /// environment has no usable HTTP stack and is reported as
    /// `Unsupported` instead of being swallowed.
    pub fn new() -> Result<Self> {
        let plain = Client::builder()
            .build()
            .map_err(|e| TransportError::Unsupported(e.to_string()))?;
        let credentialed = Client::builder()
            .cookie_store(true)
            .build()
            .map_err(|e| TransportError::Unsupported(e.to_string()))?;

        Ok(Self { plain, credentialed })
    }

    fn client(&self, params: &RequestParams) -> &Client {
        if params.credentials {
            &self.credentialed
        } else {
            &self.plain
        }
    }

    /// Assemble the request: method from data presence, marker header
    /// first, caller headers overlaid on top.
    fn build_request(&self, url: &Url, params: &RequestParams) -> Result<Request> {
        let client = self.client(params);

        let builder = match &params.data {
            Some(data) => client.post(url.clone()).form(data),
            None => client.get(url.clone()),
        };

        let mut request = builder
            .header(REQUESTED_WITH_HEADER, REQUESTED_WITH_VALUE)
            .build()
            .map_err(|e| TransportError::Network(e.to_string()))?;

        let headers = request.headers_mut();
        for (name, value) in &params.headers {
            let name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|e| TransportError::Network(format!("invalid header name: {}", e)))?;
            let value = HeaderValue::from_str(value)
                .map_err(|e| TransportError::Network(format!("invalid header value: {}", e)))?;
            headers.insert(name, value);
        }

        Ok(request)
    }
}

impl Transport for HttpTransport {
    async fn send(&self, url: &Url, params: RequestParams) -> Result<String> {
        let request = self.build_request(url, &params)?;
        let client = self.client(&params).clone();

        tracing::debug!(url = %url, method = %request.method(), "Sending request");

        let exchange = async move {
            let response = client.execute(request).await.map_err(map_reqwest_error)?;
            let status = response.status().as_u16();

            if !is_success_status(status) {
                tracing::debug!(url = %url, status, "Response outside success window");
                return Err(TransportError::Status(status));
            }

            response.text().await.map_err(map_reqwest_error)
        };

        match params.timeout {
            // Dropping the exchange future aborts the in-flight request,
            // so a timed-out request can never also resolve successfully.
            Some(limit) => tokio::time::timeout(limit, exchange)
                .await
                .map_err(|_| TransportError::Timeout)?,
            None => exchange.await,
        }
    }
}

/// 200/201/304 count as success; everything else is an error with no
/// payload handed to the caller.
pub(crate) fn is_success_status(status: u16) -> bool {
    matches!(status, 200 | 201 | 304)
}

fn map_reqwest_error(err: reqwest::Error) -> TransportError {
    if err.is_timeout() {
        TransportError::Timeout
    } else {
        TransportError::Network(err.to_string())
    }
}
