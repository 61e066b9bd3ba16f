//! Request/response transport abstraction for the part-exchange endpoint.
//!
//! The controllers only ever see [`Response`] values coming back from a
//! [`Transport`], so tests drive them with scripted in-memory transports and
//! production code uses [`HttpTransport`] over reqwest.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;

use crate::error::Result;

/// A completed request/response exchange, flattened to what the protocol
/// inspects: status code, headers, and a text body.
#[derive(Debug, Clone)]
pub struct Response {
    status: u16,
    headers: HashMap<String, String>,
    body: String,
}

impl Response {
    /// Creates a response from its parts. Header names are stored
    /// case-insensitively.
    pub fn new<I, K, V>(status: u16, headers: I, body: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        Self {
            status,
            headers: headers
                .into_iter()
                .map(|(k, v)| (k.as_ref().to_ascii_lowercase(), v.into()))
                .collect(),
            body: body.into(),
        }
    }

    /// Status code of the exchange.
    #[must_use]
    pub const fn status(&self) -> u16 {
        self.status
    }

    /// Whether the status code is in the 2xx range.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.status >= 200 && self.status < 300
    }

    /// Looks up a header by name, ignoring case.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_ascii_lowercase())
            .map(String::as_str)
    }

    /// The response body text.
    #[must_use]
    pub fn body(&self) -> &str {
        &self.body
    }

    /// Consumes the response and returns the body text.
    #[must_use]
    pub fn into_body(self) -> String {
        self.body
    }
}

/// Abstraction over the blocking request/response primitive.
///
/// Both methods resolve only once the exchange has fully completed, which is
/// what keeps part transfers strictly sequential: the controllers `await`
/// each call before preparing the next part.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Issues a GET for the given path and query.
    async fn get(&self, path_and_query: &str) -> Result<Response>;

    /// Issues a POST with an optional text body.
    async fn post(&self, path_and_query: &str, body: Option<String>) -> Result<Response>;
}

/// Default transport over a pooled reqwest client and a fixed base URL.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    base_url: String,
}

impl HttpTransport {
    /// Creates a transport talking to the given base URL with a freshly
    /// configured connection pool.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be built.
    pub fn new(base_url: impl Into<String>) -> reqwest::Result<Self> {
        let client = reqwest::Client::builder()
            .pool_idle_timeout(Duration::from_secs(60))
            .pool_max_idle_per_host(8)
            .tcp_keepalive(Duration::from_secs(30))
            .build()?;
        Ok(Self::with_client(client, base_url))
    }

    /// Creates a transport reusing an existing client.
    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self { client, base_url }
    }

    /// The base URL requests are issued against.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path_and_query: &str) -> String {
        format!("{}{path_and_query}", self.base_url)
    }

    async fn flatten(response: reqwest::Response) -> Result<Response> {
        let status = response.status().as_u16();
        let headers: Vec<(String, String)> = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|v| (name.as_str().to_string(), v.to_string()))
            })
            .collect();
        let body = response.text().await?;
        Ok(Response::new(status, headers, body))
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn get(&self, path_and_query: &str) -> Result<Response> {
        let response = self.client.get(self.url(path_and_query)).send().await?;
        Self::flatten(response).await
    }

    async fn post(&self, path_and_query: &str, body: Option<String>) -> Result<Response> {
        let mut request = self.client.post(self.url(path_and_query));
        if let Some(body) = body {
            request = request.body(body);
        }
        let response = request.send().await?;
        Self::flatten(response).await
    }
}
