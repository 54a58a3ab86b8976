//! Main client implementation.

use std::sync::Arc;
use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE, RETRY_AFTER};
use reqwest::{Method, StatusCode};
use serde::Serialize;
use serde_json::Value;
use url::Url;

use slacky_config::SlackyConfig;

use crate::endpoint::Endpoint;
use crate::error::{Error, Result};
use crate::factory;
use crate::pagination::{Pager, Paginated};
use crate::response::SlackyResponse;

/// Default Slack Web API root.
pub const DEFAULT_BASE_URL: &str = "https://slack.com/api/";

/// Default timeout for requests.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Slack Web API client.
///
/// Cloning is cheap; clones share one connection pool and token.
///
/// # Example
///
/// ```no_run
/// use slacky::SlackyClient;
/// use slacky::endpoint::conversations;
///
/// # async fn example() -> slacky::Result<()> {
/// let client = SlackyClient::builder().token("xoxb-secret").build()?;
///
/// let channel = client
///     .fetch(&conversations::Create::new().name("release-planning"))
///     .await?;
/// println!("created #{}", channel.name().await?);
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct SlackyClient {
    /// Inner shared state.
    inner: Arc<ClientInner>,
}

/// Inner client state (shared across clones).
struct ClientInner {
    /// HTTP client.
    http: reqwest::Client,
    /// Base URL for API requests.
    base_url: Url,
    /// Request timeout.
    timeout: Duration,
}

impl std::fmt::Debug for SlackyClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SlackyClient")
            .field("base_url", &self.inner.base_url.as_str())
            .finish_non_exhaustive()
    }
}

impl SlackyClient {
    /// Create a new client builder.
    pub fn builder() -> ClientBuilder {
        ClientBuilder::new()
    }

    /// Create a client for the public Slack API with the given token.
    pub fn new(token: impl Into<String>) -> Result<Self> {
        Self::builder().token(token).build()
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &Url {
        &self.inner.base_url
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Endpoint dispatch
    // ─────────────────────────────────────────────────────────────────────────

    /// Send a typed endpoint and return the raw envelope.
    pub async fn send<E: Endpoint>(&self, endpoint: &E) -> Result<SlackyResponse> {
        endpoint.validate()?;
        self.call(E::METHOD, E::NAME, endpoint).await
    }

    /// Send a typed endpoint and decode its object.
    pub async fn fetch<E: Endpoint>(&self, endpoint: &E) -> Result<E::Object> {
        let response = self.send(endpoint).await?;
        endpoint.object(self, &response)
    }

    /// Iterate the pages of a list endpoint.
    pub fn paginate<E: Paginated>(&self, endpoint: E) -> Pager<E> {
        Pager::new(self.clone(), endpoint)
    }

    /// Collect the items of every page of a list endpoint.
    pub async fn fetch_all<E: Paginated>(&self, endpoint: E) -> Result<Vec<E::Item>> {
        let mut pager = self.paginate(endpoint);
        let mut items = Vec::new();
        while let Some(page) = pager.next_page().await? {
            items.extend(page.items);
        }
        Ok(items)
    }

    /// Call a Slack method by name, looking its HTTP verb up in the registry.
    pub async fn call_named<P>(&self, name: &str, params: &P) -> Result<SlackyResponse>
    where
        P: Serialize + ?Sized,
    {
        let descriptor =
            factory::descriptor(name).ok_or_else(|| Error::UnknownEndpoint(name.to_string()))?;
        self.call(descriptor.method(), descriptor.name, params).await
    }

    /// Call any Slack method.
    ///
    /// GET parameters are sent as a query string, everything else as a JSON
    /// body.
    pub async fn call<P>(&self, method: Method, name: &str, params: &P) -> Result<SlackyResponse>
    where
        P: Serialize + ?Sized,
    {
        let url = self.url(name)?;
        tracing::debug!(method = name, verb = %method, "Calling Slack method");

        let request = self
            .inner
            .http
            .request(method.clone(), url)
            .timeout(self.inner.timeout);
        let request = if method == Method::GET {
            request.query(params)
        } else {
            request
                .header(CONTENT_TYPE, "application/json; charset=utf-8")
                .json(params)
        };

        let response = request.send().await?;
        self.handle_response(name, response).await
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Internal HTTP methods
    // ─────────────────────────────────────────────────────────────────────────

    /// Build a URL for a Slack method.
    pub(crate) fn url(&self, name: &str) -> Result<Url> {
        let name = name.trim_start_matches('/');
        self.inner.base_url.join(name).map_err(Error::from)
    }

    /// Handle a response, turning HTTP and Slack failures into errors.
    async fn handle_response(
        &self,
        name: &str,
        response: reqwest::Response,
    ) -> Result<SlackyResponse> {
        let status = response.status();

        if status == StatusCode::TOO_MANY_REQUESTS {
            let retry_after = response
                .headers()
                .get(RETRY_AFTER)
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.trim().parse::<u64>().ok())
                .map(Duration::from_secs);
            tracing::warn!(method = name, ?retry_after, "Slack rate limited the request");
            return Err(Error::RateLimited {
                method: name.to_string(),
                retry_after,
            });
        }

        if !status.is_success() {
            return Err(Error::Status {
                method: name.to_string(),
                status: status.as_u16(),
            });
        }

        let body: Value = response.json().await?;
        let response = SlackyResponse::new(status.as_u16(), body);

        if !response.is_ok() {
            let error = response.error().unwrap_or("unknown_error").to_string();
            tracing::debug!(method = name, %error, "Slack method failed");
            return Err(Error::Api {
                method: name.to_string(),
                error,
            });
        }

        if let Some(warning) = response.warning() {
            tracing::warn!(method = name, %warning, "Slack returned a warning");
        }

        Ok(response)
    }
}

/// Builder for creating a SlackyClient.
#[derive(Debug)]
pub struct ClientBuilder {
    base_url: Option<String>,
    token: Option<String>,
    timeout: Duration,
    user_agent: Option<String>,
}

impl ClientBuilder {
    /// Create a new builder with defaults.
    pub fn new() -> Self {
        Self {
            base_url: None,
            token: None,
            timeout: DEFAULT_TIMEOUT,
            user_agent: None,
        }
    }

    /// Start from a loaded configuration.
    pub fn from_config(config: &SlackyConfig) -> Self {
        let mut builder = Self::new();
        builder.token = config.token.clone();
        builder.base_url = config.base_url.clone();
        builder.user_agent = config.user_agent.clone();
        if let Some(secs) = config.timeout_secs {
            builder.timeout = Duration::from_secs(secs);
        }
        builder
    }

    /// Set the API root (defaults to the public Slack API).
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Set the bot or user token.
    pub fn token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Set the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set a custom user agent.
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = Some(agent.into());
        self
    }

    /// Build the client.
    pub fn build(self) -> Result<SlackyClient> {
        let token = self
            .token
            .filter(|t| !t.is_empty())
            .ok_or_else(|| Error::Config("token is required".to_string()))?;

        // Parse and normalize base URL
        let base_url = self.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL);
        let mut base_url = Url::parse(base_url)?;
        if !base_url.path().ends_with('/') {
            base_url.set_path(&format!("{}/", base_url.path()));
        }

        let mut headers = HeaderMap::new();
        let mut auth = HeaderValue::from_str(&format!("Bearer {}", token))
            .map_err(|_| Error::Config("Invalid token".to_string()))?;
        auth.set_sensitive(true);
        headers.insert(AUTHORIZATION, auth);

        let user_agent = self
            .user_agent
            .unwrap_or_else(|| format!("slacky/{}", env!("CARGO_PKG_VERSION")));

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .user_agent(user_agent)
            .build()?;

        Ok(SlackyClient {
            inner: Arc::new(ClientInner {
                http,
                base_url,
                timeout: self.timeout,
            }),
        })
    }
}

impl Default for ClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}
