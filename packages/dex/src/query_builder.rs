use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, REFERER};

use crate::{error::QueryError, QueryClient};

/// Default REST endpoint of a local node.
pub const DEFAULT_REST_URL: &str = "http://localhost:1317";

/// Default route prefix of the dex module's query service.
pub const DEFAULT_ROUTE_PREFIX: &str = "interchange-nel/dex";

/// Used to build a [crate::QueryClient].
#[derive(Clone, Debug)]
pub struct QueryClientBuilder {
    rest_url: String,

    // Values with defaults
    route_prefix: Option<String>,
    request_timeout: Option<Duration>,
    referer_header: Option<String>,
}

impl Default for QueryClientBuilder {
    fn default() -> Self {
        Self::new(DEFAULT_REST_URL)
    }
}

impl QueryClientBuilder {
    /// Create a new [QueryClientBuilder] with default options where possible.
    pub fn new(rest_url: impl Into<String>) -> QueryClientBuilder {
        Self {
            rest_url: rest_url.into(),
            route_prefix: None,
            request_timeout: None,
            referer_header: None,
        }
    }

    /// REST endpoint of the node
    pub fn rest_url(&self) -> &str {
        self.rest_url.as_ref()
    }

    /// See [Self::rest_url]
    pub fn set_rest_url(&mut self, rest_url: impl Into<String>) {
        self.rest_url = rest_url.into();
    }

    /// Path segments placed before every query route
    ///
    /// Defaults to [DEFAULT_ROUTE_PREFIX]
    pub fn route_prefix(&self) -> &str {
        self.route_prefix.as_deref().unwrap_or(DEFAULT_ROUTE_PREFIX)
    }

    /// See [Self::route_prefix]
    pub fn set_route_prefix(&mut self, route_prefix: Option<String>) {
        self.route_prefix = route_prefix;
    }

    /// Timeout for a single query
    ///
    /// Defaults to 5 seconds
    pub fn request_timeout(&self) -> Duration {
        self.request_timeout.unwrap_or_else(|| Duration::from_secs(5))
    }

    /// See [Self::request_timeout]
    pub fn set_request_timeout(&mut self, request_timeout: Option<Duration>) {
        self.request_timeout = request_timeout;
    }

    /// Referrer header sent to the server
    pub fn referer_header(&self) -> Option<&str> {
        self.referer_header.as_deref()
    }

    /// See [Self::referer_header]
    pub fn set_referer_header(&mut self, referer_header: Option<String>) {
        self.referer_header = referer_header;
    }

    /// Base URL of the module's routes, with the prefix appended.
    pub(crate) fn module_url(&self) -> Result<reqwest::Url, QueryError> {
        let invalid = |reason: String| QueryError::InvalidUrl {
            url: self.rest_url.clone(),
            reason,
        };
        let mut url = reqwest::Url::parse(&self.rest_url).map_err(|e| invalid(e.to_string()))?;
        url.path_segments_mut()
            .map_err(|()| invalid("URL cannot be a base".to_owned()))?
            .pop_if_empty()
            .extend(self.route_prefix().split('/').filter(|s| !s.is_empty()));
        Ok(url)
    }

    pub fn build(self) -> Result<QueryClient, QueryError> {
        let mut headers = HeaderMap::new();
        if let Some(referer) = self.referer_header() {
            let value = HeaderValue::from_str(referer).map_err(|e| QueryError::InvalidUrl {
                url: referer.to_owned(),
                reason: format!("invalid referer header: {e}"),
            })?;
            headers.insert(REFERER, value);
        }
        let client = reqwest::Client::builder()
            .timeout(self.request_timeout())
            .default_headers(headers)
            .build()
            .map_err(QueryError::Builder)?;
        let base = self.module_url()?;
        tracing::debug!("Dex query client using {base}");
        Ok(QueryClient::new(client, base))
    }
}
