//! Construction of the single outbound request.

use http::header::{AUTHORIZATION, CONTENT_TYPE};
use http::{HeaderMap, HeaderValue, Method};
use url::Url;

use super::{AlertError, ConfigurationError};
use crate::transport::{ConnectionOptions, HttpRequest};

/// A validated alert destination: a non-blank, absolute HTTP(S) URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetUrl(Url);

impl TargetUrl {
    /// Parses and validates a target URL.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError::MissingUrl`] for blank input and
    /// [`ConfigurationError::InvalidUrl`] for anything that is not an
    /// absolute `http`/`https` URI.
    pub fn parse(raw: &str) -> Result<Self, ConfigurationError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(ConfigurationError::MissingUrl);
        }

        let url = Url::parse(trimmed).map_err(|e| ConfigurationError::InvalidUrl {
            url: raw.to_string(),
            reason: e.to_string(),
        })?;

        if !matches!(url.scheme(), "http" | "https") {
            return Err(ConfigurationError::InvalidUrl {
                url: raw.to_string(),
                reason: format!("unsupported scheme '{}'", url.scheme()),
            });
        }

        Ok(Self(url))
    }

    /// Returns the underlying URL.
    #[must_use]
    pub const fn as_url(&self) -> &Url {
        &self.0
    }
}

/// The one request an invocation sends.
///
/// Immutable once built: always POST, always `Content-Type:
/// application/json`, body kept byte-for-byte as rendered.
#[derive(Debug, Clone)]
pub struct AlertRequest {
    url: Url,
    headers: HeaderMap,
    body: String,
}

impl AlertRequest {
    /// Builds the request.
    ///
    /// Headers from `options` are layered first, then the JSON content type
    /// is set over them. A missing body is sent empty.
    ///
    /// # Errors
    ///
    /// Returns [`AlertError::Configuration`] if `url` is not a valid target
    /// or the configured credentials cannot form a header value.
    pub fn build(
        url: &str,
        options: &ConnectionOptions,
        body: Option<String>,
    ) -> Result<Self, AlertError> {
        let url = TargetUrl::parse(url)?;
        let mut headers =
            options
                .request_headers()
                .map_err(|e| ConfigurationError::InvalidHeader {
                    name: AUTHORIZATION.to_string(),
                    reason: e.to_string(),
                })?;
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        Ok(Self {
            url: url.0,
            headers,
            body: body.unwrap_or_default(),
        })
    }

    /// Returns the HTTP method, always POST.
    #[must_use]
    pub const fn method(&self) -> Method {
        Method::POST
    }

    /// Returns the target URL.
    #[must_use]
    pub const fn url(&self) -> &Url {
        &self.url
    }

    /// Returns the request headers.
    #[must_use]
    pub const fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Returns the request body.
    #[must_use]
    pub fn body(&self) -> &str {
        &self.body
    }

    /// Converts into the wire request handed to the transport.
    #[must_use]
    pub fn into_http_request(self) -> HttpRequest {
        let mut request = HttpRequest::post(self.url).with_body(self.body.into_bytes());
        request.headers = self.headers;
        request
    }
}
