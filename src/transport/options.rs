//! Connection options shared by every alert invocation.
//!
//! [`ConnectionOptions`] is built once at process start from defaults plus
//! caller overrides, then passed by reference into each invocation. It never
//! performs I/O.

use std::time::Duration;

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use http::header::{AUTHORIZATION, InvalidHeaderValue};
use http::{HeaderMap, HeaderValue};
use url::Url;

/// Credentials attached to every outbound request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Auth {
    /// HTTP basic authentication.
    Basic {
        /// User name
        username: String,
        /// Password (may be absent)
        password: Option<String>,
    },
    /// Bearer token authentication.
    Bearer(String),
}

impl Auth {
    /// Returns the `Authorization` header value for these credentials.
    ///
    /// The value is marked sensitive so it is redacted from debug output.
    ///
    /// # Errors
    ///
    /// Returns an error if the credentials contain characters that are not
    /// allowed in a header value.
    pub fn header_value(&self) -> Result<HeaderValue, InvalidHeaderValue> {
        let raw = match self {
            Self::Basic { username, password } => {
                let pair = format!("{username}:{}", password.as_deref().unwrap_or_default());
                format!("Basic {}", BASE64.encode(pair))
            }
            Self::Bearer(token) => format!("Bearer {token}"),
        };

        let mut value = HeaderValue::from_str(&raw)?;
        value.set_sensitive(true);
        Ok(value)
    }
}

/// Proxy used for outbound requests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProxyOptions {
    /// Proxy URL (`http://`, `https://` or `socks5://`)
    pub url: Url,
    /// Optional proxy user name
    pub username: Option<String>,
    /// Optional proxy password
    pub password: Option<String>,
}

impl ProxyOptions {
    /// Creates proxy options without credentials.
    #[must_use]
    pub const fn new(url: Url) -> Self {
        Self {
            url,
            username: None,
            password: None,
        }
    }

    /// Sets proxy credentials.
    #[must_use]
    pub fn with_credentials(mut self, username: impl Into<String>, password: Option<String>) -> Self {
        self.username = Some(username.into());
        self.password = password;
        self
    }
}

/// Transport-level options applied to each alert request.
///
/// # Defaults
///
/// - `connect_timeout`: 10 seconds
/// - `request_timeout`: 30 seconds
/// - no proxy, no credentials, no custom headers
/// - `user_agent`: `pagerduty-alert/<version>`
#[derive(Debug, Clone, PartialEq)]
pub struct ConnectionOptions {
    /// Timeout for establishing the TCP/TLS connection.
    pub connect_timeout: Duration,
    /// Timeout for the whole request, from send to fully-read body.
    pub request_timeout: Duration,
    /// Optional outbound proxy.
    pub proxy: Option<ProxyOptions>,
    /// Optional credentials, materialized as an `Authorization` header.
    pub auth: Option<Auth>,
    /// Custom headers sent with every request.
    pub headers: HeaderMap,
    /// `User-Agent` sent by the transport client.
    pub user_agent: String,
}

impl ConnectionOptions {
    /// Default connect timeout (10 seconds).
    pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

    /// Default request timeout (30 seconds).
    pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

    /// Creates options holding the default values.
    #[must_use]
    pub fn new() -> Self {
        Self {
            connect_timeout: Self::DEFAULT_CONNECT_TIMEOUT,
            request_timeout: Self::DEFAULT_REQUEST_TIMEOUT,
            proxy: None,
            auth: None,
            headers: HeaderMap::new(),
            user_agent: default_user_agent(),
        }
    }

    /// Merges caller overrides over these options.
    ///
    /// Every value present in `overrides` replaces the current one. Custom
    /// headers are merged per name, the override winning on conflict.
    #[must_use]
    pub fn with_overrides(mut self, overrides: ConnectionOverrides) -> Self {
        if let Some(timeout) = overrides.connect_timeout {
            self.connect_timeout = timeout;
        }
        if let Some(timeout) = overrides.request_timeout {
            self.request_timeout = timeout;
        }
        if overrides.proxy.is_some() {
            self.proxy = overrides.proxy;
        }
        if overrides.auth.is_some() {
            self.auth = overrides.auth;
        }
        if let Some(user_agent) = overrides.user_agent {
            self.user_agent = user_agent;
        }

        let mut last_name = None;
        for (name, value) in overrides.headers {
            // HeaderMap iteration yields `None` for repeated values of the same name
            if let Some(name) = name {
                self.headers.insert(name.clone(), value);
                last_name = Some(name);
            } else if let Some(ref name) = last_name {
                self.headers.append(name.clone(), value);
            }
        }

        self
    }

    /// Returns the headers every request carries: custom headers first,
    /// then the `Authorization` header derived from [`Self::auth`].
    ///
    /// # Errors
    ///
    /// Returns an error if the credentials cannot form a header value.
    pub fn request_headers(&self) -> Result<HeaderMap, InvalidHeaderValue> {
        let mut headers = self.headers.clone();
        if let Some(ref auth) = self.auth {
            headers.insert(AUTHORIZATION, auth.header_value()?);
        }
        Ok(headers)
    }
}

impl Default for ConnectionOptions {
    fn default() -> Self {
        Self::new()
    }
}

/// Caller-supplied values layered over [`ConnectionOptions`] defaults.
///
/// Every field is optional; absent values leave the base untouched.
#[derive(Debug, Clone, Default)]
pub struct ConnectionOverrides {
    /// Connect timeout override
    pub connect_timeout: Option<Duration>,
    /// Request timeout override
    pub request_timeout: Option<Duration>,
    /// Proxy override
    pub proxy: Option<ProxyOptions>,
    /// Credentials override
    pub auth: Option<Auth>,
    /// Headers merged over the base headers
    pub headers: HeaderMap,
    /// User agent override
    pub user_agent: Option<String>,
}

fn default_user_agent() -> String {
    format!("{}/{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"))
}
