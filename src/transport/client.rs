//! Production HTTP client implementation using reqwest.

use super::{ConnectionOptions, Connector, HttpClient, HttpError, HttpRequest, HttpResponse};

/// Production HTTP client using reqwest.
///
/// This is a thin wrapper around `reqwest::Client` that implements
/// the [`HttpClient`] trait.
///
/// # Example
///
/// ```no_run
/// use pagerduty_alert::transport::{ConnectionOptions, HttpClient, HttpRequest, ReqwestClient};
/// use url::Url;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let client = ReqwestClient::from_options(&ConnectionOptions::new())?;
/// let url = Url::parse("https://events.pagerduty.com/v2/enqueue")?;
/// let request = HttpRequest::post(url).with_body(b"{}".to_vec());
/// let response = client.request(request).await?;
/// println!("Status: {}", response.status);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct ReqwestClient {
    inner: reqwest::Client,
}

impl ReqwestClient {
    /// Creates an HTTP client configured from connection options.
    ///
    /// Applies timeouts, user agent and proxy. Headers and credentials are
    /// carried per request, not baked into the client. Proxy environment
    /// variables are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::Build`] if the proxy is rejected or the TLS
    /// backend cannot be initialized.
    pub fn from_options(options: &ConnectionOptions) -> Result<Self, HttpError> {
        let mut builder = reqwest::Client::builder()
            .connect_timeout(options.connect_timeout)
            .timeout(options.request_timeout)
            .user_agent(options.user_agent.as_str());

        if let Some(ref proxy) = options.proxy {
            let mut reqwest_proxy = reqwest::Proxy::all(proxy.url.as_str())
                .map_err(|e| HttpError::Build(Box::new(e)))?;
            if let Some(ref username) = proxy.username {
                reqwest_proxy =
                    reqwest_proxy.basic_auth(username, proxy.password.as_deref().unwrap_or_default());
            }
            builder = builder.proxy(reqwest_proxy);
        } else {
            // Only the configured proxy is honored, never the environment's
            builder = builder.no_proxy();
        }

        let inner = builder.build().map_err(|e| HttpError::Build(Box::new(e)))?;
        Ok(Self { inner })
    }
}

impl HttpClient for ReqwestClient {
    async fn request(&self, req: HttpRequest) -> Result<HttpResponse, HttpError> {
        let mut builder = self.inner.request(req.method, req.url.as_str());

        for (name, value) in &req.headers {
            builder = builder.header(name, value);
        }

        if let Some(body) = req.body {
            builder = builder.body(body);
        }

        let response = builder.send().await.map_err(map_send_error)?;

        let status = response.status();
        let headers = response.headers().clone();
        let body = response
            .bytes()
            .await
            .map_err(map_send_error)?
            .to_vec();

        Ok(HttpResponse::new(status, headers, body))
    }
}

fn map_send_error(e: reqwest::Error) -> HttpError {
    if e.is_timeout() {
        HttpError::Timeout
    } else if e.is_builder() {
        HttpError::InvalidUrl(e.to_string())
    } else {
        HttpError::Connection(Box::new(e))
    }
}

/// Connector producing a fresh [`ReqwestClient`] per invocation.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReqwestConnector;

impl Connector for ReqwestConnector {
    type Client = ReqwestClient;

    fn connect(&self, options: &ConnectionOptions) -> Result<Self::Client, HttpError> {
        ReqwestClient::from_options(options)
    }
}
