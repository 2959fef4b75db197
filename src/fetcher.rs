use crate::TgmeError;
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE};
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, error, instrument};
use url::Url;

/// Anything that can hand back the body of a page.
#[async_trait]
pub trait PageSource: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>, TgmeError>;
}

/// Prefixes `https://` unless the link already mentions a scheme.
///
/// This is a plain substring check, so a scheme appearing anywhere in the
/// link counts.
pub fn normalize_link(link: &str) -> String {
    if !link.contains("http://") && !link.contains("https://") {
        format!("https://{link}")
    } else {
        link.to_string()
    }
}

#[derive(Clone)]
pub struct Fetcher {
    client: Client,
}

impl Default for Fetcher {
    fn default() -> Self {
        Self::new()
    }
}

impl Fetcher {
    pub fn new() -> Self {
        debug!("Fetcher initialized with default configuration");

        Self::new_with_config(FetcherConfig::default()).unwrap_or_else(|e| {
            error!(error = %e, "Failed to create HTTP client, using reqwest defaults");
            Self::with_client(Client::new())
        })
    }

    /// Creates a Fetcher from custom configuration.
    pub fn new_with_config(config: FetcherConfig) -> Result<Self, TgmeError> {
        let mut client_builder = Client::builder()
            .user_agent(config.user_agent)
            .timeout(config.timeout)
            .pool_max_idle_per_host(10);

        if let Some(headers) = config.headers {
            client_builder = client_builder.default_headers(headers);
        }

        if let Some(redirect_policy) = config.redirect_policy {
            client_builder = client_builder.redirect(redirect_policy);
        }

        Ok(Self {
            client: client_builder.build()?,
        })
    }

    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl PageSource for Fetcher {
    #[instrument(level = "debug", skip(self))]
    async fn fetch(&self, url: &str) -> Result<Vec<u8>, TgmeError> {
        let url = Url::parse(url)?;
        debug!(url = %url, "Starting fetch request");

        let response = self.client.get(url.clone()).send().await?;

        // Telegram answers unknown links with a regular page, so the status
        // is left alone.
        debug!(url = %url, status = %response.status(), "Received response");

        // Decodes using the charset the server declares, lossily.
        let body = response.text().await?;

        debug!(url = %url, content_length = body.len(), "Successfully fetched page");
        Ok(body.into_bytes())
    }
}

/// Options for the HTTP client behind [`Fetcher`].
///
/// # Examples
/// ```ignore
/// let fetcher = Fetcher::new_with_config(FetcherConfig {
///     user_agent: "my-bot/1.0".to_string(),
///     timeout: Duration::from_secs(5),
///     ..Default::default()
/// })?;
/// ```
pub struct FetcherConfig {
    pub user_agent: String,
    pub timeout: Duration,
    pub headers: Option<HeaderMap>,
    pub redirect_policy: Option<reqwest::redirect::Policy>,
}

impl Default for FetcherConfig {
    fn default() -> Self {
        // Button labels drive classification and are localized.
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("en-US,en;q=0.9"));
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("text/html,application/xhtml+xml;q=0.9,*/*;q=0.8"),
        );

        Self {
            user_agent: concat!("tgme/", env!("CARGO_PKG_VERSION")).to_string(),
            timeout: Duration::from_secs(10),
            headers: Some(headers),
            redirect_policy: None,
        }
    }
}
