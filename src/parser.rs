use crate::fetcher::{normalize_link, Fetcher, FetcherConfig, PageSource};
use crate::page::Page;
use crate::{Preview, TgmeError};
use std::sync::LazyLock;
use tokio_util::sync::CancellationToken;
use tracing::{debug, instrument};

static DEFAULT_PARSER: LazyLock<Parser> = LazyLock::new(Parser::new);

/// Returns info parsed from a t.me link, using a shared default client.
///
/// Links can look like:
/// - User: `t.me/MrLinch`
/// - Bot: `t.me/crosser_bot`
/// - Channel: `t.me/crosser_live`
/// - Chat: `t.me/crosser_chat`
/// - Private channel or chat: `https://t.me/joinchat/AAAAAENM1m0f_WHVNXjP4w`
pub async fn parse(link: &str) -> Result<Preview, TgmeError> {
    DEFAULT_PARSER.parse(link).await
}

/// Fetches t.me pages and turns them into [`Preview`]s.
#[derive(Clone)]
pub struct Parser<S = Fetcher> {
    source: S,
}

impl Default for Parser {
    fn default() -> Self {
        Self::new()
    }
}

impl Parser {
    pub fn new() -> Self {
        Self::with_source(Fetcher::new())
    }

    pub fn with_config(config: FetcherConfig) -> Result<Self, TgmeError> {
        Ok(Self::with_source(Fetcher::new_with_config(config)?))
    }
}

impl<S: PageSource> Parser<S> {
    pub fn with_source(source: S) -> Self {
        Self { source }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Failures are logged once, through [`TgmeError::log`].
    #[instrument(level = "debug", skip(self))]
    pub async fn parse(&self, link: &str) -> Result<Preview, TgmeError> {
        let url = normalize_link(link);
        let body = self.source.fetch(&url).await.inspect_err(TgmeError::log)?;
        extract(&body).inspect_err(TgmeError::log)
    }

    /// Like [`Parser::parse`], but gives up with [`TgmeError::Cancelled`]
    /// as soon as `cancel` fires.
    #[instrument(level = "debug", skip(self, cancel))]
    pub async fn parse_with_cancel(
        &self,
        link: &str,
        cancel: &CancellationToken,
    ) -> Result<Preview, TgmeError> {
        let url = normalize_link(link);
        let fetched = tokio::select! {
            biased;
            _ = cancel.cancelled() => Err(TgmeError::Cancelled),
            body = self.source.fetch(&url) => body,
        };
        let body = fetched.inspect_err(TgmeError::log)?;
        extract(&body).inspect_err(TgmeError::log)
    }

    /// Parses every link concurrently. Results keep the order of `links`.
    pub async fn parse_batch(&self, links: &[&str]) -> Vec<Result<Preview, TgmeError>> {
        let futures: Vec<_> = links.iter().map(|link| self.parse(link)).collect();
        let results = futures::future::join_all(futures).await;

        let failed = results.iter().filter(|r| r.is_err()).count();
        debug!(total = links.len(), failed, "Batch finished");

        results
    }
}

// The page is built and dropped here, away from any await point.
fn extract(body: &[u8]) -> Result<Preview, TgmeError> {
    let page = Page::from_bytes(body)?;
    let preview = page.to_preview();
    debug!(kind = preview.kind(), "Parsed preview");
    Ok(preview)
}
