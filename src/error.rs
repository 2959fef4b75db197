use thiserror::Error;
use tracing::{error, warn};

#[derive(Debug, Error)]
pub enum TgmeError {
    #[error("Failed to parse link: {0}")]
    UrlParseError(#[from] url::ParseError),

    #[error("Failed to fetch page: {0}")]
    FetchError(#[from] reqwest::Error),

    #[error("Request cancelled")]
    Cancelled,

    #[error("Failed to parse document: {0}")]
    DocumentParseError(String),
}

impl TgmeError {
    /// True for everything that went wrong before a body was in hand.
    pub fn is_fetch_error(&self) -> bool {
        !matches!(self, TgmeError::DocumentParseError(_))
    }

    pub fn log(&self) {
        match self {
            TgmeError::UrlParseError(e) => {
                warn!(error = %e, "Link parsing failed");
            }
            TgmeError::FetchError(e) => {
                error!(error = %e, url = ?e.url().map(|u| u.as_str()), "Page fetch failed");
            }
            TgmeError::Cancelled => {
                warn!("Page fetch cancelled");
            }
            TgmeError::DocumentParseError(e) => {
                error!(error = %e, "Document parsing failed");
            }
        }
    }
}
