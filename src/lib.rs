mod classifier;
mod document;
mod error;
mod fetcher;
#[cfg(feature = "logging")]
mod logging;
mod page;
mod parser;
mod types;
#[cfg(feature = "logging")]
mod utils;

pub use classifier::EntityKind;
pub use document::{Document, Selection};
pub use error::TgmeError;
pub use fetcher::{normalize_link, Fetcher, FetcherConfig, PageSource};
#[cfg(feature = "logging")]
pub use logging::{log_error_card, log_preview_card, setup_logging, LogConfig, LogLevelGuard};
pub use page::Page;
pub use parser::{parse, Parser};
pub use types::{Channel, Chat, Preview, User};
