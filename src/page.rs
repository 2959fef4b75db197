use crate::document::Document;
use crate::TgmeError;
use tracing::debug;

const TITLE_SELECTOR: &str = ".tgme_page_title";
const EXTRA_SELECTOR: &str = ".tgme_page_extra";
const DESCRIPTION_SELECTOR: &str = r#"meta[property="og:description"]"#;
const AVATAR_SELECTOR: &str = ".tgme_page_photo_image";
const BUTTON_SELECTOR: &str = ".tgme_action_button_new";
const PREVIEW_LABEL_SELECTOR: &str = ".tgme_action_button_label";

/// Raw fields of a t.me preview page, read once when the page is built.
pub struct Page {
    document: Document,

    /// Entity title or user's display name.
    pub title: String,

    /// Secondary line: `@username` for users, member counts otherwise.
    pub extra: String,

    pub description: String,

    pub avatar: String,

    /// Label of the main action button, as rendered.
    pub button: String,

    /// Whether the page carries a channel preview button.
    pub has_preview: bool,
}

impl Page {
    pub fn from_bytes(body: &[u8]) -> Result<Self, TgmeError> {
        Ok(Self::from_document(Document::parse(body)?))
    }

    pub fn from_html(html: &str) -> Self {
        Self::from_document(Document::from_html(html))
    }

    pub fn from_document(document: Document) -> Self {
        // Line breaks in og:description are rendered as tabs.
        let description = document
            .find(DESCRIPTION_SELECTOR)
            .attr("content")
            .unwrap_or_default()
            .replace('\t', "\n");

        let avatar = document
            .find(AVATAR_SELECTOR)
            .attr("src")
            .unwrap_or_default()
            .to_string();

        let title = document
            .find(TITLE_SELECTOR)
            .children()
            .text()
            .trim()
            .to_string();
        let extra = document.find(EXTRA_SELECTOR).text().trim().to_string();
        let button = document.find(BUTTON_SELECTOR).first().text();
        let has_preview = !document.find(PREVIEW_LABEL_SELECTOR).is_empty();

        let page = Self {
            document,
            title,
            extra,
            description,
            avatar,
            button,
            has_preview,
        };

        debug!(
            title = %page.title,
            extra = %page.extra,
            button = %page.button,
            has_preview = page.has_preview,
            "Extracted page fields"
        );

        page
    }

    pub fn document(&self) -> &Document {
        &self.document
    }
}
