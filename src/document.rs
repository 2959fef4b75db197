use crate::TgmeError;
use scraper::{ElementRef, Html, Selector};
use std::borrow::Cow;
use tracing::debug;

/// A parsed HTML document that can be queried with CSS selectors.
pub struct Document {
    html: Html,
}

/// Elements matched by a selector, in document order.
#[derive(Clone, Default)]
pub struct Selection<'a> {
    elements: Vec<ElementRef<'a>>,
}

impl Document {
    /// Parses raw response bytes. Invalid UTF-8 sequences are replaced
    /// with U+FFFD; only a body that decodes to mostly replacement
    /// characters is rejected, since it is binary rather than HTML.
    pub fn parse(bytes: &[u8]) -> Result<Self, TgmeError> {
        let html = String::from_utf8_lossy(bytes);
        if let Cow::Owned(decoded) = &html {
            let total = decoded.chars().count();
            let replaced = decoded.chars().filter(|&c| c == char::REPLACEMENT_CHARACTER).count();
            debug!(replaced, total, "Body contained invalid UTF-8");
            if replaced * 2 > total {
                return Err(TgmeError::DocumentParseError(format!(
                    "{replaced} of {total} characters could not be decoded"
                )));
            }
        }
        Ok(Self::from_html(&html))
    }

    pub fn from_html(html: &str) -> Self {
        let html = Html::parse_document(html);
        if !html.errors.is_empty() {
            debug!(count = html.errors.len(), "HTML parser recovered from errors");
        }
        Self { html }
    }

    /// Selects every element matching `selector`. An invalid selector
    /// matches nothing.
    pub fn find(&self, selector: &str) -> Selection<'_> {
        match Selector::parse(selector) {
            Ok(selector) => Selection {
                elements: self.html.select(&selector).collect(),
            },
            Err(e) => {
                debug!(selector = %selector, error = ?e, "Invalid selector");
                Selection::default()
            }
        }
    }
}

impl<'a> Selection<'a> {
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Narrows the selection to its first element.
    pub fn first(&self) -> Selection<'a> {
        Selection {
            elements: self.elements.iter().take(1).copied().collect(),
        }
    }

    /// Child elements of every element in the selection. Text nodes are
    /// not elements and are skipped.
    pub fn children(&self) -> Selection<'a> {
        Selection {
            elements: self
                .elements
                .iter()
                .flat_map(|el| el.children().filter_map(ElementRef::wrap))
                .collect(),
        }
    }

    /// Combined text of all elements and their descendants.
    pub fn text(&self) -> String {
        self.elements
            .iter()
            .flat_map(|el| el.text())
            .collect()
    }

    /// Attribute of the first element, if both exist.
    pub fn attr(&self, name: &str) -> Option<&'a str> {
        self.elements.first().and_then(|el| el.value().attr(name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HTML: &str = r#"<html><body>
        <div class="title">loose <span>Crosser</span> <b>Live</b></div>
        <a class="btn" href="/one">One</a>
        <a class="btn" href="/two">Two</a>
    </body></html>"#;

    #[test]
    fn test_children_skip_text_nodes() {
        let doc = Document::from_html(HTML);
        let title = doc.find(".title");
        assert_eq!(title.text(), "loose Crosser Live");
        assert_eq!(title.children().len(), 2);
        assert_eq!(title.children().text(), "CrosserLive");
    }

    #[test]
    fn test_first_and_attr() {
        let doc = Document::from_html(HTML);
        let buttons = doc.find(".btn");
        assert_eq!(buttons.len(), 2);
        assert_eq!(buttons.text(), "OneTwo");
        assert_eq!(buttons.first().text(), "One");
        assert_eq!(buttons.attr("href"), Some("/one"));
        assert_eq!(buttons.attr("missing"), None);
    }

    #[test]
    fn test_missing_and_invalid_selectors() {
        let doc = Document::from_html(HTML);
        assert!(doc.find(".nothing").is_empty());
        assert!(doc.find("[[[").is_empty());
        assert_eq!(doc.find(".nothing").first().text(), "");
        assert_eq!(doc.find(".nothing").attr("href"), None);
    }

    #[test]
    fn test_parse_recovers_from_stray_bytes() {
        let doc = Document::parse(b"<p class=\"x\">caf\xe9 ok</p>").unwrap();
        assert_eq!(doc.find(".x").text(), "caf\u{FFFD} ok");
        assert!(Document::parse(b"<p>ok</p>").is_ok());
        assert!(Document::parse(b"").is_ok());
    }

    #[test]
    fn test_parse_rejects_binary_body() {
        let err = Document::parse(&[0xff, 0xfe, 0x00, 0xfd, 0xfc]).err();
        assert!(matches!(err, Some(TgmeError::DocumentParseError(_))));
    }
}
