//! HTML parser for diary post pages
//!
//! This module extracts everything the archiver needs from one post page:
//! - Title (from the `og:title` meta tag)
//! - Publication date, normalized for use in a directory name
//! - Site-relative image URLs
//! - Body text, with fallbacks for older markup
//! - The "previous entry" link that continues the chain
//! - The author's profile name
//!
//! Every extraction tolerates missing markup and returns an empty or absent
//! value instead of failing.

use crate::url::resolve_site_relative;
use scraper::{ElementRef, Html, Selector};
use url::Url;

/// Meta property holding the post title
pub const TITLE_PROPERTY: &str = "og:title";

/// Label of the navigation anchor that points at the older post
pub const PREVIOUS_ENTRY_LABEL: &str = "前の記事";

const DATE_SELECTOR: &str = "p.bd--hd__date.a--tx.js-tdi";
const IMAGE_SELECTOR: &str = "img[src]";
const BODY_SELECTOR: &str = "div.bd--edit";
const NAV_ANCHOR_SELECTOR: &str = "a.bd--hn__a.hv--op";
const NAV_LABEL_SELECTOR: &str = "p.bd--hn__tx.f--head";
const AUTHOR_SELECTOR: &str = "p.bd--prof__name.f--head";

/// Structured result of parsing one post page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostRecord {
    /// URL the page was fetched from
    pub url: Url,

    /// Post title (empty if the meta tag is missing)
    pub title: String,

    /// Normalized date token (empty if the date element is missing)
    pub date: String,

    /// Absolute image URLs, in document order
    pub image_urls: Vec<Url>,

    /// Body text; `None` when the body container itself is missing
    pub body_text: Option<String>,

    /// The chronologically previous post, if the page links to one
    pub predecessor_url: Option<Url>,
}

/// Ways of pulling text out of the body container, tried in order
///
/// Post markup changed over the years: recent posts wrap paragraphs in
/// `div[dir="auto"]`, older ones use bare `div`s or `p`s.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyStrategy {
    /// Text of every `div[dir="auto"]`
    AutoDirectionBlocks,
    /// Text of every `div`
    Blocks,
    /// Text of every `p`
    Paragraphs,
}

impl BodyStrategy {
    /// Order in which strategies are attempted
    pub const ORDER: [BodyStrategy; 3] = [
        BodyStrategy::AutoDirectionBlocks,
        BodyStrategy::Blocks,
        BodyStrategy::Paragraphs,
    ];

    fn css(&self) -> &'static str {
        match self {
            Self::AutoDirectionBlocks => r#"div[dir="auto"]"#,
            Self::Blocks => "div",
            Self::Paragraphs => "p",
        }
    }

    /// Joins the text of every matching descendant with newlines
    pub fn extract(&self, container: ElementRef<'_>) -> String {
        let Some(sel) = selector(self.css()) else {
            return String::new();
        };

        container
            .select(&sel)
            .map(|element| element.text().collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// A parsed post page
///
/// Holds the document tree, so it is built and consumed without crossing an
/// `.await`.
pub struct PostDocument {
    document: Html,
    origin: String,
}

impl PostDocument {
    /// Parses raw page content
    ///
    /// # Arguments
    ///
    /// * `html` - The page content
    /// * `origin` - Site origin used to resolve site-relative links
    ///
    /// # Example
    ///
    /// ```
    /// use diary_walker::crawler::PostDocument;
    ///
    /// let html = r#"<html><head><meta property="og:title" content="Hello"></head></html>"#;
    /// let doc = PostDocument::parse(html, "https://diary.example.com");
    /// assert_eq!(doc.title(), "Hello");
    /// assert_eq!(doc.predecessor_url(), None);
    /// ```
    pub fn parse(html: &str, origin: &str) -> Self {
        Self {
            document: Html::parse_document(html),
            origin: origin.to_string(),
        }
    }

    /// Returns the `content` of the first `<meta property=...>` tag, or an empty string
    pub fn meta_content(&self, property: &str) -> String {
        selector(&format!(r#"meta[property="{}"]"#, property))
            .and_then(|sel| self.document.select(&sel).next())
            .and_then(|element| element.value().attr("content"))
            .unwrap_or_default()
            .to_string()
    }

    /// Returns the `og:title` content, or an empty string
    pub fn title(&self) -> String {
        self.meta_content(TITLE_PROPERTY)
    }

    /// Returns the normalized publication date, or an empty string
    pub fn date(&self) -> String {
        self.first(DATE_SELECTOR)
            .map(|element| normalize_date(&element.text().collect::<String>()))
            .unwrap_or_default()
    }

    /// Returns absolute URLs for every site-relative image, in document order
    pub fn image_urls(&self) -> Vec<Url> {
        let Some(img_selector) = selector(IMAGE_SELECTOR) else {
            return Vec::new();
        };

        self.document
            .select(&img_selector)
            .filter_map(|element| element.value().attr("src"))
            .filter_map(|src| resolve_site_relative(&self.origin, src))
            .collect()
    }

    /// Extracts the body text
    ///
    /// Returns `None` if the body container is missing. Otherwise returns the
    /// first non-empty strategy result, or an empty string when none produce text.
    pub fn body_text(&self) -> Option<String> {
        let container = self.first(BODY_SELECTOR)?;

        let text = BodyStrategy::ORDER
            .iter()
            .map(|strategy| strategy.extract(container))
            .find(|text| !text.is_empty())
            .unwrap_or_default();

        Some(text)
    }

    /// Returns the URL of the previous post
    ///
    /// The navigation anchor must carry a label reading exactly
    /// [`PREVIOUS_ENTRY_LABEL`] (after trimming). On the oldest post the
    /// anchor points forward instead, which ends the chain.
    pub fn predecessor_url(&self) -> Option<Url> {
        let anchor = self.first(NAV_ANCHOR_SELECTOR)?;

        let label_selector = selector(NAV_LABEL_SELECTOR)?;
        let label = anchor.select(&label_selector).next()?;
        if label.text().collect::<String>().trim() != PREVIOUS_ENTRY_LABEL {
            return None;
        }

        let href = anchor.value().attr("href")?;
        resolve_site_relative(&self.origin, href)
    }

    /// Returns the raw profile name text, if present
    pub fn author_name(&self) -> Option<String> {
        self.first(AUTHOR_SELECTOR)
            .map(|element| element.text().collect::<String>())
    }

    /// Collects every post field into a [`PostRecord`]
    pub fn to_record(&self, url: Url) -> PostRecord {
        PostRecord {
            url,
            title: self.title(),
            date: self.date(),
            image_urls: self.image_urls(),
            body_text: self.body_text(),
            predecessor_url: self.predecessor_url(),
        }
    }

    fn first(&self, css: &str) -> Option<ElementRef<'_>> {
        let sel = selector(css)?;
        self.document.select(&sel).next()
    }
}

/// Turns a displayed date into a filesystem-safe token
///
/// Colons become full-width colons, periods become hyphens and spaces become
/// underscores: `"2023.10.05 12:30"` becomes `"2023-10-05_12：30"`.
pub fn normalize_date(raw: &str) -> String {
    raw.trim()
        .replace(':', "：")
        .replace('.', "-")
        .replace(' ', "_")
}

fn selector(css: &str) -> Option<Selector> {
    Selector::parse(css).ok()
}
