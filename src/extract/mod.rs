//! Turning arbitrary web pages into practice sentences.
//!
//! The pipeline is one synchronous GET through a [`PageFetcher`], an HTML
//! parse with boilerplate subtrees removed, per-block filtering with
//! [`filter_text`], and sentence segmentation with [`split_into_sentences`].

pub mod fetch;
pub mod sentences;
pub mod text;

pub use fetch::{FetchedPage, HttpPageFetcher, PageFetcher, StaticPageFetcher};
pub use sentences::split_into_sentences;
pub use text::{filter_text, is_allowed_char, is_url, MIN_SENTENCE_LENGTH};

use crate::config::FetchConfig;
use crate::error::{ExtractionError, FetchError};
use itertools::Itertools;
use scraper::{Html, Selector};
use tracing::{debug, warn};

const EXCLUDED_TAGS: &str = "script, style, header, footer, nav";
const HEADING_TAGS: [&str; 6] = ["h1", "h2", "h3", "h4", "h5", "h6"];
const PARAGRAPH_TAG: &str = "p";

fn selector(css: &'static str) -> Selector {
    Selector::parse(css).expect("selector literals are valid CSS")
}

/// Fetches pages and reduces them to newline-separated practice sentences
#[derive(Debug, Clone)]
pub struct ContentExtractor<F: PageFetcher = HttpPageFetcher> {
    fetcher: F,
}

impl ContentExtractor<HttpPageFetcher> {
    pub fn with_http(config: &FetchConfig) -> Self {
        Self::new(HttpPageFetcher::new(
            config.timeout(),
            config.user_agent.clone(),
        ))
    }
}

impl Default for ContentExtractor<HttpPageFetcher> {
    fn default() -> Self {
        Self::new(HttpPageFetcher::default())
    }
}

impl<F: PageFetcher> ContentExtractor<F> {
    pub fn new(fetcher: F) -> Self {
        Self { fetcher }
    }

    /// Download `url` and return its practice sentences joined by newlines.
    ///
    /// Transport failures, malformed URLs and non-2xx responses all come back
    /// as the same [`ExtractionError`].
    pub fn extract_text_from_url(&self, url: &str) -> Result<String, ExtractionError> {
        let page = self
            .fetcher
            .fetch(url)
            .and_then(|page| {
                if page.is_success() {
                    Ok(page)
                } else {
                    Err(FetchError::Status(page.status))
                }
            })
            .map_err(|e| {
                warn!(url, error = %e, "page fetch failed");
                ExtractionError {
                    url: url.to_string(),
                    cause: e.to_string(),
                }
            })?;

        let text = extract_text_from_html(&page.body);
        debug!(url, lines = text.lines().count(), "extracted practice text");
        Ok(text)
    }
}

/// Practice sentences from an HTML document.
///
/// `script`, `style`, `header`, `footer` and `nav` subtrees are detached
/// before any text is read. Headings are collected first (all `h1`, then all
/// `h2`, ...), followed by paragraphs in document order.
pub fn extract_text_from_html(html: &str) -> String {
    let mut document = Html::parse_document(html);

    let excluded = selector(EXCLUDED_TAGS);
    let boilerplate: Vec<_> = document.select(&excluded).map(|el| el.id()).collect();
    for id in boilerplate {
        if let Some(mut node) = document.tree.get_mut(id) {
            node.detach();
        }
    }

    // Html::select scans the whole node arena, detached nodes included
    let root = document.root_element();
    let blocks = HEADING_TAGS
        .iter()
        .copied()
        .chain(std::iter::once(PARAGRAPH_TAG))
        .flat_map(|tag| {
            let sel = selector(tag);
            root.select(&sel)
                .map(|el| filter_text(&el.text().collect::<String>()))
                .collect::<Vec<_>>()
        })
        .filter(|block| !block.is_empty())
        .join("\n");

    split_into_sentences(&blocks)
}
