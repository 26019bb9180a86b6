//! Two-stage catalog extraction.
//!
//! The structured path (the upstream site's internal JSON endpoint) is
//! tried first; the pattern path (fixed rules over raw markup) runs only
//! when it yields nothing. Strategies return empty-or-present results —
//! the composition here is the only place that decides what "failed"
//! means.

pub mod pattern;
pub mod structured;

use tracing::debug;

use self::structured::StructuredExtractor;
use super::http_client::PageFetcher;
use crate::models::{Category, DetailRecord, ListingItem, PlayLink};

/// Hard cap on listing items returned for one page, source order kept.
pub const MAX_LISTING_ITEMS: usize = 15;

/// Play links synthesized per successful detail extraction.
pub const PLAY_LINK_COUNT: usize = 5;

/// Fixed top-level sections of the upstream catalog: display name and
/// section id used in the show URL.
const CATEGORY_SECTIONS: &[(&str, &str)] = &[
    ("电影", "1"),
    ("连续剧", "2"),
    ("纪录片", "24"),
    ("漫剧", "3"),
    ("综艺", "23"),
    ("伦理", "30"),
];

/// Catalog extractor bound to one upstream site.
///
/// Holds no per-request state; every call produces a fresh, independent
/// set of records.
#[derive(Debug, Clone)]
pub struct CatalogExtractor {
    fetcher: PageFetcher,
    base_url: String,
}

impl CatalogExtractor {
    pub fn new(base_url: impl Into<String>, fetcher: PageFetcher) -> Self {
        Self {
            fetcher,
            base_url: base_url.into(),
        }
    }

    /// The fixed category list. No network involved.
    pub fn categories(&self) -> Vec<Category> {
        CATEGORY_SECTIONS
            .iter()
            .map(|(name, section)| Category {
                name: name.to_string(),
                url: format!("{}/vodshow/{}-----------.html", self.base_url, section),
            })
            .collect()
    }

    /// Extract listing items from a category or search page.
    ///
    /// A failed fetch yields an empty sequence; otherwise structured
    /// extraction runs first and pattern extraction only on empty.
    pub async fn listing(&self, url: &str) -> Vec<ListingItem> {
        let Some(html) = self.fetcher.fetch(url).await else {
            return Vec::new();
        };

        let structured = StructuredExtractor::new(&self.fetcher, &self.base_url);
        let mut items = structured.listing(&html).await;
        if items.is_empty() {
            debug!("structured listing empty for {}, trying patterns", url);
            items = pattern::listing(&html, &self.base_url);
        }
        items.truncate(MAX_LISTING_ITEMS);
        items
    }

    /// Extract a detail record, synthesizing play links when a title was
    /// recovered.
    pub async fn detail(&self, url: &str) -> DetailRecord {
        let Some(html) = self.fetcher.fetch(url).await else {
            return DetailRecord::default();
        };

        let structured = StructuredExtractor::new(&self.fetcher, &self.base_url);
        let mut record = structured.detail(&html).await;
        if record.title.is_none() {
            debug!("structured detail empty for {}, trying patterns", url);
            record = pattern::detail(&html);
        }

        if record.title.is_some() {
            let content_id = structured::content_id(&html).unwrap_or_default();
            record.play_links = self.play_links(content_id);
        }
        record
    }

    /// Search the catalog, reusing listing extraction on the results page.
    pub async fn search(&self, keyword: &str) -> Vec<ListingItem> {
        let url = format!("{}/search/{}", self.base_url, urlencoding::encode(keyword));
        self.listing(&url).await
    }

    /// Synthesize the fixed set of playback links for a content id. The id
    /// may be empty when none was discoverable in the markup.
    fn play_links(&self, content_id: &str) -> Vec<PlayLink> {
        (1..=PLAY_LINK_COUNT)
            .map(|n| PlayLink {
                label: format!("source {}", n),
                url: format!("{}/play/{}-1-{}.html", self.base_url, content_id, n),
            })
            .collect()
    }
}
