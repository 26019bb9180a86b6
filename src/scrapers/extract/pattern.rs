//! Pattern-based extraction rules over raw HTML.
//!
//! Fallback path used when the structured endpoint yields nothing. Each
//! rule pairs one pattern with its field mapping so rules can be exercised
//! with synthetic markup independently. Absent patterns leave fields
//! unset; nothing here errors.

use std::sync::LazyLock;

use regex::Regex;

use crate::models::{DetailRecord, ListingItem};

/// Image-wrapped listing anchor: href, image source, alt-text title.
static LISTING_ANCHOR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"<a\s+href="(/vodshow/\d+-\d+[^"]+)"[^>]*><img\s+src="([^"]+)"[^>]*alt="([^"]+)"[^>]*></a>"#)
        .unwrap()
});

/// First level-1 heading on a detail page.
static DETAIL_TITLE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<h1[^>]*>([^<]+)</h1>").unwrap());

/// Synopsis block on a detail page.
static DETAIL_DESCRIPTION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"<div\s+class="vod-content"[^>]*>([\s\S]*?)</div>"#).unwrap());

/// First captioned image on a detail page.
static DETAIL_IMAGE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"<img\s+src="([^"]+)"[^>]*alt="[^"]+"[^>]*>"#).unwrap());

/// Any markup tag, for stripping captured inner HTML down to text.
static MARKUP_TAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]+>").unwrap());

/// Derive an item id from a listing path: the last hyphen-separated
/// segment with its extension stripped (`/vodshow/2-55.html` -> `55`).
pub fn item_id_from_path(path: &str) -> String {
    let tail = path.rsplit('-').next().unwrap_or("");
    tail.split('.').next().unwrap_or("").to_string()
}

/// Strip markup tags from captured inner HTML.
fn strip_tags(html: &str) -> String {
    MARKUP_TAG.replace_all(html, "").to_string()
}

/// Scan a category or search page for listing anchors.
pub fn listing(html: &str, base_url: &str) -> Vec<ListingItem> {
    LISTING_ANCHOR
        .captures_iter(html)
        .filter_map(|caps| {
            let href = caps.get(1)?.as_str();
            let image = caps.get(2)?.as_str();
            let title = caps.get(3)?.as_str().trim();
            if title.is_empty() {
                return None;
            }
            Some(ListingItem {
                id: item_id_from_path(href),
                title: title.to_string(),
                url: format!("{}{}", base_url, href),
                image_url: image.trim().to_string(),
            })
        })
        .collect()
}

/// Scan a detail page for title, description and image.
///
/// Each field is filled independently from its own rule; whatever fails to
/// match stays unset.
pub fn detail(html: &str) -> DetailRecord {
    DetailRecord {
        title: DETAIL_TITLE
            .captures(html)
            .map(|c| c[1].trim().to_string()),
        description: DETAIL_DESCRIPTION
            .captures(html)
            .map(|c| strip_tags(&c[1]).trim().to_string()),
        image_url: DETAIL_IMAGE.captures(html).map(|c| c[1].trim().to_string()),
        play_links: Vec::new(),
    }
}
