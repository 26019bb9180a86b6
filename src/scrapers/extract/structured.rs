//! Structured extraction via the upstream AJAX data endpoint.
//!
//! The upstream CMS embeds a category id (`aid`) and, on detail pages, an
//! item id (`vod_id`) in its markup. Both are recovered here and used to
//! query the site's internal JSON endpoint. Every internal failure — a
//! dead endpoint, wrapper text around the payload, a missing field —
//! degrades to an empty result so the orchestrator can fall back to
//! pattern extraction.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;
use tracing::debug;

use super::super::http_client::PageFetcher;
use crate::models::{DetailRecord, ListingItem};

/// Category id embedded in page markup by the upstream CMS.
static CATEGORY_ID: LazyLock<Regex> = LazyLock::new(|| Regex::new(r#"aid":"(\d+)""#).unwrap());

/// Item id embedded in detail page markup.
static CONTENT_ID: LazyLock<Regex> = LazyLock::new(|| Regex::new(r#"vod_id":"(\d+)""#).unwrap());

/// Category id assumed when the markup carries none.
const DEFAULT_CATEGORY_ID: &str = "12";

/// Recover the embedded category id, falling back to the default.
pub fn category_id(html: &str) -> &str {
    CATEGORY_ID
        .captures(html)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str())
        .unwrap_or(DEFAULT_CATEGORY_ID)
}

/// Recover the embedded item id, if any.
pub fn content_id(html: &str) -> Option<&str> {
    CONTENT_ID
        .captures(html)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str())
}

/// Extract the outermost JSON object from a response that may carry
/// non-JSON wrapper text around it.
pub fn extract_json_object(text: &str) -> Option<Value> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    if end < start {
        return None;
    }
    serde_json::from_str(&text[start..=end]).ok()
}

/// Structured extractor bound to one upstream site.
pub struct StructuredExtractor<'a> {
    fetcher: &'a PageFetcher,
    base_url: &'a str,
}

impl<'a> StructuredExtractor<'a> {
    pub fn new(fetcher: &'a PageFetcher, base_url: &'a str) -> Self {
        Self { fetcher, base_url }
    }

    fn data_url(&self, aid: &str) -> String {
        format!(
            "{}/index.php/ajax/data.html?mid=1&aid={}&pg=1&t=json",
            self.base_url, aid
        )
    }

    /// Query the data endpoint for the category embedded in `html`.
    async fn fetch_data(&self, html: &str) -> Option<Value> {
        let aid = category_id(html);
        let url = self.data_url(aid);
        let body = self.fetcher.fetch(&url).await?;
        let data = extract_json_object(&body);
        if data.is_none() {
            debug!("data endpoint for aid {} returned no parseable JSON", aid);
        }
        data
    }

    /// Extract listing items for the category page `html`.
    pub async fn listing(&self, html: &str) -> Vec<ListingItem> {
        match self.fetch_data(html).await {
            Some(data) => listing_from_value(&data, self.base_url),
            None => Vec::new(),
        }
    }

    /// Extract detail fields for the detail page `html`.
    ///
    /// Play links are the orchestrator's concern; only title, description
    /// and image are filled here.
    pub async fn detail(&self, html: &str) -> DetailRecord {
        let Some(vod_id) = content_id(html) else {
            return DetailRecord::default();
        };
        match self.fetch_data(html).await {
            Some(data) => detail_from_value(&data, vod_id),
            None => DetailRecord::default(),
        }
    }
}

/// Read a field that the endpoint serves either as a string or a number.
fn field_string(item: &Value, key: &str) -> String {
    match item.get(key) {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        _ => String::new(),
    }
}

/// Map the endpoint's `list` payload to listing items.
///
/// Elements missing an id or a name are dropped.
pub fn listing_from_value(data: &Value, base_url: &str) -> Vec<ListingItem> {
    let Some(list) = data.get("list").and_then(Value::as_array) else {
        return Vec::new();
    };

    let mut items = Vec::new();
    for entry in list {
        let id = field_string(entry, "vod_id");
        let title = field_string(entry, "vod_name");
        if id.is_empty() || title.is_empty() {
            continue;
        }
        let url = format!("{}/vodshow/2-{}.html", base_url, id);
        items.push(ListingItem {
            id,
            title,
            url,
            image_url: field_string(entry, "vod_pic"),
        });
    }
    items
}

/// Find the `list` element matching `vod_id` and map its detail fields.
pub fn detail_from_value(data: &Value, vod_id: &str) -> DetailRecord {
    let Some(list) = data.get("list").and_then(Value::as_array) else {
        return DetailRecord::default();
    };

    for entry in list {
        if field_string(entry, "vod_id") != vod_id {
            continue;
        }
        let title = field_string(entry, "vod_name");
        if title.is_empty() {
            return DetailRecord::default();
        }
        return DetailRecord {
            title: Some(title),
            description: Some(field_string(entry, "vod_content")),
            image_url: Some(field_string(entry, "vod_pic")),
            play_links: Vec::new(),
        };
    }

    DetailRecord::default()
}
