//! Catalog record types returned by the extraction pipeline.

use serde::Serialize;

/// A top-level catalog section on the upstream site.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Category {
    pub name: String,
    pub url: String,
}

/// One entry on a category or search results page.
///
/// `id` and `title` are always non-empty; items missing either are dropped
/// during extraction. `image_url` may be empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListingItem {
    pub id: String,
    pub title: String,
    pub url: String,
    pub image_url: String,
}

/// A synthesized playback link on a detail page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlayLink {
    pub label: String,
    pub url: String,
}

/// Fields extracted from a detail page.
///
/// A missing `title` means extraction failed; the record then carries no
/// other fields and serializes to `{}`. When `title` is present the record
/// carries exactly five play links.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DetailRecord {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub play_links: Vec<PlayLink>,
}

impl DetailRecord {
    /// True when extraction produced nothing usable.
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
    }
}
