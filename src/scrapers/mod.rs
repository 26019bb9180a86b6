//! Fetch-and-extract pipeline for the upstream catalog site.

pub mod extract;
pub mod http_client;

pub use extract::{CatalogExtractor, MAX_LISTING_ITEMS, PLAY_LINK_COUNT};
pub use http_client::{FetchConfig, Identity, PageFetcher};
