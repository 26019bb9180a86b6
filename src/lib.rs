//! vodfetch - structured media-catalog extraction from an upstream VOD site.
//!
//! The upstream serves catalog data inconsistently through an internal
//! AJAX/JSON endpoint and raw HTML markup. This crate fetches pages with
//! retry and identity rotation, extracts records through the structured
//! path with a pattern fallback, and exposes the result as a stable JSON
//! API.

pub mod config;
pub mod models;
pub mod scrapers;
pub mod server;
