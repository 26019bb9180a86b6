//! Data models for vodfetch.

mod catalog;

pub use catalog::{Category, DetailRecord, ListingItem, PlayLink};
