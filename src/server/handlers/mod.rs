//! Request handlers for the web server.

mod api;

pub use api::{api, health, ApiParams, Envelope};
