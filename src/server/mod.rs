//! Web server exposing the extraction pipeline as a JSON API.
//!
//! One endpoint, `/api`, dispatches on the `action` query parameter and
//! wraps every result in the `{code, msg, data}` envelope. The pipeline
//! holds no cross-request state, so requests are served concurrently as
//! independent tasks.

mod handlers;
mod routes;

pub use handlers::Envelope;
pub use routes::create_router;

use std::net::SocketAddr;
use std::sync::Arc;

use crate::config::Settings;
use crate::scrapers::{CatalogExtractor, PageFetcher};

/// Shared state for the web server.
#[derive(Clone)]
pub struct AppState {
    pub extractor: Arc<CatalogExtractor>,
}

impl AppState {
    pub fn new(settings: &Settings) -> Self {
        let fetcher = PageFetcher::new(settings.fetch.clone());
        Self {
            extractor: Arc::new(CatalogExtractor::new(settings.base_url.clone(), fetcher)),
        }
    }
}

/// Start the web server.
pub async fn serve(settings: &Settings, host: &str, port: u16) -> anyhow::Result<()> {
    let state = AppState::new(settings);
    let app = create_router(state);

    let addr: SocketAddr = format!("{}:{}", host, port).parse()?;
    tracing::info!("Starting server at http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
