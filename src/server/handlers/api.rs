//! API endpoint handlers.

use axum::extract::{Query, State};
use axum::response::IntoResponse;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::super::AppState;

/// Liveness endpoint. Plain text, not part of the JSON contract.
pub async fn health() -> impl IntoResponse {
    "vodfetch API service is running!"
}

/// Query parameters accepted by the `/api` endpoint.
#[derive(Debug, Deserialize)]
pub struct ApiParams {
    pub action: Option<String>,
    pub url: Option<String>,
    pub keyword: Option<String>,
}

/// Uniform response wrapper. Always served with HTTP 200; the application
/// status lives in `code`.
#[derive(Debug, Serialize)]
pub struct Envelope {
    pub code: u16,
    pub msg: String,
    pub data: Value,
}

impl Envelope {
    pub fn success(data: Value) -> Self {
        Self {
            code: 200,
            msg: "success".to_string(),
            data,
        }
    }

    pub fn bad_request(msg: &str) -> Self {
        Self {
            code: 400,
            msg: msg.to_string(),
            data: serde_json::json!({}),
        }
    }

    pub fn internal_error(cause: &str) -> Self {
        Self {
            code: 500,
            msg: format!("internal server error: {}", cause),
            data: serde_json::json!({}),
        }
    }
}

/// Single JSON API endpoint; the `action` parameter selects the operation.
pub async fn api(State(state): State<AppState>, Query(params): Query<ApiParams>) -> impl IntoResponse {
    let envelope = match dispatch(&state, &params).await {
        Ok(envelope) => envelope,
        Err(e) => {
            tracing::error!("unhandled fault for action {:?}: {}", params.action, e);
            Envelope::internal_error(&e.to_string())
        }
    };
    axum::Json(envelope)
}

/// Map an action to its orchestrator entry point.
///
/// Caller input errors come back as 400 envelopes; anything else that goes
/// wrong bubbles up and is wrapped as a 500 envelope by [`api`].
async fn dispatch(state: &AppState, params: &ApiParams) -> anyhow::Result<Envelope> {
    match params.action.as_deref().unwrap_or("home") {
        "home" => {
            let categories = state.extractor.categories();
            Ok(Envelope::success(serde_json::json!({
                "categories": serde_json::to_value(categories)?,
            })))
        }
        "category" => match params.url.as_deref() {
            Some(url) => {
                let items = state.extractor.listing(url).await;
                Ok(Envelope::success(serde_json::json!({
                    "items": serde_json::to_value(items)?,
                })))
            }
            None => Ok(Envelope::bad_request("missing url parameter")),
        },
        "detail" => match params.url.as_deref() {
            Some(url) => {
                let record = state.extractor.detail(url).await;
                Ok(Envelope::success(serde_json::to_value(record)?))
            }
            None => Ok(Envelope::bad_request("missing url parameter")),
        },
        "search" => match params.keyword.as_deref() {
            Some(keyword) => {
                let items = state.extractor.search(keyword).await;
                Ok(Envelope::success(serde_json::json!({
                    "items": serde_json::to_value(items)?,
                })))
            }
            None => Ok(Envelope::bad_request("missing keyword parameter")),
        },
        _ => Ok(Envelope::bad_request("unknown action")),
    }
}
