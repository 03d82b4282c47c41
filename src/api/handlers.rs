use crate::api::AppState;
use crate::domain::model::{ErrorResponse, SearchRequest, SearchResponse};
use crate::utils::error::{ErrorCategory, GistError};
use axum::extract::rejection::JsonRejection;
use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use axum::Json;
use futures::FutureExt;
use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;

impl IntoResponse for GistError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        match self.category() {
            ErrorCategory::Request => tracing::info!(error = %self, "rejected search request"),
            ErrorCategory::Upstream => tracing::error!(error = %self, "GitHub request failed"),
            _ => tracing::error!(
                error = %self,
                category = ?self.category(),
                severity = ?self.severity(),
                "search request failed"
            ),
        }
        let body = ErrorResponse::new(status.as_u16(), self.public_message());
        (status, Json(body)).into_response()
    }
}

/// Turns a panicking handler into the generic 500 body instead of a dropped
/// connection.
pub async fn catch_panic(request: Request, next: Next) -> Response {
    match AssertUnwindSafe(next.run(request)).catch_unwind().await {
        Ok(response) => response,
        Err(payload) => GistError::ProcessingError {
            message: format!("handler panicked: {}", panic_message(payload.as_ref())),
        }
        .into_response(),
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic payload".to_string()
    }
}

/// Liveness check.
pub async fn ping() -> &'static str {
    "pong"
}

pub async fn search(
    State(state): State<Arc<AppState>>,
    payload: std::result::Result<Json<serde_json::Value>, JsonRejection>,
) -> Response {
    let request = match parse_search_request(payload) {
        Ok(request) => request,
        Err(e) => return e.into_response(),
    };

    match state.search.search(request).await {
        Ok(result) => Json(SearchResponse::from(result)).into_response(),
        Err(e) => e.into_response(),
    }
}

fn parse_search_request(
    payload: std::result::Result<Json<serde_json::Value>, JsonRejection>,
) -> crate::Result<SearchRequest> {
    let Json(value) = payload.map_err(|rejection| GistError::bad_parameter(rejection.body_text()))?;

    // A derived Deserialize would also accept a two-element array.
    if !value.is_object() {
        return Err(GistError::bad_parameter("request body must be a JSON object"));
    }

    serde_json::from_value(value).map_err(|e| GistError::bad_parameter(e.to_string()))
}
