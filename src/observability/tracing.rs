//! Per-request spans.
//!
//! # Responsibilities
//! - Create one span per HTTP request
//! - Attach the request ID so every event in the request carries it

use axum::http::Request;
use tower_http::trace::MakeSpan;

use crate::http::request::X_REQUEST_ID;

/// Span factory for `TraceLayer`, tagging spans with the request ID.
#[derive(Debug, Clone, Copy, Default)]
pub struct RequestSpan;

impl<B> MakeSpan<B> for RequestSpan {
    fn make_span(&mut self, request: &Request<B>) -> tracing::Span {
        let request_id = request
            .headers()
            .get(X_REQUEST_ID)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("unknown");

        tracing::info_span!(
            "request",
            request_id = %request_id,
            method = %request.method(),
            path = %request.uri().path(),
        )
    }
}
