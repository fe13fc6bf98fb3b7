//! Response mapping.
//!
//! # Responsibilities
//! - Map resolution outcomes to HTTP responses
//! - Keep status codes in one place
//!
//! # Design Decisions
//! - Redirects use 303 See Other
//! - Unknown bang is 404, every input problem is 400
//! - Error bodies are short plain text

use axum::{
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::observability::metrics;

/// Reasons a search request does not produce a redirect.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SearchError {
    #[error("No query provided for search")]
    EmptyQuery,

    #[error("Invalid query string")]
    InvalidQuery,

    #[error("No bang provided for search")]
    EmptyBang,

    #[error("No bang in query and default search is disabled")]
    NoBangDisabled,

    #[error("Unknown bang: '{0}'")]
    UnknownBang(String),
}

impl SearchError {
    pub fn status(&self) -> StatusCode {
        match self {
            SearchError::UnknownBang(_) => StatusCode::NOT_FOUND,
            SearchError::EmptyQuery
            | SearchError::InvalidQuery
            | SearchError::EmptyBang
            | SearchError::NoBangDisabled => StatusCode::BAD_REQUEST,
        }
    }

    /// Label used for the resolution metric.
    pub fn outcome(&self) -> &'static str {
        match self {
            SearchError::UnknownBang(_) => metrics::OUTCOME_NOT_FOUND,
            _ => metrics::OUTCOME_BAD_REQUEST,
        }
    }
}

impl IntoResponse for SearchError {
    fn into_response(self) -> Response {
        (self.status(), self.to_string()).into_response()
    }
}

/// Redirect the client to a resolved search URL.
pub fn redirect(url: &str) -> Response {
    match HeaderValue::from_str(url) {
        Ok(location) => (StatusCode::SEE_OTHER, [(header::LOCATION, location)]).into_response(),
        Err(e) => {
            tracing::error!(url = %url, error = %e, "Redirect target is not a valid header value");
            (StatusCode::INTERNAL_SERVER_ERROR, "Invalid redirect target").into_response()
        }
    }
}
