//! Request handlers.
//!
//! # Routes
//! - `GET /?q=<query>`: free-text form, bang anywhere in the query
//! - `GET /{bang}/{*query}`: path form
//! - `GET /{bang}`, `GET /{bang}/`: path form without a query, rejected with 400
//! - `GET /list`: every registered bang as JSON
//! - `GET /health`: liveness plus registry size

use std::time::Instant;

use axum::{
    extract::{rejection::QueryRejection, Path, Query, State},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::bang::{BangEntry, Outcome, Registry, Resolver};
use crate::http::request::SearchParams;
use crate::http::response::{redirect, SearchError};
use crate::http::server::AppState;
use crate::observability::metrics;

#[derive(Debug, Serialize)]
pub struct HealthStatus {
    pub status: &'static str,
    pub bangs: usize,
}

/// Free-text form: `/?q=!g+rust`.
pub async fn search_by_query(
    State(state): State<AppState>,
    params: Result<Query<SearchParams>, QueryRejection>,
) -> Response {
    let start = Instant::now();

    let Query(params) = match params {
        Ok(params) => params,
        Err(e) => {
            tracing::warn!(error = %e, "Malformed query string");
            return reject(SearchError::InvalidQuery, start);
        }
    };

    let Some(query) = params.query() else {
        tracing::warn!(q = ?params.q, "No query provided for search");
        return reject(SearchError::EmptyQuery, start);
    };

    let registry = state.registry();
    let outcome = Resolver::new(&registry).outcome(query);
    respond(&state, &registry, outcome, start)
}

/// Path form: `/g/rust`. Path segments arrive percent-decoded.
pub async fn search_by_path(
    State(state): State<AppState>,
    Path((bang, query)): Path<(String, String)>,
) -> Response {
    let start = Instant::now();

    let bang = bang.trim();
    if bang.is_empty() {
        tracing::warn!("No bang provided for search");
        return reject(SearchError::EmptyBang, start);
    }

    let query = query.trim();
    if query.is_empty() {
        tracing::warn!(bang = %bang, "No query provided for search");
        return reject(SearchError::EmptyQuery, start);
    }

    let registry = state.registry();
    let outcome = Resolver::new(&registry).outcome_for_token(bang, query);
    respond(&state, &registry, outcome, start)
}

/// Path form with nothing after the bang: `/g` or `/g/`.
///
/// The catch-all in `/{bang}/{*query}` never matches an empty remainder, so
/// these routes exist to report a missing query instead of an unknown route.
pub async fn search_without_query(Path(bang): Path<String>) -> Response {
    let start = Instant::now();
    tracing::warn!(bang = %bang.trim(), "No query provided for search");
    reject(SearchError::EmptyQuery, start)
}

/// All registered bangs, in registration order.
pub async fn list_all(State(state): State<AppState>) -> Json<Vec<BangEntry>> {
    Json(state.registry().all().to_vec())
}

pub async fn health(State(state): State<AppState>) -> Json<HealthStatus> {
    Json(HealthStatus {
        status: "ok",
        bangs: state.registry().len(),
    })
}

fn respond(state: &AppState, registry: &Registry, outcome: Outcome, start: Instant) -> Response {
    match outcome {
        Outcome::Redirect(url) => {
            tracing::debug!(target_url = %url, "Redirecting to bang");
            metrics::record_resolution(metrics::OUTCOME_REDIRECT, start);
            redirect(&url)
        }
        Outcome::Fallback(original) => {
            if !state.allow_no_bang {
                tracing::debug!(query = %original, "No bang found and default search disabled");
                return reject(SearchError::NoBangDisabled, start);
            }
            tracing::debug!(query = %original, "No bang found in input, forwarding to default");
            metrics::record_resolution(metrics::OUTCOME_FALLBACK, start);
            redirect(&registry.default_url(&original))
        }
        Outcome::NotFound(token) => {
            tracing::warn!(bang = %token, "Unknown bang");
            reject(SearchError::UnknownBang(token), start)
        }
    }
}

fn reject(error: SearchError, start: Instant) -> Response {
    metrics::record_resolution(error.outcome(), start);
    error.into_response()
}
