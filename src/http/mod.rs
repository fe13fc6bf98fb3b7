//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware, graceful shutdown)
//!     → request.rs (request ID, query parameters)
//!     → handlers.rs (free-text form, path form, listing)
//!     → bang::Resolver (parse, look up, expand)
//!     → response.rs (303 redirect or typed error response)
//!     → Send to client
//! ```

pub mod handlers;
pub mod request;
pub mod response;
pub mod server;

pub use request::{SearchParams, X_REQUEST_ID};
pub use response::SearchError;
pub use server::{AppState, HttpServer};
