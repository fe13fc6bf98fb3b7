//! Bang shortcut resolver.
//!
//! Turns search-box input such as `!g rust spec` into a redirect to the
//! matching search engine, and forwards input without a bang to a default
//! engine.

pub mod bang;
pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;

pub use bang::{Registry, Resolver};
pub use config::schema::ServiceConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
