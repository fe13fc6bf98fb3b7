//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! service config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → ServiceConfig (validated, immutable)
//!
//! bang definition source (TOML file or URL)
//!     → loader.rs (fetch & deserialize BangFile)
//!     → Registry::build (token/template checks, duplicate policy)
//!     → Arc<Registry> shared with the HTTP layer
//!
//! On file change (watch mode):
//!     watcher.rs detects change
//!     → loader.rs reloads and rebuilds the registry
//!     → new registry sent to the server
//!     → atomic swap of Arc<Registry>
//! ```
//!
//! # Design Decisions
//! - Service config is immutable once loaded
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;
pub mod watcher;

pub use schema::BangFile;
pub use schema::ListenerConfig;
pub use schema::ObservabilityConfig;
pub use schema::RegistryConfig;
pub use schema::ServiceConfig;
