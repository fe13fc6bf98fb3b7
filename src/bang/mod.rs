//! Bang resolution subsystem.
//!
//! # Data Flow
//! ```text
//! Raw query ("!g rust spec")
//!     → parser.rs (split into bang token + residual query)
//!     → resolver.rs (registry lookup, classify outcome)
//!     → template.rs (percent-encode residual, expand URL template)
//!     → Return: redirect URL, unknown bang, or no-bang fallback
//!
//! Registry Compilation (at startup / reload):
//!     BangDefinition[]
//!     → Validate tokens and templates
//!     → Apply duplicate policy (first registered wins)
//!     → Freeze as immutable Registry
//! ```
//!
//! # Design Decisions
//! - Registry built once, immutable afterwards (shared without locks)
//! - Outcomes are enums, "no bang" and "unknown bang" never conflated
//! - Templates validated at build time so per-request expansion cannot fail
//! - No global state: the registry is handed to every caller explicitly

pub mod entry;
pub mod parser;
pub mod registry;
pub mod resolver;
pub mod template;

pub use entry::{BangDefinition, BangEntry};
pub use parser::{parse, ParsedInput, BANG_MARKER};
pub use registry::{Registry, RegistryError};
pub use resolver::{Outcome, Resolution, Resolver};
pub use template::{UrlTemplate, PLACEHOLDER};
