//! Bang registry.
//!
//! # Responsibilities
//! - Validate bang definitions and the default engine template
//! - Index entries by token for O(1) lookup
//! - Expose the full entry set for listing
//!
//! # Design Decisions
//! - Immutable after construction (thread-safe without locks)
//! - Duplicate tokens: first registered wins, later ones are shadowed
//! - Strict mode turns a duplicate into a build error
//! - Index stores positions into `entries`, so the two cannot drift apart

use std::collections::HashMap;

use thiserror::Error;

use crate::bang::entry::{BangDefinition, BangEntry};
use crate::bang::template::{TemplateError, UrlTemplate};

/// Errors raised while building a registry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("bang for '{url}' has an empty token")]
    EmptyToken { url: String },

    #[error("bang token '{token}' contains whitespace")]
    InvalidToken { token: String },

    #[error("bang '{token}': {source}")]
    Template {
        token: String,
        #[source]
        source: TemplateError,
    },

    #[error("default engine: {0}")]
    DefaultTemplate(#[source] TemplateError),

    #[error("duplicate bang '{token}': '{shadowed}' conflicts with '{kept}'")]
    Duplicate {
        token: String,
        kept: String,
        shadowed: String,
    },
}

/// Immutable table of bangs.
#[derive(Debug, Clone)]
pub struct Registry {
    entries: Vec<BangEntry>,
    by_token: HashMap<String, usize>,
    default_template: UrlTemplate,
    shadowed: Vec<BangEntry>,
}

impl Registry {
    /// Build a registry, shadowing duplicate tokens (first registered wins).
    pub fn build<I>(default_template: &str, definitions: I) -> Result<Self, RegistryError>
    where
        I: IntoIterator<Item = BangDefinition>,
    {
        Self::build_inner(default_template, definitions, false)
    }

    /// Build a registry, rejecting duplicate tokens.
    pub fn build_strict<I>(default_template: &str, definitions: I) -> Result<Self, RegistryError>
    where
        I: IntoIterator<Item = BangDefinition>,
    {
        Self::build_inner(default_template, definitions, true)
    }

    fn build_inner<I>(
        default_template: &str,
        definitions: I,
        strict: bool,
    ) -> Result<Self, RegistryError>
    where
        I: IntoIterator<Item = BangDefinition>,
    {
        let default_template =
            UrlTemplate::parse(default_template).map_err(RegistryError::DefaultTemplate)?;

        let mut entries: Vec<BangEntry> = Vec::new();
        let mut by_token = HashMap::new();
        let mut shadowed = Vec::new();

        for def in definitions {
            let entry = BangEntry::from_definition(def)?;

            if let Some(&idx) = by_token.get(entry.token()) {
                let kept: &BangEntry = &entries[idx];
                if strict {
                    return Err(RegistryError::Duplicate {
                        token: entry.token().to_string(),
                        kept: kept.template().to_string(),
                        shadowed: entry.template().to_string(),
                    });
                }
                tracing::warn!(
                    bang = %entry.token(),
                    kept = %kept.template(),
                    shadowed = %entry.template(),
                    "Duplicate bang, keeping the first definition"
                );
                shadowed.push(entry);
                continue;
            }

            by_token.insert(entry.token().to_string(), entries.len());
            entries.push(entry);
        }

        Ok(Self {
            entries,
            by_token,
            default_template,
            shadowed,
        })
    }

    /// Look up a bang by its token (without the marker).
    pub fn lookup(&self, token: &str) -> Option<&BangEntry> {
        self.by_token.get(token).map(|&idx| &self.entries[idx])
    }

    /// All entries in registration order.
    pub fn all(&self) -> &[BangEntry] {
        &self.entries
    }

    /// Entries dropped by the duplicate policy.
    pub fn shadowed(&self) -> &[BangEntry] {
        &self.shadowed
    }

    pub fn default_template(&self) -> &UrlTemplate {
        &self.default_template
    }

    /// Build the default engine URL for input without a bang.
    pub fn default_url(&self, query: &str) -> String {
        self.default_template.expand(query)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
