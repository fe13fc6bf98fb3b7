//! Resolution of parsed input against the registry.
//!
//! # Responsibilities
//! - Bridge parser output to registry lookup
//! - Classify every query as no-bang, unknown bang, or known bang
//! - Turn a classification into a redirect outcome
//!
//! # Design Decisions
//! - Borrows the registry; callers choose which snapshot to resolve against
//! - The no-bang case carries nothing: the caller still holds the original input

use crate::bang::entry::BangEntry;
use crate::bang::parser::{parse, ParsedInput};
use crate::bang::registry::Registry;

/// Classification of a query against a registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution<'r> {
    /// No bang in the input; forward the original input to the default engine.
    NoBang,
    /// A bang was given but nothing is registered under it.
    Unknown { token: String },
    /// A registered bang, with the query left after removing it.
    Known {
        entry: &'r BangEntry,
        residual: String,
    },
}

/// What the transport should do with a query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Redirect to the bang's expanded URL.
    Redirect(String),
    /// Report the unknown bang.
    NotFound(String),
    /// No bang; the original query for the default engine.
    Fallback(String),
}

/// Resolves queries against one registry snapshot.
#[derive(Debug, Clone, Copy)]
pub struct Resolver<'r> {
    registry: &'r Registry,
}

impl<'r> Resolver<'r> {
    pub fn new(registry: &'r Registry) -> Self {
        Self { registry }
    }

    /// Resolve free-text input such as `"!g rust"`.
    pub fn resolve(&self, input: &str) -> Resolution<'r> {
        match parse(input) {
            ParsedInput::NoBang => Resolution::NoBang,
            ParsedInput::Bang { token, residual } => self.resolve_token(token, residual),
        }
    }

    /// Resolve an explicit token and query, as given by the path form.
    ///
    /// Never yields [`Resolution::NoBang`].
    pub fn resolve_token(&self, token: &str, query: impl Into<String>) -> Resolution<'r> {
        match self.registry.lookup(token) {
            Some(entry) => Resolution::Known {
                entry,
                residual: query.into(),
            },
            None => Resolution::Unknown {
                token: token.to_string(),
            },
        }
    }

    /// Resolve free-text input and build the redirect target.
    pub fn outcome(&self, input: &str) -> Outcome {
        Self::finish(self.resolve(input), input)
    }

    /// Resolve the path form and build the redirect target.
    pub fn outcome_for_token(&self, token: &str, query: &str) -> Outcome {
        Self::finish(self.resolve_token(token, query), query)
    }

    fn finish(resolution: Resolution<'_>, original: &str) -> Outcome {
        match resolution {
            Resolution::NoBang => Outcome::Fallback(original.to_string()),
            Resolution::Unknown { token } => Outcome::NotFound(token),
            Resolution::Known { entry, residual } => Outcome::Redirect(entry.build_url(&residual)),
        }
    }
}
