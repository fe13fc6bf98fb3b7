//! URL template validation and expansion.
//!
//! # Responsibilities
//! - Validate templates once, when the registry is built
//! - Percent-encode the residual query exactly once
//! - Substitute the encoded query for the placeholder
//!
//! # Design Decisions
//! - Explicit split-and-join substitution, no format machinery
//! - RFC 3986 unreserved characters pass through, everything else is escaped
//!   (space becomes `%20`, never `+`)
//! - A template without a placeholder is valid and expands to itself

use serde::Serialize;
use thiserror::Error;
use url::Url;

/// Marker replaced by the encoded query.
pub const PLACEHOLDER: &str = "{}";

/// Stand-in used when checking that a template forms a valid URL.
const PROBE_VALUE: &str = "probe";

/// Errors detected while validating a URL template.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TemplateError {
    #[error("template '{template}' contains {count} placeholders, expected at most one")]
    TooManyPlaceholders { template: String, count: usize },

    #[error("template '{template}' is not a valid URL: {reason}")]
    InvalidUrl { template: String, reason: String },

    #[error("template '{template}' uses unsupported scheme '{scheme}'")]
    UnsupportedScheme { template: String, scheme: String },
}

/// A validated redirect URL template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct UrlTemplate {
    raw: String,
}

impl UrlTemplate {
    /// Validate a raw template string.
    ///
    /// The template must contain at most one [`PLACEHOLDER`] and, with the
    /// placeholder filled in, parse as an absolute `http` or `https` URL.
    pub fn parse(raw: impl Into<String>) -> Result<Self, TemplateError> {
        let raw = raw.into();

        let count = raw.matches(PLACEHOLDER).count();
        if count > 1 {
            return Err(TemplateError::TooManyPlaceholders { template: raw, count });
        }

        if raw.chars().any(|c| !c.is_ascii_graphic()) {
            return Err(TemplateError::InvalidUrl {
                template: raw,
                reason: "must be printable ASCII without spaces".to_string(),
            });
        }

        let probe = raw.replacen(PLACEHOLDER, PROBE_VALUE, 1);
        let url = match Url::parse(&probe) {
            Ok(url) => url,
            Err(e) => {
                return Err(TemplateError::InvalidUrl {
                    template: raw,
                    reason: e.to_string(),
                })
            }
        };

        match url.scheme() {
            "http" | "https" => Ok(Self { raw }),
            other => Err(TemplateError::UnsupportedScheme {
                scheme: other.to_string(),
                template: raw,
            }),
        }
    }

    /// The template as written in the definition file.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Whether the template substitutes the query at all.
    pub fn has_placeholder(&self) -> bool {
        self.raw.contains(PLACEHOLDER)
    }

    /// Expand the template with `query`, which is percent-encoded first.
    pub fn expand(&self, query: &str) -> String {
        match self.raw.split_once(PLACEHOLDER) {
            Some((head, tail)) => {
                let encoded = encode_query(query);
                let mut url = String::with_capacity(head.len() + encoded.len() + tail.len());
                url.push_str(head);
                url.push_str(&encoded);
                url.push_str(tail);
                url
            }
            None => self.raw.clone(),
        }
    }
}

impl std::fmt::Display for UrlTemplate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.raw)
    }
}

/// Percent-encode a query so it stays a single URL component.
pub fn encode_query(query: &str) -> std::borrow::Cow<'_, str> {
    urlencoding::encode(query)
}
