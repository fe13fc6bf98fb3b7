//! Bang entry types.

use serde::{Deserialize, Serialize};

use crate::bang::parser::BANG_MARKER;
use crate::bang::registry::RegistryError;
use crate::bang::template::UrlTemplate;

/// A bang as written in a definition file, before validation.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct BangDefinition {
    /// Shortcut token, with or without the leading marker.
    pub bang: String,

    /// Redirect URL template.
    pub url: String,

    /// Display name.
    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub category: Option<String>,
}

impl BangDefinition {
    pub fn new(bang: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            bang: bang.into(),
            url: url.into(),
            name: None,
            description: None,
            category: None,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }
}

/// A validated, immutable registry entry.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct BangEntry {
    #[serde(rename = "bang")]
    token: String,

    #[serde(rename = "url")]
    template: UrlTemplate,

    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    category: Option<String>,
}

impl BangEntry {
    /// Validate a definition.
    ///
    /// The token is trimmed and a single leading marker is dropped, so `!g`
    /// and `g` register the same bang.
    pub fn from_definition(def: BangDefinition) -> Result<Self, RegistryError> {
        let trimmed = def.bang.trim();
        let token = trimmed.strip_prefix(BANG_MARKER).unwrap_or(trimmed);

        if token.is_empty() {
            return Err(RegistryError::EmptyToken { url: def.url });
        }
        if token.chars().any(char::is_whitespace) {
            return Err(RegistryError::InvalidToken {
                token: token.to_string(),
            });
        }

        let template = UrlTemplate::parse(def.url).map_err(|source| RegistryError::Template {
            token: token.to_string(),
            source,
        })?;

        Ok(Self {
            token: token.to_string(),
            template,
            name: def.name,
            description: def.description,
            category: def.category,
        })
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    pub fn template(&self) -> &UrlTemplate {
        &self.template
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }

    /// Build the redirect URL for a residual query.
    pub fn build_url(&self, query: &str) -> String {
        self.template.expand(query)
    }
}
