//! Security scheme IR produced by the API description parser.

use std::collections::BTreeMap;
use std::fmt;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

/// API key location
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApiKeyLocation {
    Query,
    Header,
    Cookie,
}

/// Mechanism-specific part of a security scheme
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum SecuritySchemeKind {
    ApiKey {
        key_param_name: String,
        location: ApiKeyLocation,
    },
    Http {
        scheme: String,
        bearer_format: Option<String>,
    },
    #[serde(rename = "oauth2")]
    OAuth2 {
        flow: Option<String>,
        authorization_url: Option<String>,
        token_url: Option<String>,
        refresh_url: Option<String>,
    },
    OpenIdConnect {
        open_id_connect_url: String,
    },
}

impl SecuritySchemeKind {
    /// Returns the OpenAPI type name of the mechanism
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ApiKey { .. } => "apiKey",
            Self::Http { .. } => "http",
            Self::OAuth2 { .. } => "oauth2",
            Self::OpenIdConnect { .. } => "openIdConnect",
        }
    }
}

/// OAuth scope
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OAuthScope {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

/// One authentication/authorization mechanism declared by the API description
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SecurityScheme {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(flatten)]
    pub kind: SecuritySchemeKind,
    #[serde(default)]
    pub scopes: Vec<OAuthScope>,
    #[serde(default)]
    pub vendor_extensions: BTreeMap<String, JsonValue>,
}

impl SecurityScheme {
    pub fn new(name: impl Into<String>, kind: SecuritySchemeKind) -> Self {
        Self {
            name: name.into(),
            description: None,
            kind,
            scopes: Vec::new(),
            vendor_extensions: BTreeMap::new(),
        }
    }

    pub fn is_oauth(&self) -> bool {
        matches!(self.kind, SecuritySchemeKind::OAuth2 { .. })
    }

    /// Build a new scheme restricted to the named scopes.
    ///
    /// Every other field is copied; scopes keep their declaration order and
    /// names not declared by the scheme are ignored.
    pub fn filter_by_scopes(&self, names: &[String]) -> SecurityScheme {
        SecurityScheme {
            name: self.name.clone(),
            description: self.description.clone(),
            kind: self.kind.clone(),
            scopes: self
                .scopes
                .iter()
                .filter(|scope| names.iter().any(|n| *n == scope.name))
                .cloned()
                .collect(),
            vendor_extensions: self.vendor_extensions.clone(),
        }
    }
}

impl Hash for SecurityScheme {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
        self.description.hash(state);
        self.kind.hash(state);
        self.scopes.hash(state);
        // serde_json::Value has no Hash; its canonical text stands in for it
        for (key, value) in &self.vendor_extensions {
            key.hash(state);
            value.to_string().hash(state);
        }
    }
}

impl fmt::Display for SecurityScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let scopes: Vec<&str> = self.scopes.iter().map(|s| s.name.as_str()).collect();
        write!(
            f,
            "name='{}', type='{}', scopes=[{}]",
            self.name,
            self.kind.as_str(),
            scopes.join(", ")
        )
    }
}
