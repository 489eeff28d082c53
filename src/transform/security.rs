//! Security scheme decoration.
//!
//! The Play templates need two token-validation endpoints that the base
//! security IR doesn't model. They come from vendor extensions on the scheme
//! (`x-jwksUrl`, `x-tokenIntrospectUrl`) and are lifted onto a
//! [`DecoratedSecurityScheme`] once, when the scheme is decorated.

use std::fmt;

use serde::Serialize;
use serde_json::Value as JsonValue;
use tracing::warn;

use crate::ir::SecurityScheme;

pub const JWKS_URL_EXTENSION: &str = "x-jwksUrl";
pub const TOKEN_INTROSPECT_URL_EXTENSION: &str = "x-tokenIntrospectUrl";

/// A security scheme plus the token-validation endpoints used by the
/// generated security utilities.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DecoratedSecurityScheme {
    #[serde(flatten)]
    pub base: SecurityScheme,
    pub jwks_url: Option<String>,
    pub token_introspect_url: Option<String>,
}

impl DecoratedSecurityScheme {
    /// Wrap a raw scheme, reading the endpoint URLs from its vendor extensions.
    ///
    /// Extensions that are missing or not strings leave the URL unset.
    pub fn decorate(raw: SecurityScheme) -> Self {
        let jwks_url = string_extension(&raw, JWKS_URL_EXTENSION);
        let token_introspect_url = string_extension(&raw, TOKEN_INTROSPECT_URL_EXTENSION);
        Self {
            base: raw,
            jwks_url,
            token_introspect_url,
        }
    }

    /// Restrict the scheme to the named scopes.
    ///
    /// The base scheme builds the restricted copy; the endpoint URLs are then
    /// carried over from `self`, since the base copy knows nothing about them.
    pub fn filter_by_scopes(&self, names: &[String]) -> Self {
        Self {
            base: self.base.filter_by_scopes(names),
            jwks_url: self.jwks_url.clone(),
            token_introspect_url: self.token_introspect_url.clone(),
        }
    }

    pub fn name(&self) -> &str {
        &self.base.name
    }
}

fn string_extension(raw: &SecurityScheme, key: &str) -> Option<String> {
    match raw.vendor_extensions.get(key)? {
        JsonValue::String(url) => Some(url.clone()),
        other => {
            warn!(
                scheme = %raw.name,
                extension = key,
                value = %other,
                "Ignoring non-string security extension"
            );
            None
        }
    }
}

impl fmt::Display for DecoratedSecurityScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}, jwksUrl='{}', tokenIntrospectUrl='{}'",
            self.base,
            self.jwks_url.as_deref().unwrap_or("null"),
            self.token_introspect_url.as_deref().unwrap_or("null"),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::{OAuthScope, SecuritySchemeKind};
    use serde_json::json;
    use std::collections::hash_map::DefaultHasher;
    use std::hash::{Hash, Hasher};
    use tracing_test::traced_test;

    fn oauth_scheme(extensions: JsonValue) -> SecurityScheme {
        let mut scheme = SecurityScheme::new(
            "petstore_auth",
            SecuritySchemeKind::OAuth2 {
                flow: Some("accessCode".into()),
                authorization_url: Some("https://auth.example.com/authorize".into()),
                token_url: Some("https://auth.example.com/token".into()),
                refresh_url: None,
            },
        );
        scheme.scopes = ["read:pets", "write:pets", "admin"]
            .into_iter()
            .map(|name| OAuthScope {
                name: name.into(),
                description: None,
            })
            .collect();
        scheme.vendor_extensions = serde_json::from_value(extensions).unwrap();
        scheme
    }

    fn hash_of<T: Hash>(value: &T) -> u64 {
        let mut hasher = DefaultHasher::new();
        value.hash(&mut hasher);
        hasher.finish()
    }

    #[test]
    fn test_decorate_reads_extensions() {
        let decorated = DecoratedSecurityScheme::decorate(oauth_scheme(json!({
            "x-jwksUrl": "https://auth.example.com/jwks",
            "x-tokenIntrospectUrl": "https://auth.example.com/introspect"
        })));
        assert_eq!(
            decorated.jwks_url.as_deref(),
            Some("https://auth.example.com/jwks")
        );
        assert_eq!(
            decorated.token_introspect_url.as_deref(),
            Some("https://auth.example.com/introspect")
        );
        assert_eq!(decorated.name(), "petstore_auth");
    }

    #[test]
    fn test_missing_extensions_stay_unset() {
        let decorated = DecoratedSecurityScheme::decorate(oauth_scheme(json!({})));
        assert_eq!(decorated.jwks_url, None);
        assert_eq!(decorated.token_introspect_url, None);
    }

    #[test]
    fn test_empty_string_is_not_absent() {
        let decorated = DecoratedSecurityScheme::decorate(oauth_scheme(json!({
            "x-jwksUrl": ""
        })));
        assert_eq!(decorated.jwks_url.as_deref(), Some(""));
        assert_eq!(decorated.token_introspect_url, None);
    }

    #[traced_test]
    #[test]
    fn test_non_string_extension_is_ignored() {
        let decorated = DecoratedSecurityScheme::decorate(oauth_scheme(json!({
            "x-jwksUrl": 42,
            "x-tokenIntrospectUrl": {"url": "https://auth.example.com/introspect"}
        })));
        assert_eq!(decorated.jwks_url, None);
        assert_eq!(decorated.token_introspect_url, None);
        assert!(logs_contain("Ignoring non-string security extension"));
    }

    #[test]
    fn test_filter_by_scopes_carries_urls_forward() {
        let parent = DecoratedSecurityScheme::decorate(oauth_scheme(json!({
            "x-jwksUrl": "u1",
            "x-tokenIntrospectUrl": "u2"
        })));

        for scopes in [vec![], vec!["read:pets"], vec!["read:pets", "admin"]] {
            let names: Vec<String> = scopes.iter().map(|s| s.to_string()).collect();
            let derived = parent.filter_by_scopes(&names);
            assert_eq!(derived.jwks_url.as_deref(), Some("u1"));
            assert_eq!(derived.token_introspect_url.as_deref(), Some("u2"));
            assert_eq!(derived.base.scopes.len(), names.len());
        }
    }

    #[test]
    fn test_equality_includes_urls() {
        let a = DecoratedSecurityScheme::decorate(oauth_scheme(json!({"x-jwksUrl": "u1"})));
        let b = DecoratedSecurityScheme::decorate(oauth_scheme(json!({"x-jwksUrl": "u1"})));
        assert_eq!(a, b);
        assert_eq!(hash_of(&a), hash_of(&b));

        let mut c = b.clone();
        c.jwks_url = Some("u2".into());
        assert_ne!(a, c);

        let mut d = b.clone();
        d.token_introspect_url = Some("u3".into());
        assert_ne!(a, d);
    }

    #[test]
    fn test_equality_includes_base_fields() {
        let a = DecoratedSecurityScheme::decorate(oauth_scheme(json!({"x-jwksUrl": "u1"})));
        let narrowed = a.filter_by_scopes(&["read:pets".to_string()]);
        assert_ne!(a, narrowed);
    }

    #[test]
    fn test_display_appends_urls() {
        let decorated = DecoratedSecurityScheme::decorate(oauth_scheme(json!({"x-jwksUrl": "u1"})));
        let text = decorated.to_string();
        assert!(text.starts_with("name='petstore_auth', type='oauth2'"));
        assert!(text.ends_with(", jwksUrl='u1', tokenIntrospectUrl='null'"));
    }

    #[test]
    fn test_serialize_flattens_base() {
        let decorated = DecoratedSecurityScheme::decorate(oauth_scheme(json!({"x-jwksUrl": "u1"})));
        let value = serde_json::to_value(&decorated).unwrap();
        assert_eq!(value["name"], "petstore_auth");
        assert_eq!(value["type"], "oauth2");
        assert_eq!(value["jwksUrl"], "u1");
        assert_eq!(value["tokenIntrospectUrl"], JsonValue::Null);
    }
}
