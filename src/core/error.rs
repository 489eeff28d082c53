//! Errors raised by playgen.
//!
//! Only structural problems surface as [`Error`]. Container shapes that can't
//! be unwrapped, vendor extensions of the wrong type and dangling security
//! references are recoverable; they are logged through `tracing` and the run
//! goes on.
//!
//! ```
//! use playgen::core::error::{Error, Result};
//!
//! fn check_route(path: &str) -> Result<()> {
//!     if path.contains('{') && !path.contains('}') {
//!         return Err(Error::malformed_path("getPet", path, "unclosed '{'"));
//!     }
//!     Ok(())
//! }
//!
//! assert!(check_route("/pet/{petId").is_err());
//! ```

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// A route's placeholder braces are unbalanced, nested or empty
    #[error("Malformed path '{path}' in operation '{operation_id}': {reason}")]
    MalformedPath {
        operation_id: String,
        path: String,
        reason: String,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid TOML: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Missing template or template setup problem
    #[error("Template error: {0}")]
    Template(String),

    #[error("Tera error: {0}")]
    Tera(#[from] tera::Error),

    /// Generator options that can't be used
    #[error("Invalid generator options: {0}")]
    Config(String),
}

impl Error {
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub fn template(msg: impl Into<String>) -> Self {
        Self::Template(msg.into())
    }

    /// Structural route error, tied to the operation that declared the route
    pub fn malformed_path(
        operation_id: impl Into<String>,
        path: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::MalformedPath {
            operation_id: operation_id.into(),
            path: path.into(),
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_malformed_path_message() {
        let err = Error::malformed_path("getPet", "/pet/{petId", "unclosed '{' at byte 5");
        assert_eq!(
            err.to_string(),
            "Malformed path '/pet/{petId' in operation 'getPet': unclosed '{' at byte 5"
        );
        let Error::MalformedPath {
            operation_id, path, ..
        } = err
        else {
            panic!("expected a malformed path error");
        };
        assert_eq!(operation_id, "getPet");
        assert_eq!(path, "/pet/{petId");
    }

    #[test]
    fn test_config_and_template_messages() {
        assert_eq!(
            Error::config("unsupported options file").to_string(),
            "Invalid generator options: unsupported options file"
        );
        assert_eq!(
            Error::template("Template 'routes.tera' not found").to_string(),
            "Template error: Template 'routes.tera' not found"
        );
    }

    #[test]
    fn test_source_conversions() {
        let io: Error = std::io::Error::other("disk gone").into();
        assert!(matches!(io, Error::Io(_)));

        let json: Error = serde_json::from_str::<serde_json::Value>("{")
            .unwrap_err()
            .into();
        assert!(json.to_string().starts_with("Invalid JSON"));

        let yaml: Error = serde_yaml::from_str::<serde_yaml::Value>("a: [")
            .unwrap_err()
            .into();
        assert!(matches!(yaml, Error::Yaml(_)));

        let toml: Error = toml::from_str::<toml::Value>("a = ").unwrap_err().into();
        assert!(matches!(toml, Error::Toml(_)));
    }
}
