//! Generator options and the flags resolved from them.
//!
//! [`GeneratorOptions`] is what a user writes (a YAML, TOML or JSON file, or a
//! property map handed over by a host). It is resolved once per generation run
//! into [`GenerationFlags`], which is immutable for the rest of the run.
//!
//! Boolean options are lenient: both `true` and `"true"` are accepted, since
//! hosts frequently pass every option through as a string.
//!
//! # Example
//!
//! ```rust
//! use playgen::core::config::GeneratorOptions;
//!
//! let options: GeneratorOptions =
//!     serde_yaml::from_str("controllerOnly: \"true\"\nwrapCalls: false").unwrap();
//! let flags = options.resolve();
//! assert!(flags.controller_only);
//! assert!(!flags.wrap_calls);
//! assert!(flags.use_interfaces);
//! ```

use std::path::Path;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map as JsonMap, Value as JsonValue, json};
use serde_value::Value as SerdeValue;
use tokio::fs;
use tracing::debug;

use crate::core::error::{Error, Result};

pub const DEFAULT_TITLE: &str = "openapi-java-playframework";
pub const DEFAULT_CONFIG_PACKAGE: &str = "org.openapitools.configuration";
pub const DEFAULT_BASE_PACKAGE: &str = "org.openapitools";
pub const DEFAULT_API_PACKAGE: &str = "controllers";
pub const DEFAULT_MODEL_PACKAGE: &str = "apimodels";

/// User-facing generator options, as read from a configuration source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GeneratorOptions {
    /// Server title name
    pub title: String,
    /// Configuration package for generated code
    pub config_package: String,
    /// Base package for generated code
    pub base_package: String,
    /// Package holding the generated controllers
    pub api_package: String,
    /// Package holding the generated models
    pub model_package: String,
    /// Generate only the route-facing controllers, no implementation stubs
    #[serde(deserialize_with = "deserialize_flag")]
    pub controller_only: bool,
    /// Make the controller implementations implement an interface
    #[serde(deserialize_with = "deserialize_flag")]
    pub use_interfaces: bool,
    /// Emit a centralized error handler
    #[serde(deserialize_with = "deserialize_flag")]
    pub handle_exceptions: bool,
    /// Wrap each controller call (metrics, response rewriting, ...)
    #[serde(deserialize_with = "deserialize_flag")]
    pub wrap_calls: bool,
    /// Serve the API description through a documentation route
    #[serde(rename = "useSwaggerUI", deserialize_with = "deserialize_flag")]
    pub use_swagger_ui: bool,
    /// Generate asynchronous controller signatures
    #[serde(deserialize_with = "deserialize_flag")]
    pub support_async: bool,
    /// Annotate models and parameters with bean validation constraints
    #[serde(deserialize_with = "deserialize_flag")]
    pub use_bean_validation: bool,
}

impl Default for GeneratorOptions {
    fn default() -> Self {
        Self {
            title: DEFAULT_TITLE.to_string(),
            config_package: DEFAULT_CONFIG_PACKAGE.to_string(),
            base_package: DEFAULT_BASE_PACKAGE.to_string(),
            api_package: DEFAULT_API_PACKAGE.to_string(),
            model_package: DEFAULT_MODEL_PACKAGE.to_string(),
            controller_only: false,
            use_interfaces: true,
            handle_exceptions: true,
            wrap_calls: true,
            use_swagger_ui: true,
            support_async: false,
            use_bean_validation: true,
        }
    }
}

impl GeneratorOptions {
    /// Load options from a file. The extension selects the format
    /// (`.yaml`/`.yml`, `.toml` or `.json`).
    ///
    /// # Errors
    ///
    /// Returns an error if the file can't be read, has an unknown extension,
    /// or contains an invalid option value.
    pub async fn load(path: &Path) -> Result<Self> {
        debug!(config_path = %path.display(), "Reading generator options");

        let content = fs::read_to_string(path).await.map_err(|e| {
            Error::config(format!(
                "Failed to read generator options at {}: {}",
                path.display(),
                e
            ))
        })?;

        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);

        let options = match extension.as_deref() {
            Some("yaml") | Some("yml") => serde_yaml::from_str(&content)?,
            Some("toml") => toml::from_str(&content)?,
            Some("json") => serde_json::from_str(&content)?,
            _ => {
                return Err(Error::config(format!(
                    "Unsupported options file format: {}",
                    path.display()
                )));
            }
        };

        Ok(options)
    }

    /// Build options from a loose property map, falling back to defaults
    /// for anything not present.
    pub fn from_properties(properties: &JsonMap<String, JsonValue>) -> Result<Self> {
        Ok(serde_json::from_value(JsonValue::Object(
            properties.clone(),
        ))?)
    }

    /// Freeze the options into the flags used for the rest of the run.
    pub fn resolve(self) -> GenerationFlags {
        GenerationFlags {
            controller_only: self.controller_only,
            use_interfaces: self.use_interfaces,
            handle_exceptions: self.handle_exceptions,
            wrap_calls: self.wrap_calls,
            use_swagger_ui: self.use_swagger_ui,
            support_async: self.support_async,
            use_bean_validation: self.use_bean_validation,
            title: self.title,
            config_package: self.config_package,
            base_package: self.base_package,
            api_package: self.api_package,
            model_package: self.model_package,
        }
    }
}

/// Flags for one generation run, resolved from [`GeneratorOptions`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationFlags {
    pub controller_only: bool,
    pub use_interfaces: bool,
    pub handle_exceptions: bool,
    pub wrap_calls: bool,
    pub use_swagger_ui: bool,
    pub support_async: bool,
    pub use_bean_validation: bool,
    pub title: String,
    pub config_package: String,
    pub base_package: String,
    pub api_package: String,
    pub model_package: String,
}

impl Default for GenerationFlags {
    fn default() -> Self {
        GeneratorOptions::default().resolve()
    }
}

impl GenerationFlags {
    /// The resolved values as template properties, keyed the way templates
    /// expect them, plus the fixed Java toolchain properties.
    pub fn to_properties(&self) -> JsonMap<String, JsonValue> {
        let mut props = JsonMap::new();
        props.insert("title".into(), json!(self.title));
        props.insert("configPackage".into(), json!(self.config_package));
        props.insert("basePackage".into(), json!(self.base_package));
        props.insert("apiPackage".into(), json!(self.api_package));
        props.insert("modelPackage".into(), json!(self.model_package));
        props.insert("controllerOnly".into(), json!(self.controller_only));
        props.insert("useInterfaces".into(), json!(self.use_interfaces));
        props.insert("handleExceptions".into(), json!(self.handle_exceptions));
        props.insert("wrapCalls".into(), json!(self.wrap_calls));
        props.insert("useSwaggerUI".into(), json!(self.use_swagger_ui));
        props.insert("supportAsync".into(), json!(self.support_async));
        props.insert("useBeanValidation".into(), json!(self.use_bean_validation));
        props.insert("java8".into(), json!(true));
        props.insert("javaVersion".into(), json!("1.8"));
        props.insert("jdk8".into(), json!("true"));
        props
    }
}

/// Accept either a boolean or a `"true"`/`"false"` string
fn deserialize_flag<'de, D>(deserializer: D) -> std::result::Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    match SerdeValue::deserialize(deserializer)? {
        SerdeValue::Bool(b) => Ok(b),
        SerdeValue::String(s) => match s.trim().to_ascii_lowercase().as_str() {
            "true" => Ok(true),
            "false" => Ok(false),
            _ => Err(serde::de::Error::custom(format!(
                "Expected a boolean, got '{s}'"
            ))),
        },
        _ => Err(serde::de::Error::custom(
            "Expected a boolean or a \"true\"/\"false\" string",
        )),
    }
}
