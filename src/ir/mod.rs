//! Generator-agnostic intermediate representation handed over by the parser.
//!
//! The transformer rewrites these values in place; it never parses or
//! validates an API description itself.

pub mod operation;
pub mod parameter;
pub mod security;

pub use operation::{ContainerKind, Operation, SecurityRequirement};
pub use parameter::{Parameter, SharedParameter};
pub use security::{ApiKeyLocation, OAuthScope, SecurityScheme, SecuritySchemeKind};

use serde::Deserialize;
use serde_json::Value as JsonValue;

/// Everything the parser hands over for one generation run
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ApiIr {
    pub operations: Vec<Operation>,
    pub security_schemes: Vec<SecurityScheme>,
    /// The parsed API description, exported verbatim for the documentation route
    pub document: Option<JsonValue>,
}
