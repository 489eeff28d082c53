//! Operation IR as handed over by the API description parser.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use tracing::debug;

use super::parameter::{Parameter, SharedParameter};
use crate::transform::security::DecoratedSecurityScheme;

/// Generic container wrappers recognized around a return type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ContainerKind {
    List,
    Map,
    Set,
}

impl ContainerKind {
    /// Returns the container name as a string slice
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::List => "List",
            Self::Map => "Map",
            Self::Set => "Set",
        }
    }

    /// Returns an iterator over all recognized containers
    pub fn all() -> impl Iterator<Item = Self> {
        [Self::List, Self::Map, Self::Set].into_iter()
    }
}

impl fmt::Display for ContainerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One entry of an operation's security requirement list
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SecurityRequirement {
    /// Name of the referenced security scheme
    pub scheme: String,
    /// OAuth scopes the operation needs; empty for non-OAuth schemes
    #[serde(default)]
    pub scopes: Vec<String>,
}

/// One API endpoint
///
/// Cloning deep-copies the parameters and rebuilds the `form_params`
/// aliasing inside the copy, so the clone and the original never share a
/// parameter record.
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "OperationRecord")]
pub struct Operation {
    pub operation_id: String,
    pub http_method: String,
    /// Route template, e.g. `/pet/{petId}` before normalization
    pub path: String,
    /// API group the operation belongs to (one controller per group)
    pub base_name: String,
    pub summary: Option<String>,
    pub notes: Option<String>,
    pub all_params: Vec<SharedParameter>,
    pub form_params: Vec<SharedParameter>,
    pub return_type: Option<String>,
    pub return_container: Option<ContainerKind>,
    pub return_type_is_primitive: bool,
    pub security: Vec<SecurityRequirement>,
    /// Decorated schemes resolved from `security`, filled in by the transformer
    pub auth_methods: Vec<DecoratedSecurityScheme>,
    pub vendor_extensions: BTreeMap<String, JsonValue>,
}

impl Operation {
    pub fn new(
        operation_id: impl Into<String>,
        http_method: impl Into<String>,
        path: impl Into<String>,
    ) -> Self {
        Self {
            operation_id: operation_id.into(),
            http_method: http_method.into(),
            path: path.into(),
            ..Default::default()
        }
    }

    /// Add a parameter. Form parameters are listed in both `all_params`
    /// and `form_params` through the same handle.
    pub fn with_param(mut self, param: Parameter) -> Self {
        let is_form = param.is_form_param;
        let handle = SharedParameter::new(param);
        if is_form {
            self.form_params.push(handle.clone());
        }
        self.all_params.push(handle);
        self
    }

    pub fn with_return_type(mut self, return_type: impl Into<String>) -> Self {
        self.return_type = Some(return_type.into());
        self
    }

    pub fn with_base_name(mut self, base_name: impl Into<String>) -> Self {
        self.base_name = base_name.into();
        self
    }

    pub fn with_security(mut self, scheme: impl Into<String>, scopes: &[&str]) -> Self {
        self.security.push(SecurityRequirement {
            scheme: scheme.into(),
            scopes: scopes.iter().map(|s| s.to_string()).collect(),
        });
        self
    }
}

impl Clone for Operation {
    fn clone(&self) -> Self {
        let all_params: Vec<SharedParameter> = self
            .all_params
            .iter()
            .map(|param| SharedParameter::new(param.snapshot()))
            .collect();

        let form_params = self
            .form_params
            .iter()
            .map(|form| {
                match self.all_params.iter().position(|param| param.ptr_eq(form)) {
                    Some(idx) => all_params[idx].clone(),
                    None => SharedParameter::new(form.snapshot()),
                }
            })
            .collect();

        Self {
            operation_id: self.operation_id.clone(),
            http_method: self.http_method.clone(),
            path: self.path.clone(),
            base_name: self.base_name.clone(),
            summary: self.summary.clone(),
            notes: self.notes.clone(),
            all_params,
            form_params,
            return_type: self.return_type.clone(),
            return_container: self.return_container,
            return_type_is_primitive: self.return_type_is_primitive,
            security: self.security.clone(),
            auth_methods: self.auth_methods.clone(),
            vendor_extensions: self.vendor_extensions.clone(),
        }
    }
}

/// Wire shape of an operation: the parser serializes `allParams` and
/// `formParams` as independent lists. The derived return fields are not read
/// from input; the simplifier owns them.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct OperationRecord {
    operation_id: String,
    http_method: String,
    path: String,
    base_name: String,
    summary: Option<String>,
    notes: Option<String>,
    all_params: Vec<Parameter>,
    form_params: Vec<Parameter>,
    return_type: Option<String>,
    security: Vec<SecurityRequirement>,
    vendor_extensions: BTreeMap<String, JsonValue>,
}

impl From<OperationRecord> for Operation {
    /// Re-link each form parameter to its `allParams` entry so both lists
    /// share one record.
    fn from(record: OperationRecord) -> Self {
        let all_params: Vec<SharedParameter> = record
            .all_params
            .into_iter()
            .map(SharedParameter::new)
            .collect();

        let form_params = record
            .form_params
            .into_iter()
            .map(|form| {
                let linked = all_params.iter().find(|candidate| {
                    let candidate = candidate.lock();
                    candidate.is_form_param && candidate.base_name == form.base_name
                });
                match linked {
                    Some(handle) => handle.clone(),
                    None => {
                        debug!(
                            operation_id = %record.operation_id,
                            param = %form.base_name,
                            "Form parameter has no allParams counterpart"
                        );
                        SharedParameter::new(form)
                    }
                }
            })
            .collect();

        Self {
            operation_id: record.operation_id,
            http_method: record.http_method,
            path: record.path,
            base_name: record.base_name,
            summary: record.summary,
            notes: record.notes,
            all_params,
            form_params,
            return_type: record.return_type,
            return_container: None,
            return_type_is_primitive: false,
            security: record.security,
            auth_methods: Vec::new(),
            vendor_extensions: record.vendor_extensions,
        }
    }
}
