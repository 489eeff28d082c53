//! Transformation pipeline from the generic IR to the Play-specific IR.
//!
//! One [`Transformer`] runs per generation run:
//! 1. every operation gets its route normalized and its types simplified
//! 2. every raw security scheme is decorated
//! 3. each operation's security requirements are resolved against the
//!    decorated schemes, narrowing OAuth schemes to the scopes it asks for
//! 4. the artifact plan is assembled from the flags
//!
//! Steps 1 and 2 touch each value independently. Step 3 needs step 2 to be
//! complete.

pub mod artifacts;
pub mod route;
pub mod security;
pub mod shape;

pub use artifacts::{ApiArtifact, ArtifactBinding, ArtifactPlan, SupportingFile};
pub use security::DecoratedSecurityScheme;

use std::collections::BTreeSet;

use serde_json::Value as JsonValue;
use tracing::{debug, info, warn};

use crate::core::config::GenerationFlags;
use crate::core::error::Result;
use crate::core::utils::to_proper_case;
use crate::ir::{ApiIr, Operation, SecurityScheme};

/// API class used for operations the parser didn't assign to a group
pub const DEFAULT_API_CLASS: &str = "Default";

/// Runs the transformation passes for one generation run
#[derive(Debug, Clone)]
pub struct Transformer {
    flags: GenerationFlags,
    primitives: BTreeSet<String>,
}

impl Transformer {
    pub fn new(flags: GenerationFlags) -> Self {
        Self {
            flags,
            primitives: shape::default_primitive_types(),
        }
    }

    /// Replace the primitive type names used to compute `return_type_is_primitive`
    pub fn with_primitives(mut self, primitives: BTreeSet<String>) -> Self {
        self.primitives = primitives;
        self
    }

    pub fn flags(&self) -> &GenerationFlags {
        &self.flags
    }

    /// Normalize the route and simplify the types of a single operation.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::MalformedPath`] if the route's placeholders are malformed.
    pub fn transform_operation(&self, op: &mut Operation) -> Result<()> {
        op.path = route::normalize(&op.operation_id, &op.path)?;
        shape::simplify(op, &self.primitives);
        debug!(
            operation_id = %op.operation_id,
            path = %op.path,
            "Transformed operation"
        );
        Ok(())
    }

    pub fn decorate_schemes(&self, schemes: Vec<SecurityScheme>) -> Vec<DecoratedSecurityScheme> {
        schemes
            .into_iter()
            .map(DecoratedSecurityScheme::decorate)
            .collect()
    }

    /// Fill `auth_methods` from the operation's security requirements.
    ///
    /// OAuth requirements naming scopes get a view narrowed to those scopes;
    /// every other requirement gets the decorated scheme as is. References to
    /// undeclared schemes are skipped.
    pub fn resolve_auth_methods(&self, op: &mut Operation, schemes: &[DecoratedSecurityScheme]) {
        let mut auth_methods = Vec::with_capacity(op.security.len());
        for requirement in &op.security {
            let Some(scheme) = schemes.iter().find(|s| s.name() == requirement.scheme) else {
                warn!(
                    operation_id = %op.operation_id,
                    scheme = %requirement.scheme,
                    "Operation references an undeclared security scheme"
                );
                continue;
            };

            if scheme.base.is_oauth() && !requirement.scopes.is_empty() {
                auth_methods.push(scheme.filter_by_scopes(&requirement.scopes));
            } else {
                auth_methods.push(scheme.clone());
            }
        }
        op.auth_methods = auth_methods;
    }

    /// Run every pass over the parser's IR.
    ///
    /// # Errors
    ///
    /// Fails on the first operation whose route is malformed.
    pub fn run(&self, ir: ApiIr) -> Result<GenerationBundle> {
        let ApiIr {
            mut operations,
            security_schemes,
            document,
        } = ir;

        info!(
            operations = operations.len(),
            security_schemes = security_schemes.len(),
            "Transforming API model"
        );

        for op in &mut operations {
            self.transform_operation(op)?;
        }

        let security_schemes = self.decorate_schemes(security_schemes);
        for op in &mut operations {
            self.resolve_auth_methods(op, &security_schemes);
        }

        let plan = ArtifactPlan::assemble(&self.flags);
        info!(
            supporting_files = plan.supporting_files.len(),
            api_artifacts = plan.api_artifacts.len(),
            "Assembled artifact plan"
        );

        Ok(GenerationBundle {
            flags: self.flags.clone(),
            operations,
            security_schemes,
            plan,
            document,
        })
    }
}

/// The transformed IR plus the artifact plan, ready for rendering
#[derive(Debug, Clone)]
pub struct GenerationBundle {
    pub flags: GenerationFlags,
    pub operations: Vec<Operation>,
    pub security_schemes: Vec<DecoratedSecurityScheme>,
    pub plan: ArtifactPlan,
    pub document: Option<JsonValue>,
}

impl GenerationBundle {
    /// API class name of an operation
    pub fn api_class_of(op: &Operation) -> String {
        let class = to_proper_case(&op.base_name);
        if class.is_empty() {
            DEFAULT_API_CLASS.to_string()
        } else {
            class
        }
    }

    /// Distinct API classes, sorted
    pub fn api_classes(&self) -> Vec<String> {
        self.operations
            .iter()
            .map(Self::api_class_of)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    pub fn operations_for<'a>(&'a self, api_class: &'a str) -> impl Iterator<Item = &'a Operation> {
        self.operations
            .iter()
            .filter(move |op| Self::api_class_of(op) == api_class)
    }

    /// Resolved template-to-output bindings for this run
    pub fn bindings(&self) -> Vec<ArtifactBinding> {
        self.plan.bindings(&self.api_classes())
    }
}
