//! Template context built from a transformed [`GenerationBundle`].
//!
//! Supporting files see the whole run; API templates additionally see
//! `classname` and only their own class's `operations`.

use serde::Serialize;
use serde_json::{Map as JsonMap, Value as JsonValue};
use tera::Context;

use crate::core::error::Result;
use crate::ir::Operation;
use crate::transform::GenerationBundle;

pub const GENERATOR_NAME: &str = "java-play-framework";
pub const GENERATOR_KIND: &str = "server";

/// Play-specific type mappings (API description type to Java type)
pub fn type_mappings() -> JsonMap<String, JsonValue> {
    [
        ("date", "LocalDate"),
        ("DateTime", "OffsetDateTime"),
        ("file", "InputStream"),
    ]
    .into_iter()
    .map(|(from, to)| (from.to_string(), JsonValue::String(to.to_string())))
    .collect()
}

/// Imports required by the mapped Java types
pub fn import_mappings() -> JsonMap<String, JsonValue> {
    [
        ("LocalDate", "java.time.LocalDate"),
        ("OffsetDateTime", "java.time.OffsetDateTime"),
        ("InputStream", "java.io.InputStream"),
    ]
    .into_iter()
    .map(|(ty, import)| (ty.to_string(), JsonValue::String(import.to_string())))
    .collect()
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ApiGroup<'a> {
    classname: &'a str,
    operations: Vec<&'a Operation>,
}

/// Context shared by every template of the run
pub fn global_context(bundle: &GenerationBundle) -> Result<Context> {
    let mut context = Context::from_serialize(JsonValue::Object(bundle.flags.to_properties()))?;

    let classes = bundle.api_classes();
    let apis: Vec<ApiGroup<'_>> = classes
        .iter()
        .map(|class| ApiGroup {
            classname: class,
            operations: bundle.operations_for(class).collect(),
        })
        .collect();

    let openapi_json = match &bundle.document {
        Some(doc) => serde_json::to_string_pretty(doc)?,
        None => "{}".to_string(),
    };

    context.insert("generatorName", GENERATOR_NAME);
    context.insert("generatorType", GENERATOR_KIND);
    context.insert("apis", &apis);
    context.insert("authMethods", &bundle.security_schemes);
    context.insert("hasAuthMethods", &!bundle.security_schemes.is_empty());
    context.insert("typeMapping", &type_mappings());
    context.insert("importMapping", &import_mappings());
    context.insert("openapiJson", &openapi_json);
    Ok(context)
}

/// Context for one API class: the global context plus the class's operations
pub fn api_context(bundle: &GenerationBundle, global: &Context, api_class: &str) -> Context {
    let operations: Vec<&Operation> = bundle.operations_for(api_class).collect();
    let mut context = global.clone();
    context.insert("classname", api_class);
    context.insert("operations", &operations);
    context
}
