//! Type-shape simplification for operation return types and file uploads.
//!
//! Templates render a container and its element type separately, so a return
//! type such as `List<Pet>` is split into the container tag `List` and the
//! element type `Pet`. For `Map<K, V>` only the value type is kept.
//!
//! Container expressions are parsed by bracket depth, so nested generics
//! unwrap one level cleanly: `List<Map<String, Pet>>` becomes a `List` of
//! `Map<String, Pet>`. Only the outermost container is removed.

use std::collections::BTreeSet;

use serde_json::Value as JsonValue;
use tracing::{debug, warn};

use crate::ir::{ContainerKind, Operation};

/// Play's type for an uploaded multipart file part
pub const MULTIPART_FILE_TYPE: &str = "Http.MultipartFormData.FilePart<TemporaryFile>";

/// Vendor extension holding an example return value for documentation templates
pub const RETURN_EXAMPLE_EXTENSION: &str = "x-missing-return-info-if-needed";

/// Primitive type names of the Java target
pub fn default_primitive_types() -> BTreeSet<String> {
    [
        "String", "boolean", "Boolean", "Double", "Integer", "Long", "Float", "Object", "byte[]",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

/// A single-level container expression split into its parts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContainerShape<'a> {
    pub kind: ContainerKind,
    /// Key type, only present for maps
    pub key: Option<&'a str>,
    pub element: &'a str,
}

/// Parse `List<T>`, `Set<T>` or `Map<K, V>`.
///
/// Returns `None` for anything else, including an unclosed bracket, trailing
/// text after the closing bracket, an empty element type, or a map without a
/// top-level comma.
///
/// # Examples
/// ```
/// use playgen::ir::ContainerKind;
/// use playgen::transform::shape::parse_container;
///
/// let shape = parse_container("Map<String, List<Pet>>").unwrap();
/// assert_eq!(shape.kind, ContainerKind::Map);
/// assert_eq!(shape.key, Some("String"));
/// assert_eq!(shape.element, "List<Pet>");
///
/// assert!(parse_container("ListResult").is_none());
/// ```
pub fn parse_container(type_name: &str) -> Option<ContainerShape<'_>> {
    let type_name = type_name.trim();
    let (kind, rest) = ContainerKind::all().find_map(|kind| {
        type_name
            .strip_prefix(kind.as_str())
            .and_then(|rest| rest.strip_prefix('<'))
            .map(|rest| (kind, rest))
    })?;

    let close = matching_close(rest)?;
    if !rest[close + 1..].trim().is_empty() {
        return None;
    }
    let inner = &rest[..close];

    match kind {
        ContainerKind::List | ContainerKind::Set => {
            let element = inner.trim();
            (!element.is_empty()).then_some(ContainerShape {
                kind,
                key: None,
                element,
            })
        }
        ContainerKind::Map => {
            let comma = top_level_comma(inner)?;
            let key = inner[..comma].trim();
            let element = inner[comma + 1..].trim();
            (!key.is_empty() && !element.is_empty()).then_some(ContainerShape {
                kind,
                key: Some(key),
                element,
            })
        }
    }
}

/// Byte index of the `>` closing an already opened `<`
fn matching_close(s: &str) -> Option<usize> {
    let mut depth = 1usize;
    for (idx, ch) in s.char_indices() {
        match ch {
            '<' => depth += 1,
            '>' => {
                depth -= 1;
                if depth == 0 {
                    return Some(idx);
                }
            }
            _ => {}
        }
    }
    None
}

fn top_level_comma(s: &str) -> Option<usize> {
    let mut depth = 0usize;
    for (idx, ch) in s.char_indices() {
        match ch {
            '<' => depth += 1,
            '>' => depth = depth.saturating_sub(1),
            ',' if depth == 0 => return Some(idx),
            _ => {}
        }
    }
    None
}

fn looks_like_container(type_name: &str) -> bool {
    let type_name = type_name.trim_start();
    ContainerKind::all().any(|kind| {
        type_name
            .strip_prefix(kind.as_str())
            .is_some_and(|rest| rest.starts_with('<'))
    })
}

/// A missing return type counts as primitive
pub fn is_primitive(type_name: Option<&str>, primitives: &BTreeSet<String>) -> bool {
    type_name.is_none_or(|name| primitives.contains(name))
}

/// Simplify the return shape and file parameters of `op` in place.
///
/// `return_container` is only ever set here, when a wrapper is stripped; a
/// container found by an earlier pass is kept, so simplifying twice is stable.
/// `return_type_is_primitive` is recomputed from the final return type.
pub fn simplify(op: &mut Operation, primitives: &BTreeSet<String>) {
    annotate_return_example(op);

    if let Some(return_type) = op.return_type.clone() {
        match parse_container(&return_type) {
            Some(shape) => {
                let element = shape.element.to_string();
                debug!(
                    operation_id = %op.operation_id,
                    container = %shape.kind,
                    element = %element,
                    "Unwrapped container return type"
                );
                op.return_container = Some(shape.kind);
                op.return_type = Some(element);
            }
            None if looks_like_container(&return_type) => {
                warn!(
                    operation_id = %op.operation_id,
                    return_type = %return_type,
                    "Could not parse container return type; leaving it as is"
                );
            }
            None => {}
        }
    } else {
        op.return_container = None;
    }
    op.return_type_is_primitive = is_primitive(op.return_type.as_deref(), primitives);

    substitute_file_params(op);
}

/// Stamp an example value for return types templates can't make one up for
fn annotate_return_example(op: &mut Operation) {
    let example = match op.return_type.as_deref() {
        Some("Boolean") => "true",
        Some("BigDecimal") => "1.0",
        _ => return,
    };
    op.vendor_extensions.insert(
        RETURN_EXAMPLE_EXTENSION.to_string(),
        JsonValue::String(example.to_string()),
    );
}

/// Both lists are walked; aliased records just get the same value twice.
fn substitute_file_params(op: &Operation) {
    for param in &op.all_params {
        let mut param = param.lock();
        if param.is_form_param && param.is_file {
            param.data_type = MULTIPART_FILE_TYPE.to_string();
        }
    }

    for param in &op.form_params {
        let mut param = param.lock();
        if param.is_file {
            param.data_type = MULTIPART_FILE_TYPE.to_string();
        }
    }
}
