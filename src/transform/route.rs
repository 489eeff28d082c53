//! Route syntax normalization.
//!
//! Rewrites brace placeholders (`/pet/{pet_id}`) into the Play routes syntax
//! (`/pet/:petId`). Placeholder names are lower camel cased; everything else
//! in the path is left as written.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::core::error::{Error, Result};
use crate::core::utils::to_camel_case;

static PLACEHOLDER: Lazy<Regex> = Lazy::new(|| Regex::new(r"\{([^{}]+)\}").unwrap());

/// Normalize a route template for the operation named `operation_id`.
///
/// # Errors
///
/// Returns [`Error::MalformedPath`] when the braces are unbalanced, nested or
/// enclose a name with no identifier characters.
///
/// # Examples
/// ```
/// use playgen::transform::route::normalize;
///
/// assert_eq!(normalize("getPet", "/pet/{pet_id}").unwrap(), "/pet/:petId");
/// assert_eq!(normalize("listPets", "/pets").unwrap(), "/pets");
/// assert!(normalize("getPet", "/pet/{petId").is_err());
/// ```
pub fn normalize(operation_id: &str, path: &str) -> Result<String> {
    check_braces(path).map_err(|reason| Error::malformed_path(operation_id, path, reason))?;

    let mut normalized = String::with_capacity(path.len());
    let mut last = 0;
    for caps in PLACEHOLDER.captures_iter(path) {
        let (Some(whole), Some(name)) = (caps.get(0), caps.get(1)) else {
            continue;
        };
        let param = to_camel_case(name.as_str());
        if param.is_empty() {
            return Err(Error::malformed_path(
                operation_id,
                path,
                format!(
                    "placeholder '{}' at byte {} has no identifier characters",
                    whole.as_str(),
                    whole.start()
                ),
            ));
        }
        normalized.push_str(&path[last..whole.start()]);
        normalized.push(':');
        normalized.push_str(&param);
        last = whole.end();
    }
    normalized.push_str(&path[last..]);
    Ok(normalized)
}

/// Every `{` must be closed by a `}` before the next `{`, with something in between
fn check_braces(path: &str) -> std::result::Result<(), String> {
    let mut open: Option<usize> = None;
    for (idx, ch) in path.char_indices() {
        match (ch, open) {
            ('{', None) => open = Some(idx),
            ('{', Some(start)) => {
                return Err(format!(
                    "nested '{{' at byte {idx} inside placeholder opened at byte {start}"
                ));
            }
            ('}', None) => return Err(format!("unmatched '}}' at byte {idx}")),
            ('}', Some(start)) if idx == start + 1 => {
                return Err(format!("empty placeholder at byte {start}"));
            }
            ('}', Some(_)) => open = None,
            _ => {}
        }
    }

    match open {
        Some(start) => Err(format!("unclosed '{{' at byte {start}")),
        None => Ok(()),
    }
}
