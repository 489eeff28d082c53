//! Operation parameters and the shared handle that lets one parameter be
//! listed in several views of the same operation.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value as JsonValue;

/// Operation parameter
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Parameter {
    /// Name as written in the API description
    pub base_name: String,
    /// Name of the generated method argument
    pub param_name: String,
    /// Target-language type of the argument
    pub data_type: String,
    pub description: Option<String>,
    pub required: bool,
    pub is_form_param: bool,
    pub is_file: bool,
    pub is_path_param: bool,
    pub is_query_param: bool,
    pub is_header_param: bool,
    pub is_body_param: bool,
    pub vendor_extensions: BTreeMap<String, JsonValue>,
}

impl Parameter {
    /// A multipart form field carrying an uploaded file
    pub fn is_file_upload(&self) -> bool {
        self.is_form_param && self.is_file
    }
}

/// Shared handle to a [`Parameter`].
///
/// `Operation::all_params` and `Operation::form_params` hold clones of the same
/// handle for a form field, so an update made through either list is visible
/// through the other.
#[derive(Clone, Default)]
pub struct SharedParameter(Arc<Mutex<Parameter>>);

impl SharedParameter {
    pub fn new(param: Parameter) -> Self {
        Self(Arc::new(Mutex::new(param)))
    }

    /// Lock the parameter for reading or in-place mutation
    pub fn lock(&self) -> MutexGuard<'_, Parameter> {
        // A panic while holding the lock leaves plain data behind; keep using it.
        self.0.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Copy of the current parameter value
    pub fn snapshot(&self) -> Parameter {
        self.lock().clone()
    }

    /// Whether both handles point at the same parameter record
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl From<Parameter> for SharedParameter {
    fn from(param: Parameter) -> Self {
        Self::new(param)
    }
}

impl fmt::Debug for SharedParameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&*self.lock(), f)
    }
}

impl Serialize for SharedParameter {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.lock().serialize(serializer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn upload() -> Parameter {
        Parameter {
            base_name: "file".to_string(),
            param_name: "file".to_string(),
            data_type: "File".to_string(),
            is_form_param: true,
            is_file: true,
            ..Default::default()
        }
    }

    #[test]
    fn test_clones_share_the_record() {
        let first = SharedParameter::new(upload());
        let second = first.clone();

        second.lock().data_type = "InputStream".to_string();

        assert!(first.ptr_eq(&second));
        assert_eq!(first.snapshot().data_type, "InputStream");
    }

    #[test]
    fn test_separate_handles_do_not_alias() {
        let first = SharedParameter::new(upload());
        let second = SharedParameter::new(upload());
        assert!(!first.ptr_eq(&second));
    }

    #[test]
    fn test_is_file_upload() {
        assert!(upload().is_file_upload());
        let plain_file = Parameter {
            is_form_param: false,
            ..upload()
        };
        assert!(!plain_file.is_file_upload());
    }

    #[test]
    fn test_serializes_inner_value() {
        let shared = SharedParameter::new(upload());
        let value = serde_json::to_value(&shared).unwrap();
        assert_eq!(value["baseName"], "file");
        assert_eq!(value["isFile"], true);
    }
}
