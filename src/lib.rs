//! playgen
//!
//! Transformation layer of a Play Framework (Java) server generator. It takes
//! the generic operation and security IR produced by an OpenAPI parser and
//! rewrites it into the shape the Play templates render directly:
//!
//! - routes use Play's `:param` syntax instead of `{param}`
//! - container return types are split into container tag and element type
//! - multipart file uploads use Play's file-part type
//! - security schemes carry their JWKS and token introspection endpoints
//! - the set of generated files follows the generation flags
//!
//! ```
//! use playgen::core::config::GenerationFlags;
//! use playgen::ir::{ApiIr, Operation};
//! use playgen::transform::Transformer;
//!
//! let ir = ApiIr {
//!     operations: vec![
//!         Operation::new("getPet", "GET", "/pet/{pet_id}").with_return_type("List<Pet>"),
//!     ],
//!     ..Default::default()
//! };
//! let bundle = Transformer::new(GenerationFlags::default()).run(ir).unwrap();
//! assert_eq!(bundle.operations[0].path, "/pet/:petId");
//! assert_eq!(bundle.operations[0].return_type.as_deref(), Some("Pet"));
//! ```
#![deny(unsafe_code)]

pub mod core;
pub mod ir;
pub mod render;
pub mod transform;

pub use crate::core::{Error, GenerationFlags, GeneratorOptions, Result};
pub use crate::transform::{GenerationBundle, Transformer};

/// Help text shown by hosts listing available generators
pub const GENERATOR_HELP: &str = "Generates a Java Play Framework Server application.";
