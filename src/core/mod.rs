//! Shared plumbing for the playgen library: errors, options and naming helpers.

pub mod config;
pub mod error;
pub mod utils;

pub use config::{GenerationFlags, GeneratorOptions};
pub use error::{Error, Result};
