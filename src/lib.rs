//! Stencil renders template files with a set of variables and captures what
//! they produce. Variables can be local to one template or global to every
//! template in the process, and rendered output can be passed through filters.

/// Process-wide template extension and configuration files
/// Supports JSON and YAML formats (stencil.json, stencil.yml, stencil.yaml)
pub mod config;

/// Common constants
pub mod constants;

/// Error types and handling for stencil
pub mod error;

/// Variables shared by every template in the process
pub mod globals;

/// Template engines that evaluate template source against a context
pub mod renderer;

/// Template files bound to their variables
pub mod template;

pub use error::{Error, Result};
pub use template::Template;
