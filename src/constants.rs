//! Common constants used throughout stencil.

/// Extension appended to template paths until `config::set_template_ext` changes it
pub const DEFAULT_TEMPLATE_EXT: &str = ".j2";

/// Supported configuration file names
pub const CONFIG_FILES: [&str; 3] = ["stencil.json", "stencil.yml", "stencil.yaml"];
