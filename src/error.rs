//! Error handling for stencil.
//! Defines the error type and result alias used throughout the crate.

use std::io;
use thiserror::Error;

/// Custom error types for stencil operations.
#[derive(Error, Debug)]
pub enum Error {
    /// The template file resolved from a base path and the configured
    /// extension does not exist.
    #[error("Template '{template}' does not exist.")]
    TemplateNotFoundError { template: String },

    /// Represents errors that occur during file system operations
    #[error("IO error: {0}.")]
    IoError(#[from] io::Error),

    /// Syntax or evaluation errors reported by MiniJinja
    #[error("MiniJinja error: {0}.")]
    MinijinjaError(#[from] minijinja::Error),

    /// Represents errors that occur during configuration parsing or processing
    #[error("Configuration error: {0}.")]
    ConfigError(String),
}

/// Convenience type alias for Results with [`Error`] as the error type.
pub type Result<T> = std::result::Result<T, Error>;
