//! Error types for resume generation
//!
//! Every variant is fatal to a run; nothing is retried.

use std::path::PathBuf;

use resumegen_ooxml::OoxmlError;
use thiserror::Error;

/// Errors raised while resolving, rendering or converting jobs
#[derive(Error, Debug)]
pub enum ResumeError {
    /// Invalid combination of command-line inputs
    #[error("{0}")]
    Usage(String),

    /// Resume JSON file does not exist
    #[error("Resume file not found: {}", .0.display())]
    ResumeNotFound(PathBuf),

    /// Explicitly given template file does not exist
    #[error("Template file not found: {}", .0.display())]
    TemplateNotFound(PathBuf),

    /// Neither the language-specific nor the fallback template exists
    #[error(
        "Template file not found: {} (also tried fallback {})",
        .path.display(),
        .fallback.display()
    )]
    TemplateFallbackExhausted {
        /// Language-specific template path
        path: PathBuf,
        /// Language-agnostic template path
        fallback: PathBuf,
    },

    /// Resume file could not be read or parsed
    #[error("Failed to load resume {}: {reason}", .path.display())]
    LoadResume {
        /// Resume path
        path: PathBuf,
        /// What went wrong
        reason: String,
    },

    /// Template package could not be read or is malformed
    #[error("Failed to load template {}: {source}", .path.display())]
    LoadTemplate {
        /// Template path
        path: PathBuf,
        /// Underlying OOXML error
        #[source]
        source: OoxmlError,
    },

    /// Placeholder binding or saving failed
    #[error("Failed to render {}: {source}", .path.display())]
    Render {
        /// Output document path
        path: PathBuf,
        /// Underlying OOXML error
        #[source]
        source: OoxmlError,
    },

    /// External converter could not run or exited with failure
    #[error("Failed to convert {} to PDF: {reason}", .path.display())]
    Conversion {
        /// Rendered document path
        path: PathBuf,
        /// Exit status or spawn error
        reason: String,
    },

    /// Output directory could not be created
    #[error("Failed to create output directory {}: {source}", .path.display())]
    OutputDir {
        /// Output directory
        path: PathBuf,
        /// Underlying IO error
        #[source]
        source: std::io::Error,
    },

    /// Settings file could not be read or parsed
    #[error("Invalid config {}: {reason}", .path.display())]
    Config {
        /// Settings file path
        path: PathBuf,
        /// What went wrong
        reason: String,
    },
}

/// Result type for resume generation
pub type Result<T> = std::result::Result<T, ResumeError>;
