//! Error types for DOCX template operations

use thiserror::Error;

/// Errors that can occur while loading, rendering or saving a template
#[derive(Error, Debug)]
pub enum OoxmlError {
    /// Error reading or writing the ZIP archive
    #[error("Archive error: {0}")]
    Archive(#[from] zip::result::ZipError),

    /// Error reading or writing files
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Error parsing XML content
    #[error("XML parsing error: {0}")]
    Xml(#[from] quick_xml::Error),

    /// Required part not found in the package
    #[error("Required file not found: {0}")]
    MissingFile(String),

    /// Placeholder binding failed for a document part
    #[error("Failed to render {part}: {message}")]
    Render {
        /// Package part being rendered (e.g. `word/document.xml`)
        part: String,
        /// Message reported by the template engine
        message: String,
    },
}

/// Result type for OOXML operations
pub type Result<T> = std::result::Result<T, OoxmlError>;
