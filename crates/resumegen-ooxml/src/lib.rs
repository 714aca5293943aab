//! # resumegen-ooxml
//!
//! DOCX template handling for resumegen.
//!
//! This crate provides functionality to:
//! - Read and write DOCX packages
//! - Register hyperlink relationships and build rich text runs
//! - Bind structured data into `{{ … }}` placeholders with Handlebars
//!
//! Placeholders may be split across runs by Word; they are rejoined before
//! binding. `{{r name}}` inserts a [`RichText`] value in place of its run.

pub mod archive;
pub mod error;
pub mod preprocess;
pub mod relationships;
pub mod richtext;
pub mod template;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use archive::OoxmlArchive;
pub use error::{OoxmlError, Result};
pub use relationships::{Relationship, Relationships};
pub use richtext::RichText;
pub use template::DocxTemplate;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
