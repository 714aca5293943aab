//! resumegen-core - resume documents from JSON and DOCX templates
//!
//! The flow for one run:
//!
//! 1. [`JobRequest::resolve`] turns command-line inputs into [`Job`]s,
//!    checking that every resume and template exists.
//! 2. [`Pipeline::run`] renders each job with [`render`] and hands the
//!    document to a [`Converter`] for PDF export.
//!
//! # Example
//!
//! ```no_run
//! use resumegen_core::{DirectoryLayout, JobRequest, Pipeline, SofficeConverter};
//!
//! let jobs = JobRequest::Directory(DirectoryLayout::default()).resolve()?;
//! let outputs = Pipeline::new("out", SofficeConverter::default()).run(&jobs)?;
//! for output in outputs {
//!     println!("{}", output.pdf.display());
//! }
//! # Ok::<(), resumegen_core::ResumeError>(())
//! ```

pub mod config;
pub mod convert;
pub mod error;
pub mod jobs;
pub mod pipeline;
pub mod render;
pub mod resume;

pub use config::Settings;
pub use convert::{pdf_path_for, Converter, SofficeConverter};
pub use error::{ResumeError, Result};
pub use jobs::{DirectoryLayout, Job, JobRequest};
pub use pipeline::{JobOutput, Pipeline};
pub use render::{render, render_with, RenderOptions};
pub use resume::{LinkField, LinkFields, ResumeRecord};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
