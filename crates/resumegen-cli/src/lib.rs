//! resumegen CLI - Command-line interface library
//!
//! Two programs are built from this crate:
//! - `resumegen`: render resume JSON into DOCX templates and export PDFs
//! - `resume-spellcheck`: edit every string value of a resume in `$EDITOR`
//!
//! # Binary Usage
//!
//! ```bash
//! # One job per language from ./resumejson and ./templates
//! resumegen --template simple --language en,fr --outdir out
//!
//! # Explicit files, written as out/manual.docx and out/manual.pdf
//! resumegen ~/resume.json ~/template.docx
//!
//! # Spell-check a resume, passing extra arguments to the editor
//! resume-spellcheck resumejson/resume-en.json -c 'set spell'
//! ```

pub mod app;
pub mod spellcheck;

pub use app::{generate_command, init_logging, log_filter, run_cli, Cli};
