//! DOCX to PDF conversion through an external office suite

use std::path::{Path, PathBuf};
use std::process::Command;

use tracing::info;

use crate::error::{ResumeError, Result};

/// Program run when none is configured
pub const DEFAULT_CONVERTER: &str = "soffice";

/// Turns a rendered document into a PDF
pub trait Converter {
    /// Convert `docx` into a PDF inside `output_dir` and return the PDF path
    fn convert(&self, docx: &Path, output_dir: &Path) -> Result<PathBuf>;
}

/// LibreOffice in headless mode
///
/// The call blocks until the converter exits. There is no timeout.
#[derive(Debug, Clone)]
pub struct SofficeConverter {
    program: String,
}

impl Default for SofficeConverter {
    fn default() -> Self {
        Self::new(DEFAULT_CONVERTER)
    }
}

impl SofficeConverter {
    /// Use `program` instead of `soffice` (e.g. `libreoffice`)
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// The configured program
    pub fn program(&self) -> &str {
        &self.program
    }

    /// The command line run for one conversion
    pub fn command(&self, docx: &Path, output_dir: &Path) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.arg("--headless")
            .arg("--convert-to")
            .arg("pdf")
            .arg("--outdir")
            .arg(output_dir)
            .arg(docx);
        cmd
    }
}

impl Converter for SofficeConverter {
    fn convert(&self, docx: &Path, output_dir: &Path) -> Result<PathBuf> {
        info!(
            "Exporting {} to pdf in {}",
            docx.display(),
            output_dir.display()
        );

        let status = self
            .command(docx, output_dir)
            .status()
            .map_err(|e| ResumeError::Conversion {
                path: docx.to_path_buf(),
                reason: format!("failed to run {}: {}", self.program, e),
            })?;

        if !status.success() {
            return Err(ResumeError::Conversion {
                path: docx.to_path_buf(),
                reason: format!("{} exited with {}", self.program, status),
            });
        }

        // The converter's exit status is trusted; the file is not checked
        Ok(pdf_path_for(docx, output_dir))
    }
}

/// `<output_dir>/<docx stem>.pdf`
pub fn pdf_path_for(docx: &Path, output_dir: &Path) -> PathBuf {
    let stem = docx.file_stem().unwrap_or(docx.as_os_str());
    let mut name = stem.to_os_string();
    name.push(".pdf");
    output_dir.join(name)
}
