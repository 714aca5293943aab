//! Pipeline driver: render then convert each job, in order
//!
//! The first failure stops the run. Outputs already written by earlier jobs
//! are left in place.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::convert::Converter;
use crate::error::{ResumeError, Result};
use crate::jobs::Job;
use crate::render::{render_with, RenderOptions};

/// Files produced for one job
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobOutput {
    pub docx: PathBuf,
    pub pdf: PathBuf,
}

/// Runs jobs against one output directory and converter
#[derive(Debug)]
pub struct Pipeline<C> {
    outdir: PathBuf,
    converter: C,
    options: RenderOptions,
}

impl<C: Converter> Pipeline<C> {
    /// Create a pipeline writing into `outdir`
    pub fn new(outdir: impl Into<PathBuf>, converter: C) -> Self {
        Self {
            outdir: outdir.into(),
            converter,
            options: RenderOptions::default(),
        }
    }

    /// Override rendering options
    pub fn with_options(mut self, options: RenderOptions) -> Self {
        self.options = options;
        self
    }

    /// Output directory
    pub fn outdir(&self) -> &Path {
        &self.outdir
    }

    /// Create the output directory if it does not exist yet
    pub fn prepare_output_dir(&self) -> Result<()> {
        fs::create_dir_all(&self.outdir).map_err(|source| ResumeError::OutputDir {
            path: self.outdir.clone(),
            source,
        })
    }

    /// Create the output directory, then process every job in order
    pub fn run(&self, jobs: &[Job]) -> Result<Vec<JobOutput>> {
        self.prepare_output_dir()?;
        jobs.iter().map(|job| self.run_job(job)).collect()
    }

    /// Render and convert a single job
    pub fn run_job(&self, job: &Job) -> Result<JobOutput> {
        info!(
            "Processing {} template={} resume={}",
            job.output_name,
            job.template.display(),
            job.resume.display()
        );

        let output_docx = job.docx_path(&self.outdir);
        let docx = render_with(&job.resume, &job.template, &output_docx, self.options)?;
        let pdf = self.converter.convert(&docx, &self.outdir)?;

        info!("Generated DOCX: {}", docx.display());
        info!("Generated PDF:  {}", pdf.display());

        Ok(JobOutput { docx, pdf })
    }
}
