//! Job resolution
//!
//! A run either names one resume and one template explicitly, or derives a
//! job per language from directory conventions:
//!
//! ```text
//! <resume-dir>/resume-<lang>.json
//! <template-dir>/<template>-<lang>.docx   (falls back to <template>.docx)
//! ```
//!
//! Every job is checked while it is built, and all jobs are built before the
//! pipeline renders the first one.

use std::path::{Path, PathBuf};

use tracing::info;

use crate::error::{ResumeError, Result};

/// Output base name used for explicitly given files
pub const MANUAL_OUTPUT_NAME: &str = "manual";

/// Languages processed when none are given
pub const DEFAULT_LANGUAGES: [&str; 2] = ["en", "fr"];

/// Template name used when none is given
pub const DEFAULT_TEMPLATE_NAME: &str = "simple";

/// One resume rendered with one template
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Job {
    /// Resume JSON file
    pub resume: PathBuf,
    /// DOCX template file
    pub template: PathBuf,
    /// File stem of the generated documents
    pub output_name: String,
}

impl Job {
    /// Path of the rendered DOCX inside `outdir`
    pub fn docx_path(&self, outdir: &Path) -> PathBuf {
        outdir.join(format!("{}.docx", self.output_name))
    }
}

/// Directory-convention inputs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryLayout {
    pub resume_dir: PathBuf,
    pub template_dir: PathBuf,
    pub template_name: String,
    pub languages: Vec<String>,
}

impl Default for DirectoryLayout {
    fn default() -> Self {
        Self {
            resume_dir: PathBuf::from("./resumejson"),
            template_dir: PathBuf::from("./templates"),
            template_name: DEFAULT_TEMPLATE_NAME.to_string(),
            languages: DEFAULT_LANGUAGES.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl DirectoryLayout {
    /// `<resume-dir>/resume-<lang>.json`
    pub fn resume_path(&self, language: &str) -> PathBuf {
        self.resume_dir.join(format!("resume-{}.json", language))
    }

    /// `<template-dir>/<template>-<lang>.docx`
    pub fn template_path(&self, language: &str) -> PathBuf {
        self.template_dir
            .join(format!("{}-{}.docx", self.template_name, language))
    }

    /// `<template-dir>/<template>.docx`
    pub fn fallback_template_path(&self) -> PathBuf {
        self.template_dir
            .join(format!("{}.docx", self.template_name))
    }

    /// `<template>-<lang>`
    pub fn output_name(&self, language: &str) -> String {
        format!("{}-{}", self.template_name, language)
    }
}

/// What the user asked for
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobRequest {
    /// Positional files; both must be present
    Explicit {
        resume: Option<PathBuf>,
        template: Option<PathBuf>,
    },
    /// One job per language
    Directory(DirectoryLayout),
}

impl JobRequest {
    /// Explicit mode as soon as either positional file is given
    pub fn from_inputs(
        resume: Option<PathBuf>,
        template: Option<PathBuf>,
        layout: DirectoryLayout,
    ) -> Self {
        if resume.is_some() || template.is_some() {
            JobRequest::Explicit { resume, template }
        } else {
            JobRequest::Directory(layout)
        }
    }

    /// Resolve into jobs, in language order
    pub fn resolve(&self) -> Result<Vec<Job>> {
        match self {
            JobRequest::Explicit { resume, template } => {
                Ok(vec![resolve_explicit(resume.as_deref(), template.as_deref())?])
            }
            JobRequest::Directory(layout) => resolve_directory(layout),
        }
    }
}

fn resolve_explicit(resume: Option<&Path>, template: Option<&Path>) -> Result<Job> {
    let (Some(resume), Some(template)) = (resume, template) else {
        return Err(ResumeError::Usage(
            "When using positional arguments, provide both resumejsonfile and templatefile."
                .to_string(),
        ));
    };

    let resume = expand_home(resume);
    let template = expand_home(template);

    if !resume.is_file() {
        return Err(ResumeError::ResumeNotFound(resume));
    }
    if !template.is_file() {
        return Err(ResumeError::TemplateNotFound(template));
    }

    Ok(Job {
        resume,
        template,
        output_name: MANUAL_OUTPUT_NAME.to_string(),
    })
}

fn resolve_directory(layout: &DirectoryLayout) -> Result<Vec<Job>> {
    if layout.template_name.is_empty() {
        return Err(ResumeError::Usage(
            "Either positional files or both --template and --language must be provided."
                .to_string(),
        ));
    }

    let languages: Vec<&str> = layout
        .languages
        .iter()
        .map(|lang| lang.trim())
        .filter(|lang| !lang.is_empty())
        .collect();
    if languages.is_empty() {
        return Err(ResumeError::Usage(
            "At least one language must be specified.".to_string(),
        ));
    }

    languages
        .into_iter()
        .map(|lang| resolve_language(layout, lang))
        .collect()
}

fn resolve_language(layout: &DirectoryLayout, language: &str) -> Result<Job> {
    let resume = layout.resume_path(language);
    let mut template = layout.template_path(language);

    if !template.is_file() {
        let fallback = layout.fallback_template_path();
        if !fallback.is_file() {
            return Err(ResumeError::TemplateFallbackExhausted {
                path: template,
                fallback,
            });
        }
        info!(
            "[{}] Template {} not found; using fallback {}",
            language,
            template.display(),
            fallback.display()
        );
        template = fallback;
    }

    if !resume.is_file() {
        return Err(ResumeError::ResumeNotFound(resume));
    }

    Ok(Job {
        resume,
        template,
        output_name: layout.output_name(language),
    })
}

/// Expand a leading `~` to the home directory
pub fn expand_home(path: &Path) -> PathBuf {
    let Ok(rest) = path.strip_prefix("~") else {
        return path.to_path_buf();
    };
    match dirs::home_dir() {
        Some(home) => home.join(rest),
        None => path.to_path_buf(),
    }
}
