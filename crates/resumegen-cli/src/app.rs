//! CLI Application logic
//!
//! Contains the `resumegen` command-line interface implementation.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::error::ErrorKind;
use clap::{CommandFactory, Parser};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use resumegen_core::jobs::{expand_home, DEFAULT_TEMPLATE_NAME};
use resumegen_core::{
    Converter, DirectoryLayout, JobOutput, JobRequest, Pipeline, ResumeError, Settings,
    SofficeConverter,
};

#[derive(Debug, Parser)]
#[command(name = "resumegen")]
#[command(author, version, about = "Generate resumes from JSON and DOCX templates", long_about = None)]
pub struct Cli {
    /// Resume JSON file (requires TEMPLATEFILE)
    #[arg(requires = "templatefile")]
    pub resumejsonfile: Option<PathBuf>,

    /// DOCX template file (requires RESUMEJSONFILE)
    #[arg(requires = "resumejsonfile")]
    pub templatefile: Option<PathBuf>,

    /// Directory holding resume-<lang>.json files
    #[arg(long, default_value = "./resumejson")]
    pub resume_dir: PathBuf,

    /// Directory holding <template>-<lang>.docx files
    #[arg(long, default_value = "./templates")]
    pub template_dir: PathBuf,

    /// Template base name
    #[arg(long, default_value = DEFAULT_TEMPLATE_NAME)]
    pub template: String,

    /// Comma-separated language codes
    #[arg(long, value_delimiter = ',', default_value = "en,fr")]
    pub language: Vec<String>,

    /// Directory receiving generated files
    #[arg(long, default_value = "./out")]
    pub outdir: PathBuf,

    /// Settings file (TOML)
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl Cli {
    /// Directory-convention inputs from the flags
    pub fn layout(&self) -> DirectoryLayout {
        DirectoryLayout {
            resume_dir: self.resume_dir.clone(),
            template_dir: self.template_dir.clone(),
            template_name: self.template.clone(),
            languages: self.language.clone(),
        }
    }

    /// Output directory with a leading `~` expanded
    pub fn outdir(&self) -> PathBuf {
        expand_home(&self.outdir)
    }

    /// Explicit job when positional files are given, one job per language otherwise
    pub fn job_request(&self) -> JobRequest {
        JobRequest::from_inputs(
            self.resumejsonfile.clone(),
            self.templatefile.clone(),
            self.layout(),
        )
    }
}

/// Build the log filter from `RUST_LOG`, or `debug` when it is unset or invalid
pub fn log_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"))
}

/// Install the stderr log subscriber
pub fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(log_filter())
        .with_writer(std::io::stderr)
        .init();
}

/// Run the CLI
pub fn run_cli() -> Result<()> {
    let cli = Cli::parse();
    init_logging();

    let settings = Settings::load_optional(cli.config.as_deref())?;
    let converter = SofficeConverter::new(settings.converter.program.as_str());

    match generate_command(&cli, &settings, converter) {
        Ok(outputs) => {
            info!("Done: {} job(s)", outputs.len());
            Ok(())
        }
        Err(err) => match err.downcast_ref::<ResumeError>() {
            Some(ResumeError::Usage(message)) => {
                Cli::command().error(ErrorKind::MissingRequiredArgument, message).exit()
            }
            _ => Err(err),
        },
    }
}

/// Resolve every job, then render and convert them in order
///
/// Resolution finishes before the output directory is touched, so a missing
/// input leaves the filesystem unchanged.
pub fn generate_command<C: Converter>(
    cli: &Cli,
    settings: &Settings,
    converter: C,
) -> Result<Vec<JobOutput>> {
    let jobs = cli.job_request().resolve()?;
    debug!("Resolved {} job(s)", jobs.len());

    let outdir = cli.outdir();
    let pipeline = Pipeline::new(&outdir, converter).with_options(settings.render_options());
    pipeline
        .run(&jobs)
        .with_context(|| format!("Failed to generate resumes in {}", outdir.display()))
}
